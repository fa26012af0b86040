use async_trait::async_trait;
use proxydns_application::ports::NameResolver;
use proxydns_domain::DomainError;
use std::net::IpAddr;
use tokio::time::Instant;
use tracing::debug;

const LOCAL_NAME: &str = "localhost";

/// Delegates to the host platform's resolver (`getaddrinfo` via tokio).
#[derive(Debug, Clone)]
pub struct LocalBackend {
    name: String,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self {
            name: LOCAL_NAME.to_string(),
        }
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameResolver for LocalBackend {
    async fn resolve(&self, domain: &str, deadline: Instant) -> Result<Vec<IpAddr>, DomainError> {
        let lookup = tokio::net::lookup_host((domain, 0));

        let socket_addrs = tokio::time::timeout_at(deadline, lookup)
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.name.clone(),
            })?
            .map_err(|e| DomainError::TransportFailure {
                server: self.name.clone(),
                reason: e.to_string(),
            })?;

        let mut addresses: Vec<IpAddr> = Vec::new();
        for socket_addr in socket_addrs {
            let ip = socket_addr.ip();
            if !addresses.contains(&ip) {
                addresses.push(ip);
            }
        }

        debug!(domain, addresses = addresses.len(), "Platform resolver answered");
        Ok(addresses)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
