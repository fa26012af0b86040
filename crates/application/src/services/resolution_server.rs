use async_trait::async_trait;
use proxydns_domain::{normalize_domain, DomainError, StaticHosts};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::ports::{DnsClient, ManagedComponent, NameResolver};

/// Budget each resolver gets before the chain moves on.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(4);

/// Resolves names through the static hosts table, then the resolver chain.
///
/// Resolvers are consulted strictly in order, one at a time, each under its
/// own deadline. The first non-empty answer wins; errors only move the chain
/// forward. Everything here is immutable after construction.
pub struct ResolutionServer {
    hosts: Arc<StaticHosts>,
    resolvers: Vec<Arc<dyn NameResolver>>,
    query_timeout: Duration,
}

impl ResolutionServer {
    pub fn new(
        hosts: Arc<StaticHosts>,
        resolvers: Vec<Arc<dyn NameResolver>>,
        query_timeout: Duration,
    ) -> Result<Self, DomainError> {
        if resolvers.is_empty() {
            return Err(DomainError::ConfigError(
                "resolution server needs at least one resolver".to_string(),
            ));
        }
        if query_timeout.is_zero() {
            return Err(DomainError::ConfigError(
                "query timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            hosts,
            resolvers,
            query_timeout,
        })
    }

    pub fn resolver_names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    #[instrument(skip(self))]
    pub async fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, DomainError> {
        if normalize_domain(domain).is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "empty domain name: {:?}",
                domain
            )));
        }

        let pinned = self.hosts.lookup_ip(domain);
        if !pinned.is_empty() {
            debug!(addresses = pinned.len(), "Answered from static hosts");
            return Ok(pinned.to_vec());
        }

        let mut last_error = None;

        for (position, resolver) in self.resolvers.iter().enumerate() {
            let deadline = Instant::now() + self.query_timeout;

            let outcome =
                match tokio::time::timeout_at(deadline, resolver.resolve(domain, deadline)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(DomainError::TransportTimeout {
                        server: resolver.name().to_string(),
                    }),
                };

            match outcome {
                Ok(addresses) if !addresses.is_empty() => {
                    debug!(
                        resolver = resolver.name(),
                        position,
                        addresses = addresses.len(),
                        "Resolved"
                    );
                    return Ok(addresses);
                }
                Ok(_) => {
                    debug!(resolver = resolver.name(), position, "No addresses, trying next");
                }
                Err(e) => {
                    warn!(resolver = resolver.name(), position, error = %e, "Resolver failed, falling back");
                    last_error = Some(e);
                }
            }
        }

        Err(DomainError::ResolutionExhausted {
            domain: domain.to_string(),
            last_error: last_error.map(Box::new),
        })
    }
}

#[async_trait]
impl DnsClient for ResolutionServer {
    async fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, DomainError> {
        ResolutionServer::lookup_ip(self, domain).await
    }
}

impl ManagedComponent for ResolutionServer {
    fn start(&self) -> Result<(), DomainError> {
        debug!(resolvers = ?self.resolver_names(), static_hosts = self.hosts.len(), "Resolution server started");
        Ok(())
    }

    fn close(&self) -> Result<(), DomainError> {
        debug!("Resolution server closed");
        Ok(())
    }
}
