use async_trait::async_trait;
use proxydns_domain::DomainError;
use std::net::IpAddr;
use tokio::time::Instant;

/// A single resolution strategy in the fallback chain.
///
/// Implementations must stop waiting once `deadline` passes and return
/// `DomainError::TransportTimeout`. Any error is a soft failure: it does not
/// claim the domain has no records, so the caller may try the next resolver.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, domain: &str, deadline: Instant) -> Result<Vec<IpAddr>, DomainError>;

    /// Label used in logs and errors, e.g. `udp://1.1.1.1:53`.
    fn name(&self) -> &str;
}
