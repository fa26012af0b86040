use async_trait::async_trait;
use proxydns_domain::DomainError;
use std::net::IpAddr;

/// Name-to-address lookup handed to the routing layer.
#[async_trait]
pub trait DnsClient: Send + Sync {
    async fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, DomainError>;
}
