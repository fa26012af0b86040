pub mod inflight;
pub mod local;
pub mod wire;

use async_trait::async_trait;
use proxydns_application::ports::{DatagramTransport, NameResolver};
use proxydns_domain::{ClientSubnet, DomainError, NameServerEndpoint, QueryType};
use std::net::IpAddr;
use std::sync::Arc;
use tokio::time::Instant;

pub use inflight::{IdLease, InflightIds};
pub use local::LocalBackend;
pub use wire::WireBackend;

/// The closed set of resolution strategies a name server entry can map to.
pub enum Backend {
    Local(LocalBackend),
    Wire(WireBackend),
}

impl Backend {
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

#[async_trait]
impl NameResolver for Backend {
    async fn resolve(&self, domain: &str, deadline: Instant) -> Result<Vec<IpAddr>, DomainError> {
        match self {
            Self::Local(b) => b.resolve(domain, deadline).await,
            Self::Wire(b) => b.resolve(domain, deadline).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Local(b) => b.name(),
            Self::Wire(b) => b.name(),
        }
    }
}

pub fn create_backend(
    endpoint: &NameServerEndpoint,
    client_subnet: Option<ClientSubnet>,
    query_type: QueryType,
    transport: &Arc<dyn DatagramTransport>,
) -> Backend {
    match endpoint {
        NameServerEndpoint::Local => Backend::Local(LocalBackend::new()),
        NameServerEndpoint::Udp { addr } => Backend::Wire(WireBackend::new(
            *addr,
            client_subnet,
            query_type,
            Arc::clone(transport),
        )),
    }
}
