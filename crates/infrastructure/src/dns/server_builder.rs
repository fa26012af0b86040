use super::backend::{create_backend, Backend, LocalBackend};
use super::transport::UdpDatagramTransport;
use proxydns_application::ports::{DatagramTransport, NameResolver};
use proxydns_application::services::{ResolutionServer, DEFAULT_QUERY_TIMEOUT};
use proxydns_domain::{
    ClientSubnet, DnsConfig, DomainError, HostMapping, NameServerEndpoint, QueryType, StaticHosts,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Assembles a `ResolutionServer` from construction input.
///
/// The client subnet is validated first, then the static hosts table is
/// merged, then one backend is created per name server in the given order.
/// With no name servers the platform resolver is installed on its own.
pub struct ResolutionServerBuilder {
    client_ip: Vec<u8>,
    name_servers: Vec<NameServerEndpoint>,
    hosts: BTreeMap<String, String>,
    static_hosts: Vec<HostMapping>,
    query_timeout: Duration,
    query_type: QueryType,
    transport: Arc<dyn DatagramTransport>,
}

impl ResolutionServerBuilder {
    pub fn new() -> Self {
        Self {
            client_ip: vec![],
            name_servers: vec![],
            hosts: BTreeMap::new(),
            static_hosts: vec![],
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            query_type: QueryType::default(),
            transport: Arc::new(UdpDatagramTransport::new()),
        }
    }

    pub fn from_config(config: &DnsConfig) -> Result<Self, DomainError> {
        Ok(Self::new()
            .with_client_ip(&config.client_ip_octets()?)
            .with_name_servers(config.name_server_endpoints()?)
            .with_hosts(config.hosts.clone())
            .with_static_hosts(config.static_hosts.clone())
            .with_query_timeout(config.query_timeout_duration())
            .with_query_type(config.query_type))
    }

    /// Raw client address: empty for none, 4 or 16 bytes otherwise.
    pub fn with_client_ip(mut self, octets: &[u8]) -> Self {
        self.client_ip = octets.to_vec();
        self
    }

    pub fn with_name_servers(mut self, name_servers: Vec<NameServerEndpoint>) -> Self {
        self.name_servers = name_servers;
        self
    }

    pub fn with_hosts(mut self, hosts: BTreeMap<String, String>) -> Self {
        self.hosts = hosts;
        self
    }

    pub fn with_static_hosts(mut self, static_hosts: Vec<HostMapping>) -> Self {
        self.static_hosts = static_hosts;
        self
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub fn with_query_type(mut self, query_type: QueryType) -> Self {
        self.query_type = query_type;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn DatagramTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn build(self) -> Result<ResolutionServer, DomainError> {
        let client_subnet = ClientSubnet::from_octets(&self.client_ip)?;
        let hosts = Arc::new(StaticHosts::new(&self.hosts, &self.static_hosts)?);

        let mut resolvers: Vec<Arc<dyn NameResolver>> = self
            .name_servers
            .iter()
            .map(|endpoint| {
                Arc::new(create_backend(
                    endpoint,
                    client_subnet,
                    self.query_type,
                    &self.transport,
                )) as Arc<dyn NameResolver>
            })
            .collect();

        if resolvers.is_empty() {
            info!("No name servers configured, using the platform resolver");
            resolvers.push(Arc::new(Backend::Local(LocalBackend::new())));
        }

        info!(
            resolvers = ?resolvers.iter().map(|r| r.name()).collect::<Vec<_>>(),
            static_hosts = hosts.len(),
            client_subnet = ?client_subnet.map(|s| s.to_string()),
            query_type = %self.query_type,
            query_timeout_ms = self.query_timeout.as_millis() as u64,
            "Building resolution server"
        );

        ResolutionServer::new(hosts, resolvers, self.query_timeout)
    }
}

impl Default for ResolutionServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
