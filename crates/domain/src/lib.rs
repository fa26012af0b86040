//! proxydns domain layer
pub mod client_subnet;
pub mod config;
pub mod errors;
pub mod name_server;
pub mod query_type;
pub mod static_hosts;

pub use client_subnet::ClientSubnet;
pub use config::{Config, DnsConfig, HostMapping};
pub use errors::DomainError;
pub use name_server::{NameServerEndpoint, DEFAULT_DNS_PORT};
pub use query_type::QueryType;
pub use static_hosts::{normalize_domain, StaticHosts};
