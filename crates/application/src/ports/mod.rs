mod datagram_transport;
mod dns_client;
mod managed_component;
mod name_resolver;

pub use datagram_transport::{DatagramSession, DatagramTransport};
pub use dns_client::DnsClient;
pub use managed_component::ManagedComponent;
pub use name_resolver::NameResolver;
