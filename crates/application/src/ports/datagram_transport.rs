use async_trait::async_trait;
use proxydns_domain::DomainError;
use std::net::SocketAddr;

/// Datagram capability supplied by the host application.
///
/// A proxy plugs its own outbound dispatcher in here so DNS traffic follows the
/// same routing as everything else it carries.
#[async_trait]
pub trait DatagramTransport: Send + Sync {
    async fn connect(&self, server: SocketAddr) -> Result<Box<dyn DatagramSession>, DomainError>;
}

/// One send/receive conversation with a single server.
#[async_trait]
pub trait DatagramSession: Send + Sync {
    async fn send(&self, payload: &[u8]) -> Result<(), DomainError>;

    /// Waits for the next datagram. Cancel-safe: dropping the future loses
    /// nothing but the datagram in flight.
    async fn recv(&self) -> Result<Vec<u8>, DomainError>;
}
