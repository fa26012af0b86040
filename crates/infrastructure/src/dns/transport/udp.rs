//! UDP datagram transport (RFC 1035 §4.2.1)
//!
//! Default stand-in for the host application's dispatcher. Messages are sent
//! as-is (no framing) from an ephemeral socket connected to the server, so
//! the kernel drops datagrams from any other source.

use async_trait::async_trait;
use proxydns_application::ports::{DatagramSession, DatagramTransport};
use proxydns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Opens one connected UDP socket per session
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpDatagramTransport;

impl UdpDatagramTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatagramTransport for UdpDatagramTransport {
    async fn connect(&self, server: SocketAddr) -> Result<Box<dyn DatagramSession>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr = if server.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| failure(server, format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .connect(server)
            .await
            .map_err(|e| failure(server, format!("Failed to connect UDP socket: {}", e)))?;

        debug!(server = %server, "UDP session opened");

        Ok(Box::new(UdpDatagramSession { socket, server }))
    }
}

/// A connected UDP socket talking to a single server
pub struct UdpDatagramSession {
    socket: UdpSocket,
    server: SocketAddr,
}

#[async_trait]
impl DatagramSession for UdpDatagramSession {
    async fn send(&self, payload: &[u8]) -> Result<(), DomainError> {
        let bytes_sent = self.socket.send(payload).await.map_err(|e| {
            failure(self.server, format!("Failed to send UDP query: {}", e))
        })?;

        debug!(server = %self.server, bytes_sent, "UDP query sent");
        Ok(())
    }

    async fn recv(&self) -> Result<Vec<u8>, DomainError> {
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = self.socket.recv(&mut recv_buf).await.map_err(|e| {
            failure(self.server, format!("Failed to receive UDP response: {}", e))
        })?;

        recv_buf.truncate(bytes_received);

        debug!(server = %self.server, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

fn failure(server: SocketAddr, reason: String) -> DomainError {
    DomainError::TransportFailure {
        server: format!("udp://{}", server),
        reason,
    }
}
