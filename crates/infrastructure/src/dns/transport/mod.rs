pub mod udp;

pub use udp::{UdpDatagramSession, UdpDatagramTransport};
