pub mod backend;
pub mod forwarding;
pub mod server_builder;
pub mod transport;

pub use backend::{create_backend, Backend, LocalBackend, WireBackend};
pub use forwarding::{MessageBuilder, ResponseParser};
pub use server_builder::ResolutionServerBuilder;
pub use transport::UdpDatagramTransport;
