//! proxydns application layer: ports and the resolution service.
pub mod ports;
pub mod services;
