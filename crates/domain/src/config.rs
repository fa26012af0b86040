pub mod dns;
pub mod errors;
pub mod hosts;
pub mod logging;
pub mod root;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use hosts::HostMapping;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
