use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to build static hosts: {0}")]
    HostsConstruction(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Transport failure talking to {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("Upstream {server} answered {rcode}")]
    ServerFailure { server: String, rcode: String },

    #[error("No address resolved for {domain}")]
    ResolutionExhausted {
        domain: String,
        #[source]
        last_error: Option<Box<DomainError>>,
    },
}

impl DomainError {
    /// Soft failures: the next resolver in the chain may still answer.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidDomainName(_)
                | Self::InvalidDnsResponse(_)
                | Self::TransportTimeout { .. }
                | Self::TransportFailure { .. }
                | Self::ServerFailure { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TransportTimeout { .. })
    }

    /// The error of the last resolver tried, for an exhausted lookup.
    pub fn last_error(&self) -> Option<&DomainError> {
        match self {
            Self::ResolutionExhausted { last_error, .. } => last_error.as_deref(),
            _ => None,
        }
    }
}
