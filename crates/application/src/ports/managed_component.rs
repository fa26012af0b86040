use proxydns_domain::DomainError;

/// Start/stop hooks shared by every component the host application manages.
pub trait ManagedComponent: Send + Sync {
    fn start(&self) -> Result<(), DomainError>;

    fn close(&self) -> Result<(), DomainError>;
}
