use async_trait::async_trait;
use proxydns_application::ports::NameResolver;
use proxydns_domain::DomainError;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Shared record of which resolvers were called, in order.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[derive(Clone)]
pub enum Behavior {
    Answer(Vec<IpAddr>),
    Empty,
    Fail(DomainError),
    /// Never completes; only a deadline gets the caller out.
    Hang,
}

pub struct MockNameResolver {
    name: String,
    behavior: Behavior,
    invocations: AtomicUsize,
    deadlines: Mutex<Vec<Instant>>,
    log: CallLog,
}

impl MockNameResolver {
    pub fn new(name: &str, behavior: Behavior, log: &CallLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            behavior,
            invocations: AtomicUsize::new(0),
            deadlines: Mutex::new(Vec::new()),
            log: log.clone(),
        })
    }

    pub fn answering(name: &str, ips: &[&str], log: &CallLog) -> Arc<Self> {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        Self::new(name, Behavior::Answer(ips), log)
    }

    pub fn failing(name: &str, log: &CallLog) -> Arc<Self> {
        Self::new(
            name,
            Behavior::Fail(DomainError::TransportFailure {
                server: name.to_string(),
                reason: format!("{} is down", name),
            }),
            log,
        )
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    pub fn deadlines(&self) -> Vec<Instant> {
        self.deadlines.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameResolver for MockNameResolver {
    async fn resolve(&self, _domain: &str, deadline: Instant) -> Result<Vec<IpAddr>, DomainError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.deadlines.lock().unwrap().push(deadline);
        self.log.record(&self.name);

        match &self.behavior {
            Behavior::Answer(ips) => Ok(ips.clone()),
            Behavior::Empty => Ok(vec![]),
            Behavior::Fail(e) => Err(e.clone()),
            Behavior::Hang => std::future::pending().await,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
