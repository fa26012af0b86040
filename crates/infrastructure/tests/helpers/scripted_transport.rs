#![allow(dead_code)]
use async_trait::async_trait;
use proxydns_application::ports::{DatagramSession, DatagramTransport};
use proxydns_domain::DomainError;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Computes the datagrams a server sends back for one query.
pub type Responder = Arc<dyn Fn(SocketAddr, &[u8]) -> Vec<Vec<u8>> + Send + Sync>;

/// In-memory transport: every sent query is recorded and answered by a
/// responder closure. A session with nothing queued waits forever.
pub struct ScriptedTransport {
    responder: Responder,
    sent: Arc<Mutex<Vec<(SocketAddr, Vec<u8>)>>>,
    sessions: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(SocketAddr, &[u8]) -> Vec<Vec<u8>> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Arc::new(responder),
            sent: Arc::new(Mutex::new(Vec::new())),
            sessions: AtomicUsize::new(0),
        })
    }

    /// Replies to every query with exactly one datagram.
    pub fn replying<F>(reply: F) -> Arc<Self>
    where
        F: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        Self::new(move |_, query| vec![reply(query)])
    }

    /// Never answers anything.
    pub fn silent() -> Arc<Self> {
        Self::new(|_, _| vec![])
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, q)| q.clone())
            .collect()
    }

    pub fn sent_to(&self) -> Vec<SocketAddr> {
        self.sent.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }

    pub fn sessions(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatagramTransport for ScriptedTransport {
    async fn connect(&self, server: SocketAddr) -> Result<Box<dyn DatagramSession>, DomainError> {
        self.sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            server,
            responder: Arc::clone(&self.responder),
            sent: Arc::clone(&self.sent),
            queued: Mutex::new(VecDeque::new()),
        }))
    }
}

struct ScriptedSession {
    server: SocketAddr,
    responder: Responder,
    sent: Arc<Mutex<Vec<(SocketAddr, Vec<u8>)>>>,
    queued: Mutex<VecDeque<Vec<u8>>>,
}

#[async_trait]
impl DatagramSession for ScriptedSession {
    async fn send(&self, payload: &[u8]) -> Result<(), DomainError> {
        self.sent
            .lock()
            .unwrap()
            .push((self.server, payload.to_vec()));
        let replies = (self.responder)(self.server, payload);
        self.queued.lock().unwrap().extend(replies);
        Ok(())
    }

    async fn recv(&self) -> Result<Vec<u8>, DomainError> {
        let next = self.queued.lock().unwrap().pop_front();
        match next {
            Some(datagram) => Ok(datagram),
            None => std::future::pending().await,
        }
    }
}

/// Transport whose connect always fails.
pub struct BrokenTransport;

#[async_trait]
impl DatagramTransport for BrokenTransport {
    async fn connect(&self, server: SocketAddr) -> Result<Box<dyn DatagramSession>, DomainError> {
        Err(DomainError::TransportFailure {
            server: format!("udp://{}", server),
            reason: "network unreachable".to_string(),
        })
    }
}
