use super::inflight::InflightIds;
use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use proxydns_application::ports::{DatagramSession, DatagramTransport, NameResolver};
use proxydns_domain::{ClientSubnet, DomainError, QueryType};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::debug;

/// Asks one remote server over the datagram transport.
///
/// Exactly one query goes out per `resolve`; there is no retransmission.
pub struct WireBackend {
    server: SocketAddr,
    name: String,
    client_subnet: Option<ClientSubnet>,
    query_type: QueryType,
    transport: Arc<dyn DatagramTransport>,
    inflight: InflightIds,
}

impl WireBackend {
    pub fn new(
        server: SocketAddr,
        client_subnet: Option<ClientSubnet>,
        query_type: QueryType,
        transport: Arc<dyn DatagramTransport>,
    ) -> Self {
        Self {
            server,
            name: format!("udp://{}", server),
            client_subnet,
            query_type,
            transport,
            inflight: InflightIds::new(),
        }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    pub fn client_subnet(&self) -> Option<&ClientSubnet> {
        self.client_subnet.as_ref()
    }

    pub fn query_type(&self) -> QueryType {
        self.query_type
    }

    /// Number of queries currently waiting for a reply.
    pub fn inflight(&self) -> usize {
        self.inflight.len()
    }

    async fn exchange(&self, query: &[u8], id: u16) -> Result<Vec<u8>, DomainError> {
        let session = self.transport.connect(self.server).await?;
        session.send(query).await?;
        self.await_reply(session.as_ref(), id).await
    }

    /// Read datagrams until one carries our id.
    async fn await_reply(
        &self,
        session: &dyn DatagramSession,
        id: u16,
    ) -> Result<Vec<u8>, DomainError> {
        loop {
            let datagram = session.recv().await?;
            if ResponseParser::is_reply_to(&datagram, id) {
                return Ok(datagram);
            }
            debug!(
                server = %self.name,
                expected_id = id,
                bytes = datagram.len(),
                "Discarding unsolicited datagram"
            );
        }
    }
}

#[async_trait]
impl NameResolver for WireBackend {
    async fn resolve(&self, domain: &str, deadline: Instant) -> Result<Vec<IpAddr>, DomainError> {
        let lease = self
            .inflight
            .lease()
            .ok_or_else(|| DomainError::TransportFailure {
                server: self.name.clone(),
                reason: "no free transaction id".to_string(),
            })?;

        let qname = MessageBuilder::canonical_name(domain)?;
        let query = MessageBuilder::build_query(
            domain,
            lease.id(),
            self.query_type,
            self.client_subnet.as_ref(),
        )?;

        let reply = match tokio::time::timeout_at(deadline, self.exchange(&query, lease.id())).await
        {
            Ok(reply) => reply?,
            Err(_) => {
                debug!(server = %self.name, domain, "Deadline reached waiting for reply");
                return Err(DomainError::TransportTimeout {
                    server: self.name.clone(),
                });
            }
        };

        let response = ResponseParser::parse(&reply, &qname, self.query_type)?;

        if response.is_nxdomain() {
            debug!(server = %self.name, domain, "NXDOMAIN");
            return Ok(vec![]);
        }

        if !response.is_success() {
            return Err(DomainError::ServerFailure {
                server: self.name.clone(),
                rcode: ResponseParser::rcode_to_status(response.rcode).to_string(),
            });
        }

        let addresses = response.resolve_chain(&qname, self.query_type);
        debug!(
            server = %self.name,
            domain,
            answers = response.answers.len(),
            addresses = addresses.len(),
            "Wire query answered"
        );
        Ok(addresses)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
