use super::message_builder::HEADER_LEN;
use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, RecordType as HickoryRecordType};
use proxydns_domain::{normalize_domain, DomainError, QueryType};
use std::net::IpAddr;
use tracing::debug;

const QR_BIT: u8 = 0x80;
const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerData {
    Address(IpAddr),
    Alias(String),
}

/// One answer-section record, owner name normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub owner: String,
    pub data: AnswerData,
}

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub rcode: ResponseCode,

    pub answers: Vec<AnswerRecord>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }

    /// Follow the alias chain starting at `name` and return the addresses of
    /// the final name that `query_type` asks for.
    ///
    /// The chain is at most as long as the answer section, so alias loops end.
    /// A chain that runs out before reaching an address yields nothing.
    pub fn resolve_chain(&self, name: &str, query_type: QueryType) -> Vec<IpAddr> {
        let mut target = normalize_domain(name);
        let mut hops = 0usize;

        loop {
            let addresses: Vec<IpAddr> = self
                .answers
                .iter()
                .filter(|r| r.owner == target)
                .filter_map(|r| match &r.data {
                    AnswerData::Address(ip) if query_type.accepts(ip) => Some(*ip),
                    _ => None,
                })
                .collect();

            if !addresses.is_empty() {
                return addresses;
            }

            let next = self.answers.iter().find_map(|r| match &r.data {
                AnswerData::Alias(alias) if r.owner == target => Some(alias.clone()),
                _ => None,
            });

            match next {
                Some(alias) if hops < self.answers.len() => {
                    debug!(from = %target, to = %alias, "Following CNAME");
                    target = alias;
                    hops += 1;
                }
                _ => return vec![],
            }
        }
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Header-level match: a datagram is a candidate reply only when it is at
    /// least a full header, has QR set and carries our transaction id.
    pub fn is_reply_to(bytes: &[u8], id: u16) -> bool {
        bytes.len() >= HEADER_LEN
            && bytes[2] & QR_BIT != 0
            && u16::from_be_bytes([bytes[0], bytes[1]]) == id
    }

    /// Parse a reply and check that its question echoes the one we asked.
    ///
    /// `qname` is the name as it went out on the wire (see
    /// `MessageBuilder::canonical_name`).
    pub fn parse(
        response_bytes: &[u8],
        qname: &str,
        query_type: QueryType,
    ) -> Result<DnsResponse, DomainError> {
        let (echoed_name, qtype, qclass) = Self::read_question(response_bytes).ok_or_else(|| {
            DomainError::InvalidDnsResponse("response carries no readable question".to_string())
        })?;

        let echoed_type = RecordTypeMapper::from_hickory(HickoryRecordType::from(qtype));
        if echoed_name != normalize_domain(qname)
            || echoed_type != Some(query_type)
            || qclass != CLASS_IN
        {
            return Err(DomainError::InvalidDnsResponse(format!(
                "question mismatch: asked {} {}, got {} type {}",
                qname, query_type, echoed_name, qtype
            )));
        }

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let mut answers = Vec::with_capacity(message.answers().len());

        for record in message.answers() {
            let data = match record.data() {
                RData::A(a) => AnswerData::Address(IpAddr::V4(a.0)),
                RData::AAAA(aaaa) => AnswerData::Address(IpAddr::V6(aaaa.0)),
                RData::CNAME(canonical) => AnswerData::Alias(normalize_domain(&canonical.0.to_ascii())),
                _ => continue,
            };
            answers.push(AnswerRecord {
                owner: normalize_domain(&record.name().to_ascii()),
                data,
            });
        }

        debug!(
            rcode = Self::rcode_to_status(rcode),
            answers = answers.len(),
            "DNS response parsed"
        );

        Ok(DnsResponse { rcode, answers })
    }

    /// Decode the single question of a message: (normalized name, type, class).
    ///
    /// Returns `None` unless QDCOUNT is 1 and the name is plain labels.
    fn read_question(buf: &[u8]) -> Option<(String, u16, u16)> {
        if buf.len() < HEADER_LEN {
            return None;
        }
        if u16::from_be_bytes([buf[4], buf[5]]) != 1 {
            return None;
        }

        let mut pos = HEADER_LEN;
        let mut labels: Vec<String> = Vec::new();

        loop {
            let label_len = *buf.get(pos)? as usize;
            pos += 1;
            if label_len == 0 {
                break;
            }
            if label_len & 0xC0 != 0 {
                return None;
            }
            let label = buf.get(pos..pos + label_len)?;
            labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
            pos += label_len;
        }

        let fixed = buf.get(pos..pos + 4)?;
        let qtype = u16::from_be_bytes([fixed[0], fixed[1]]);
        let qclass = u16::from_be_bytes([fixed[2], fixed[3]]);

        Some((labels.join("."), qtype, qclass))
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
