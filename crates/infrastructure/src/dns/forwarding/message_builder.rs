//! DNS Message Builder
//!
//! Constructs DNS query messages in wire format using `hickory-proto`, then
//! appends the EDNS(0) Client Subnet option (RFC 7871) directly on the wire
//! when a client subnet is configured.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use proxydns_domain::{normalize_domain, ClientSubnet, DomainError, QueryType};
use std::str::FromStr;

pub const HEADER_LEN: usize = 12;

/// Advertised UDP payload size carried in the OPT record class field.
pub const EDNS_UDP_PAYLOAD: u16 = 4096;

pub const OPT_RECORD_TYPE: u16 = 41;
pub const EDNS_CLIENT_SUBNET_CODE: u16 = 8;

const ARCOUNT_OFFSET: usize = 10;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `domain` and serialize it to wire format.
    ///
    /// The message carries the given transaction id, the RD flag and a single
    /// IN-class question. With a client subnet, one OPT pseudo record holding
    /// the ECS option is added to the additional section.
    pub fn build_query(
        domain: &str,
        id: u16,
        query_type: QueryType,
        client_subnet: Option<&ClientSubnet>,
    ) -> Result<Vec<u8>, DomainError> {
        let name = Self::encode_name(domain)?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(query_type));
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut bytes = Self::serialize_message(&message)?;

        if let Some(subnet) = client_subnet {
            Self::append_client_subnet(&mut bytes, subnet)?;
        }

        Ok(bytes)
    }

    /// The lowercase ASCII form a name takes on the wire.
    ///
    /// Internationalized names come back in punycode, so this is the key the
    /// echoed question and answer owners are compared against.
    pub fn canonical_name(domain: &str) -> Result<String, DomainError> {
        Ok(normalize_domain(&Self::encode_name(domain)?.to_ascii()))
    }

    fn encode_name(domain: &str) -> Result<Name, DomainError> {
        Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })
    }

    /// Append an OPT record carrying the ECS option and bump ARCOUNT.
    ///
    /// The full address is sent: source prefix 32 or 128, scope prefix 0.
    pub fn append_client_subnet(
        message: &mut Vec<u8>,
        subnet: &ClientSubnet,
    ) -> Result<(), DomainError> {
        if message.len() < HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(
                "cannot attach client subnet to a truncated message".to_string(),
            ));
        }

        let arcount = u16::from_be_bytes([message[ARCOUNT_OFFSET], message[ARCOUNT_OFFSET + 1]])
            .checked_add(1)
            .ok_or_else(|| {
                DomainError::InvalidDnsResponse("additional section is full".to_string())
            })?;
        message[ARCOUNT_OFFSET..ARCOUNT_OFFSET + 2].copy_from_slice(&arcount.to_be_bytes());

        let address = subnet.octets();
        // FAMILY(2) + SOURCE PREFIX(1) + SCOPE PREFIX(1) + ADDRESS
        let option_len = 4 + address.len() as u16;
        // OPTION-CODE(2) + OPTION-LENGTH(2) + option data
        let rdata_len = 4 + option_len;

        message.reserve(11 + rdata_len as usize);
        message.push(0x00);
        message.extend_from_slice(&OPT_RECORD_TYPE.to_be_bytes());
        message.extend_from_slice(&EDNS_UDP_PAYLOAD.to_be_bytes());
        message.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        message.extend_from_slice(&rdata_len.to_be_bytes());

        message.extend_from_slice(&EDNS_CLIENT_SUBNET_CODE.to_be_bytes());
        message.extend_from_slice(&option_len.to_be_bytes());
        message.extend_from_slice(&subnet.family().to_be_bytes());
        message.push(subnet.source_prefix());
        message.push(subnet.scope_prefix());
        message.extend_from_slice(&address);

        Ok(())
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
