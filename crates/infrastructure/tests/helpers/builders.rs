#![allow(dead_code)]
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_REFUSED: u8 = 5;

pub struct DnsServerBuilder;

impl DnsServerBuilder {
    pub fn primary() -> SocketAddr {
        "192.0.2.1:53".parse().unwrap()
    }

    pub fn secondary() -> SocketAddr {
        "192.0.2.2:53".parse().unwrap()
    }

    pub fn tertiary_v6() -> SocketAddr {
        "[2001:db8::53]:53".parse().unwrap()
    }
}

/// Transaction id of a raw message.
pub fn message_id(message: &[u8]) -> u16 {
    u16::from_be_bytes([message[0], message[1]])
}

/// Byte offset just past the (single) question section.
pub fn question_end(message: &[u8]) -> usize {
    let mut pos = 12;
    while message[pos] != 0 {
        pos += message[pos] as usize + 1;
    }
    pos + 1 + 4
}

/// Decoded (name, qtype) of the single question.
pub fn question_of(message: &[u8]) -> (String, u16) {
    let mut pos = 12;
    let mut labels = Vec::new();
    while message[pos] != 0 {
        let len = message[pos] as usize;
        labels.push(String::from_utf8_lossy(&message[pos + 1..pos + 1 + len]).to_string());
        pos += len + 1;
    }
    let qtype = u16::from_be_bytes([message[pos + 1], message[pos + 2]]);
    (labels.join("."), qtype)
}

/// Everything after the question section (the additional records we append).
pub fn additional_section(message: &[u8]) -> &[u8] {
    &message[question_end(message)..]
}

pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Raw wire-format response, assembled byte by byte.
pub struct ResponseBuilder {
    id: u16,
    rcode: u8,
    qr: bool,
    question: Vec<u8>,
    answers: Vec<Vec<u8>>,
}

impl ResponseBuilder {
    /// Start a response echoing the id and question of `query`.
    pub fn reply_to(query: &[u8]) -> Self {
        Self {
            id: message_id(query),
            rcode: RCODE_NOERROR,
            qr: true,
            question: query[12..question_end(query)].to_vec(),
            answers: vec![],
        }
    }

    /// Start a response with an explicit id and question.
    pub fn new(id: u16, name: &str, qtype: u16) -> Self {
        let mut question = encode_name(name);
        question.extend_from_slice(&qtype.to_be_bytes());
        question.extend_from_slice(&1u16.to_be_bytes());
        Self {
            id,
            rcode: RCODE_NOERROR,
            qr: true,
            question,
            answers: vec![],
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.rcode = rcode;
        self
    }

    /// Clear QR, making the message look like a query.
    pub fn as_query(mut self) -> Self {
        self.qr = false;
        self
    }

    pub fn a(self, owner: &str, ip: &str) -> Self {
        let ip: Ipv4Addr = ip.parse().unwrap();
        self.record(owner, 1, &ip.octets())
    }

    pub fn aaaa(self, owner: &str, ip: &str) -> Self {
        let ip: Ipv6Addr = ip.parse().unwrap();
        self.record(owner, 28, &ip.octets())
    }

    pub fn address(self, owner: &str, ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => self.record(owner, 1, &v4.octets()),
            IpAddr::V6(v6) => self.record(owner, 28, &v6.octets()),
        }
    }

    pub fn cname(self, owner: &str, target: &str) -> Self {
        let rdata = encode_name(target);
        self.record(owner, 5, &rdata)
    }

    pub fn txt(self, owner: &str, text: &str) -> Self {
        let mut rdata = vec![text.len() as u8];
        rdata.extend_from_slice(text.as_bytes());
        self.record(owner, 16, &rdata)
    }

    fn record(mut self, owner: &str, rtype: u16, rdata: &[u8]) -> Self {
        let mut rr = encode_name(owner);
        rr.extend_from_slice(&rtype.to_be_bytes());
        rr.extend_from_slice(&1u16.to_be_bytes());
        rr.extend_from_slice(&60u32.to_be_bytes());
        rr.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        rr.extend_from_slice(rdata);
        self.answers.push(rr);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(512);
        out.extend_from_slice(&self.id.to_be_bytes());
        // RD | RA, plus QR for responses
        out.push(if self.qr { 0x81 } else { 0x01 });
        out.push(0x80 | (self.rcode & 0x0F));
        out.extend_from_slice(&1u16.to_be_bytes());
        out.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        out.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        out.extend_from_slice(&self.question);
        for rr in &self.answers {
            out.extend_from_slice(rr);
        }
        out
    }
}
