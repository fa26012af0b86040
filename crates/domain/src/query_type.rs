use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Address record type asked of wire-protocol name servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum QueryType {
    #[default]
    A,
    AAAA,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::A => "A",
            QueryType::AAAA => "AAAA",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            QueryType::A => 1,
            QueryType::AAAA => 28,
        }
    }

    /// Whether `ip` is the kind of address this record type carries.
    pub fn accepts(&self, ip: &IpAddr) -> bool {
        match self {
            QueryType::A => ip.is_ipv4(),
            QueryType::AAAA => ip.is_ipv6(),
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(QueryType::A),
            "AAAA" => Ok(QueryType::AAAA),
            _ => Err(format!("Unsupported query type: {}", s)),
        }
    }
}
