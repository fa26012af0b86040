use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// EDNS Client Subnet address family numbers (RFC 7871 §6).
const FAMILY_IPV4: u16 = 1;
const FAMILY_IPV6: u16 = 2;

/// Approximate client network announced to upstream servers.
///
/// Always carries the full address: the source prefix length equals the
/// address width (32 or 128 bits) and the scope prefix is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientSubnet {
    address: IpAddr,
}

impl ClientSubnet {
    pub fn new(address: IpAddr) -> Self {
        Self { address }
    }

    /// Builds a subnet from raw octets.
    ///
    /// An empty slice means "no client subnet"; 4 and 16 bytes map to IPv4 and
    /// IPv6. Any other length is a configuration error.
    pub fn from_octets(octets: &[u8]) -> Result<Option<Self>, DomainError> {
        match octets.len() {
            0 => Ok(None),
            4 => {
                let mut buf = [0u8; 4];
                buf.copy_from_slice(octets);
                Ok(Some(Self::new(IpAddr::V4(Ipv4Addr::from(buf)))))
            }
            16 => {
                let mut buf = [0u8; 16];
                buf.copy_from_slice(octets);
                Ok(Some(Self::new(IpAddr::V6(Ipv6Addr::from(buf)))))
            }
            len => Err(DomainError::ConfigError(format!(
                "unexpected client IP length {} (expected 4 or 16 bytes)",
                len
            ))),
        }
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn family(&self) -> u16 {
        match self.address {
            IpAddr::V4(_) => FAMILY_IPV4,
            IpAddr::V6(_) => FAMILY_IPV6,
        }
    }

    pub fn source_prefix(&self) -> u8 {
        match self.address {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        }
    }

    pub fn scope_prefix(&self) -> u8 {
        0
    }

    pub fn octets(&self) -> Vec<u8> {
        match self.address {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }
}

impl From<IpAddr> for ClientSubnet {
    fn from(address: IpAddr) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for ClientSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.source_prefix())
    }
}
