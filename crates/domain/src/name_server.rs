use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// One entry of the configured fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameServerEndpoint {
    /// The host platform's resolver.
    Local,
    /// A remote server spoken to over datagrams.
    Udp { addr: SocketAddr },
}

impl NameServerEndpoint {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            NameServerEndpoint::Local => None,
            NameServerEndpoint::Udp { addr } => Some(*addr),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, NameServerEndpoint::Local)
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            NameServerEndpoint::Local => "LOCAL",
            NameServerEndpoint::Udp { .. } => "UDP",
        }
    }
}

fn parse_udp_addr(addr_str: &str) -> Option<SocketAddr> {
    if let Ok(addr) = addr_str.parse::<SocketAddr>() {
        return Some(addr);
    }
    let bare = addr_str
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(addr_str);
    bare.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
}

impl FromStr for NameServerEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("localhost") || s.eq_ignore_ascii_case("local") {
            return Ok(NameServerEndpoint::Local);
        }
        if let Some(addr_str) = s.strip_prefix("udp://") {
            let addr = parse_udp_addr(addr_str)
                .ok_or_else(|| format!("Invalid UDP address '{}'", addr_str))?;
            return Ok(NameServerEndpoint::Udp { addr });
        }
        if let Some(addr) = parse_udp_addr(s) {
            return Ok(NameServerEndpoint::Udp { addr });
        }
        Err(format!(
            "Invalid name server '{}'. Expected: localhost, udp://IP:PORT, IP:PORT or IP",
            s
        ))
    }
}

impl fmt::Display for NameServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameServerEndpoint::Local => write!(f, "localhost"),
            NameServerEndpoint::Udp { addr } => write!(f, "udp://{}", addr),
        }
    }
}
