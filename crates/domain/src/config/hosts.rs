use serde::{Deserialize, Serialize};

/// A `[[dns.static_hosts]]` entry: one domain pinned to one or more addresses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostMapping {
    pub domain: String,

    #[serde(default)]
    pub ips: Vec<String>,
}

impl HostMapping {
    pub fn new(domain: &str, ips: &[&str]) -> Self {
        Self {
            domain: domain.to_string(),
            ips: ips.iter().map(|ip| ip.to_string()).collect(),
        }
    }
}
