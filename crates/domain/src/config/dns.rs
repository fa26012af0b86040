use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::time::Duration;

use super::errors::ConfigError;
use super::hosts::HostMapping;
use crate::{NameServerEndpoint, QueryType};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Address announced to upstream servers as the EDNS client subnet.
    #[serde(default)]
    pub client_ip: Option<String>,

    /// Fallback chain, tried in order. Empty means "platform resolver only".
    #[serde(default)]
    pub name_servers: Vec<String>,

    /// Per-resolver budget in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default)]
    pub query_type: QueryType,

    #[serde(default)]
    pub hosts: BTreeMap<String, String>,

    #[serde(default)]
    pub static_hosts: Vec<HostMapping>,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            client_ip: None,
            name_servers: vec![],
            query_timeout: default_query_timeout(),
            query_type: QueryType::default(),
            hosts: BTreeMap::new(),
            static_hosts: vec![],
        }
    }
}

impl DnsConfig {
    /// Raw octets of `client_ip`: empty, 4 or 16 bytes.
    pub fn client_ip_octets(&self) -> Result<Vec<u8>, ConfigError> {
        let Some(raw) = self.client_ip.as_deref().map(str::trim) else {
            return Ok(vec![]);
        };
        if raw.is_empty() {
            return Ok(vec![]);
        }
        match raw.parse::<IpAddr>() {
            Ok(IpAddr::V4(v4)) => Ok(v4.octets().to_vec()),
            Ok(IpAddr::V6(v6)) => Ok(v6.octets().to_vec()),
            Err(_) => Err(ConfigError::InvalidClientIp(raw.to_string())),
        }
    }

    pub fn name_server_endpoints(&self) -> Result<Vec<NameServerEndpoint>, ConfigError> {
        self.name_servers
            .iter()
            .map(|s| s.parse().map_err(ConfigError::InvalidNameServer))
            .collect()
    }

    pub fn query_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}

fn default_query_timeout() -> u64 {
    4
}
