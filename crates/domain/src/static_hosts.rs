use crate::config::HostMapping;
use crate::DomainError;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Lowercases and strips the trailing root dot.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Immutable override table consulted before any name server.
///
/// Keys are normalized domains and every entry holds at least one address.
/// Only exact matches are supported.
#[derive(Debug, Clone, Default)]
pub struct StaticHosts {
    entries: FxHashMap<String, Vec<IpAddr>>,
}

impl StaticHosts {
    /// Merges the simple `hosts` table and the `static_hosts` mappings.
    ///
    /// Mappings are applied after the table, so they win on a conflicting key.
    pub fn new(
        hosts: &BTreeMap<String, String>,
        mappings: &[HostMapping],
    ) -> Result<Self, DomainError> {
        let mut entries = FxHashMap::default();

        for (domain, ip) in hosts {
            let key = Self::key_for(domain)?;
            let address = parse_address(domain, ip)?;
            entries.insert(key, vec![address]);
        }

        for mapping in mappings {
            let key = Self::key_for(&mapping.domain)?;
            if mapping.ips.is_empty() {
                return Err(DomainError::HostsConstruction(format!(
                    "host mapping for '{}' has no addresses",
                    mapping.domain
                )));
            }
            let addresses = mapping
                .ips
                .iter()
                .map(|ip| parse_address(&mapping.domain, ip))
                .collect::<Result<Vec<_>, _>>()?;
            entries.insert(key, addresses);
        }

        Ok(Self { entries })
    }

    /// Returns the configured addresses, or an empty slice when the domain is
    /// not in the table.
    pub fn lookup_ip(&self, domain: &str) -> &[IpAddr] {
        self.entries
            .get(&normalize_domain(domain))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key_for(domain: &str) -> Result<String, DomainError> {
        let key = normalize_domain(domain);
        if key.is_empty() {
            return Err(DomainError::HostsConstruction(
                "host entry with an empty domain".to_string(),
            ));
        }
        Ok(key)
    }
}

fn parse_address(domain: &str, ip: &str) -> Result<IpAddr, DomainError> {
    ip.trim().parse::<IpAddr>().map_err(|_| {
        DomainError::HostsConstruction(format!(
            "'{}' for host '{}' is not an IP address",
            ip, domain
        ))
    })
}
