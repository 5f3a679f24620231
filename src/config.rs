//! Configuration file structures and parsing for the umbra proxy.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::probe::DohClientCreds;

/// Root configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Per-probe and per-query deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Transport used for plain DNSCrypt exchanges ("udp" or "tcp")
    #[serde(default)]
    pub main_proto: MainProto,
    /// Load-balancing strategy: first, random, p2, pN:k, ph, rr, hash, la
    #[serde(default = "default_lb_strategy")]
    pub lb_strategy: String,
    /// Keep re-estimating resolver latencies while serving queries
    #[serde(default = "default_lb_estimator")]
    pub lb_estimator: bool,
    /// How often resolver certificates are re-fetched, in minutes
    #[serde(default = "default_cert_refresh_delay_mins")]
    pub cert_refresh_delay_mins: u64,
    /// Ignore resolvers that cannot be used with anonymization instead of
    /// stripping their relay
    #[serde(default)]
    pub skip_anon_incompatible_resolvers: bool,
    /// Log the certificates advertised by DoH servers at notice level
    #[serde(default)]
    pub show_certs: bool,
    /// Names of resolvers known to drop fragmented queries over UDP
    #[serde(default)]
    pub servers_blocking_fragments: Vec<String>,
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
    #[serde(default)]
    pub relays: Vec<ServerEntry>,
    #[serde(default)]
    pub anonymized_dns: AnonymizedDns,
    /// TLS client credentials per server name; `"*"` applies to all
    #[serde(default)]
    pub doh_client_creds: HashMap<String, DohClientCreds>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_lb_strategy() -> String {
    "p2".to_string()
}

fn default_lb_estimator() -> bool {
    true
}

fn default_cert_refresh_delay_mins() -> u64 {
    240
}

/// Transport for plain DNSCrypt exchanges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainProto {
    #[default]
    Udp,
    Tcp,
}

impl std::fmt::Display for MainProto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Udp => write!(f, "udp"),
            Self::Tcp => write!(f, "tcp"),
        }
    }
}

/// One statically configured resolver or relay
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEntry {
    pub name: String,
    /// `sdns://` stamp describing the endpoint
    pub stamp: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Anonymized DNS routing table
#[derive(Debug, Default, Deserialize)]
pub struct AnonymizedDns {
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// Routes queries for one server (or `"*"`) through one of the listed
/// relays, picked at random
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub server_name: String,
    pub via: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be greater than zero");
        }

        // Routes must reference configured servers (or the wildcard)
        for route in &self.anonymized_dns.routes {
            if route.server_name != "*"
                && !self.servers.iter().any(|s| s.name == route.server_name)
            {
                anyhow::bail!(
                    "Route references unknown server '{}'. Available: {:?}",
                    route.server_name,
                    self.servers.iter().map(|s| &s.name).collect::<Vec<_>>()
                );
            }
        }

        // A credentials entry missing half of the key pair is a
        // configuration mistake, not something to discover at probe time
        for (name, creds) in &self.doh_client_creds {
            if creds.client_cert.is_empty() || creds.client_key.is_empty() {
                anyhow::bail!(
                    "doh_client_creds entry '{}' must set both client_cert and client_key",
                    name
                );
            }
        }

        Ok(())
    }

    /// Per-probe and per-query deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The anonymization routes as a name -> relay-list map
    pub fn route_map(&self) -> HashMap<String, Vec<String>> {
        self.anonymized_dns
            .routes
            .iter()
            .map(|r| (r.server_name.clone(), r.via.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
log_level = "debug"
timeout_ms = 2500
main_proto = "tcp"
lb_strategy = "ph"
lb_estimator = false
skip_anon_incompatible_resolvers = true
servers_blocking_fragments = ["example-dnscrypt"]

[[servers]]
name = "cloudflare"
stamp = "sdns://AgcAAAAAAAAABzEuMC4wLjEAEmRucy5jbG91ZGZsYXJlLmNvbQovZG5zLXF1ZXJ5"
description = "Cloudflare DoH"

[[servers]]
name = "example-dnscrypt"
stamp = "sdns://AQUAAAAAAAAADjEyNy4wLjAuMTo4NDQzIAABAgMEBQYHCAkKCwwNDg8QERITFBUWFxgZGhscHR4fFzIuZG5zY3J5cHQtY2VydC5leGFtcGxl"

[[relays]]
name = "anon-relay"
stamp = "sdns://gQs5LjkuOS45OjQ0Mw"

[[anonymized_dns.routes]]
server_name = "example-dnscrypt"
via = ["anon-relay"]

[doh_client_creds."*"]
client_cert = "/etc/umbra/client.crt"
client_key = "/etc/umbra/client.key"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.main_proto, MainProto::Tcp);
        assert_eq!(config.lb_strategy, "ph");
        assert!(!config.lb_estimator);
        assert!(config.skip_anon_incompatible_resolvers);
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.relays.len(), 1);

        let routes = config.route_map();
        assert_eq!(
            routes.get("example-dnscrypt"),
            Some(&vec!["anon-relay".to_string()])
        );
        assert!(config.doh_client_creds.contains_key("*"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.main_proto, MainProto::Udp);
        assert_eq!(config.lb_strategy, "p2");
        assert!(config.lb_estimator);
        assert_eq!(config.cert_refresh_delay_mins, 240);
        assert!(!config.skip_anon_incompatible_resolvers);
        assert!(config.servers.is_empty());
    }

    #[test]
    fn test_invalid_route_reference() {
        let toml = r#"
[[servers]]
name = "cloudflare"
stamp = "sdns://AgcAAAAAAAAABzEuMC4wLjEAEmRucy5jbG91ZGZsYXJlLmNvbQovZG5zLXF1ZXJ5"

[[anonymized_dns.routes]]
server_name = "nonexistent"
via = ["anon-relay"]
"#;

        let result = Config::parse(toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("nonexistent"));
    }

    #[test]
    fn test_wildcard_route_is_accepted() {
        let toml = r#"
[[servers]]
name = "cloudflare"
stamp = "sdns://AgcAAAAAAAAABzEuMC4wLjEAEmRucy5jbG91ZGZsYXJlLmNvbQovZG5zLXF1ZXJ5"

[[anonymized_dns.routes]]
server_name = "*"
via = ["anon-relay"]
"#;

        assert!(Config::parse(toml).is_ok());
    }

    #[test]
    fn test_incomplete_creds_rejected() {
        let toml = r#"
[doh_client_creds.myserver]
client_cert = "/etc/umbra/client.crt"
client_key = ""
"#;

        let result = Config::parse(toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("myserver"));
    }
}
