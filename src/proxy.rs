//! Shared collaborators handed to probes: configuration-derived knobs,
//! the HTTPS transport, the optional DNSCrypt certificate fetcher, and
//! the registry itself.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::config::{Config, MainProto};
use crate::lb::LbStrategy;
use crate::probe::{CertFetcher, DohClientCreds, DohTransport};
use crate::registry::{RegisteredServer, Registry};
use crate::stamp::{Stamp, StampProto};

/// The host-proxy view the registry subsystem operates on.
pub struct Proxy {
    pub timeout: Duration,
    pub main_proto: MainProto,
    pub skip_anon_incompatible_resolvers: bool,
    pub show_certs: bool,
    /// Names of resolvers known to drop fragmented UDP questions.
    pub servers_blocking_fragments: Vec<String>,
    /// Anonymization routes: server name (or `"*"`) to relay candidates.
    pub routes: HashMap<String, Vec<String>>,
    pub registered_relays: Vec<RegisteredServer>,
    /// TLS client credentials per server name, with `"*"` as wildcard.
    pub doh_creds: HashMap<String, DohClientCreds>,
    pub transport: Arc<dyn DohTransport>,
    /// DNSCrypt certificate fetcher supplied by the host. Without one,
    /// only DoH resolvers can be probed.
    pub cert_fetcher: Option<Arc<dyn CertFetcher>>,
    pub servers: Registry,
}

impl Proxy {
    /// Build a proxy from configuration, registering every configured
    /// resolver and relay. Malformed stamps and malformed DNSCrypt keys
    /// abort startup here.
    pub fn new(
        config: &Config,
        transport: Arc<dyn DohTransport>,
        cert_fetcher: Option<Arc<dyn CertFetcher>>,
    ) -> Result<Self> {
        let servers = Registry::new(LbStrategy::parse(&config.lb_strategy), config.lb_estimator);
        for server in &config.servers {
            let stamp = Stamp::parse(&server.stamp)
                .with_context(|| format!("Invalid stamp for server '{}'", server.name))?;
            servers.register(&server.name, stamp, server.description.clone())?;
        }

        let mut registered_relays = Vec::new();
        for relay in &config.relays {
            let stamp = Stamp::parse(&relay.stamp)
                .with_context(|| format!("Invalid stamp for relay '{}'", relay.name))?;
            registered_relays.push(RegisteredServer {
                name: relay.name.clone(),
                stamp,
                description: relay.description.clone(),
            });
        }

        if cert_fetcher.is_none()
            && servers
                .registered_servers()
                .iter()
                .any(|r| r.stamp.proto() == StampProto::DnsCrypt)
        {
            warn!(
                "No DNSCrypt certificate fetcher is configured; \
                 DNSCrypt resolvers will stay unavailable"
            );
        }

        Ok(Self {
            timeout: config.timeout(),
            main_proto: config.main_proto,
            skip_anon_incompatible_resolvers: config.skip_anon_incompatible_resolvers,
            show_certs: config.show_certs,
            servers_blocking_fragments: config.servers_blocking_fragments.clone(),
            routes: config.route_map(),
            registered_relays,
            doh_creds: config.doh_client_creds.clone(),
            transport,
            cert_fetcher,
            servers,
        })
    }
}


#[cfg(test)]
impl Proxy {
    pub(crate) fn for_tests(servers: Registry) -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            main_proto: MainProto::Udp,
            skip_anon_incompatible_resolvers: false,
            show_certs: false,
            servers_blocking_fragments: Vec::new(),
            routes: HashMap::new(),
            registered_relays: Vec::new(),
            doh_creds: HashMap::new(),
            transport: Arc::new(test_support::NoopTransport),
            cert_fetcher: None,
            servers,
        }
    }
}
