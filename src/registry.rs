//! The resolver registry: the one stateful component.
//!
//! Holds the set of registered resolvers and the live (successfully
//! probed) subset, keeps per-resolver latency estimates current, and
//! picks one live resolver per client query. A single reader-writer lock
//! guards all of it; every critical section is O(n) at worst with n in
//! the tens, so selection latency stays bounded.

use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::denylist;
use crate::ewma::MovingAverage;
use crate::lb::{self, LbStrategy, MAX_LOCATION_AVOIDANT_ATTEMPTS};
use crate::probe::{self, CryptoConstruction, DohClientCreds, ProbeError};
use crate::proxy::Proxy;
use crate::stamp::{Stamp, StampProto};

/// A resolver that has been idle this long is eligible for the
/// rehabilitation step of the estimator.
const ESTIMATOR_IDLE_AFTER: Duration = Duration::from_secs(60);

/// A resolver as named in the configuration, probed or not.
#[derive(Debug, Clone)]
pub struct RegisteredServer {
    pub name: String,
    pub stamp: Stamp,
    pub description: Option<String>,
}

/// Known server-side bugs that change how a resolver can be used.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerBugs {
    /// Fragmented questions over UDP are dropped. Sticky once observed.
    pub fragments_blocked: bool,
}

/// A live resolver, created by a successful probe.
///
/// Everything except the latency statistics is immutable; the statistics
/// are only touched while the registry lock is held.
#[derive(Debug)]
pub struct ServerInfo {
    pub proto: StampProto,
    pub name: String,
    pub timeout: Duration,
    pub magic_query: [u8; 8],
    pub server_pk: [u8; 32],
    pub shared_key: [u8; 32],
    pub crypto_construction: CryptoConstruction,
    pub udp_addr: Option<SocketAddr>,
    pub tcp_addr: Option<SocketAddr>,
    pub relay_udp_addr: Option<SocketAddr>,
    pub relay_tcp_addr: Option<SocketAddr>,
    pub url: Option<Url>,
    pub host_name: String,
    pub use_get: bool,
    pub known_bugs: ServerBugs,
    pub doh_client_creds: Option<DohClientCreds>,
    /// Wall-clock RTT in milliseconds observed by the probe.
    pub initial_rtt: u64,
    pub(crate) stats: Mutex<ServerStats>,
}

#[derive(Debug)]
pub(crate) struct ServerStats {
    pub rtt: MovingAverage,
    pub last_action: Option<Instant>,
}

impl ServerInfo {
    /// Statistics block for a freshly probed server, seeded from the
    /// probe's measurement.
    pub(crate) fn seeded_stats(initial_rtt: u64) -> Mutex<ServerStats> {
        let mut rtt = MovingAverage::default();
        rtt.set(initial_rtt as f64);
        Mutex::new(ServerStats {
            rtt,
            last_action: None,
        })
    }

    /// Current RTT estimate in milliseconds.
    pub fn rtt(&self) -> f64 {
        self.stats.lock().rtt.value()
    }
}

struct Inner {
    registered: Vec<RegisteredServer>,
    live: Vec<Arc<ServerInfo>>,
    prev_candidate: usize,
    rng: StdRng,
}

/// Registry of upstream resolvers and dispatcher of per-query picks.
pub struct Registry {
    strategy: LbStrategy,
    estimator: bool,
    inner: RwLock<Inner>,
}

impl Registry {
    pub fn new(strategy: LbStrategy, estimator: bool) -> Self {
        Self::with_rng(strategy, estimator, StdRng::from_entropy())
    }

    /// Construction with a caller-provided generator, so tests can pin
    /// the random sequence.
    pub fn with_rng(strategy: LbStrategy, estimator: bool, rng: StdRng) -> Self {
        Self {
            strategy,
            estimator,
            inner: RwLock::new(Inner {
                registered: Vec::new(),
                live: Vec::new(),
                prev_candidate: 0,
                rng,
            }),
        }
    }

    /// Add or replace a resolver. Does not probe; the entry only becomes
    /// selectable after the next [`Registry::refresh`].
    ///
    /// A DNSCrypt public key in the legacy hex-with-colons form is
    /// normalized here once; a key that is neither 32 raw bytes nor valid
    /// hex is a configuration error.
    pub fn register(&self, name: &str, stamp: Stamp, description: Option<String>) -> Result<()> {
        let stamp = canonicalize_stamp(name, stamp)?;
        let mut inner = self.inner.write();
        match inner.registered.iter_mut().find(|r| r.name == name) {
            Some(existing) => {
                existing.stamp = stamp;
                existing.description = description;
            }
            None => inner.registered.push(RegisteredServer {
                name: name.to_string(),
                stamp,
                description,
            }),
        }
        Ok(())
    }

    /// Snapshot of the registered set, in registration order.
    pub fn registered_servers(&self) -> Vec<RegisteredServer> {
        self.inner.read().registered.clone()
    }

    pub fn find_registered(&self, name: &str) -> Option<RegisteredServer> {
        self.inner
            .read()
            .registered
            .iter()
            .find(|r| r.name == name)
            .cloned()
    }

    pub fn live_count(&self) -> usize {
        self.inner.read().live.len()
    }

    /// Draw a uniform index below `n` from the registry's generator.
    pub(crate) fn rand_below(&self, n: usize) -> usize {
        self.inner.write().rng.gen_range(0..n)
    }

    /// Re-probe every registered resolver and rebuild the live set.
    ///
    /// Probes run without the lock, one resolver at a time; a failing
    /// resolver is skipped for this pass and its previous live entry (if
    /// any) stays usable. Returns the number of live probes and the last
    /// error observed.
    pub async fn refresh(&self, proxy: &Proxy) -> (usize, Option<ProbeError>) {
        debug!("Refreshing certificates");
        let registered = self.inner.read().registered.clone();
        let mut live_servers = 0;
        let mut last_err = None;
        for server in registered {
            match self.refresh_server(proxy, &server.name, &server.stamp).await {
                Ok(()) => live_servers += 1,
                Err(err) => {
                    warn!("[{}] {}", server.name, err);
                    last_err = Some(err);
                }
            }
        }
        let mut inner = self.inner.write();
        // Sort by name rather than by RTT so that the mapping from domain
        // names to resolvers survives certificate refreshes.
        inner.live.sort_by(|a, b| a.name.cmp(&b.name));
        for server in &inner.live {
            server.stats.lock().rtt.set(server.initial_rtt as f64);
        }
        if inner.live.len() > 1 {
            info!("Sorted latencies:");
            for server in &inner.live {
                info!("- {:5}ms {}", server.initial_rtt, server.name);
            }
        }
        if let Some(fastest) = inner.live.iter().min_by_key(|s| s.initial_rtt) {
            info!(
                "Server with the lowest initial latency: {} (rtt: {}ms)",
                fastest.name, fastest.initial_rtt
            );
        }
        (live_servers, last_err)
    }

    async fn refresh_server(
        &self,
        proxy: &Proxy,
        name: &str,
        stamp: &Stamp,
    ) -> Result<(), ProbeError> {
        let is_new = !self.inner.read().live.iter().any(|s| s.name == name);
        let server = Arc::new(probe::fetch_server_info(proxy, name, stamp, is_new).await?);
        let mut inner = self.inner.write();
        match inner.live.iter().position(|s| s.name == name) {
            Some(i) => inner.live[i] = server,
            None => {
                inner.live.push(server);
                if !inner.registered.iter().any(|r| r.name == name) {
                    inner.registered.push(RegisteredServer {
                        name: name.to_string(),
                        stamp: stamp.clone(),
                        description: None,
                    });
                }
            }
        }
        Ok(())
    }

    /// Pick one live resolver for a query on `qname`.
    ///
    /// Returns `None` when no resolver is live, or when the hash strategy
    /// cannot extract a second-level domain from the name.
    pub fn select(&self, qname: &str) -> Option<Arc<ServerInfo>> {
        let mut inner = self.inner.write();
        let servers_count = inner.live.len();
        if servers_count == 0 {
            return None;
        }
        if self.estimator {
            Self::estimator_update(&mut inner);
        }
        let candidate = match self.strategy {
            LbStrategy::RoundRobin => (inner.prev_candidate + 1) % servers_count,
            LbStrategy::Hash => {
                let sld = match lb::parse_sld(qname) {
                    Some(sld) => sld,
                    None => {
                        debug!(
                            "Couldn't parse second-level domain for {}: not enough labels",
                            qname
                        );
                        return None;
                    }
                };
                lb::fnv1a_32(sld.as_bytes()) as usize % servers_count
            }
            LbStrategy::LocationAvoidant => Self::avoid_denylisted(&mut inner, servers_count),
            strategy => strategy.get_candidate(&mut inner.rng, servers_count),
        };
        inner.prev_candidate = candidate;
        let server = inner.live[candidate].clone();
        trace!(
            "Using candidate [{}] RTT: {}ms",
            server.name,
            server.rtt() as i64
        );
        Some(server)
    }

    /// Power-of-two draw, re-drawn while the pick sits on a denylisted
    /// address. Attempts are capped; on exhaustion the last sampled
    /// candidate is used as-is.
    fn avoid_denylisted(inner: &mut Inner, servers_count: usize) -> usize {
        let mut candidate = LbStrategy::P2.get_candidate(&mut inner.rng, servers_count);
        for _ in 0..MAX_LOCATION_AVOIDANT_ATTEMPTS {
            let denied = inner.live[candidate]
                .tcp_addr
                .and_then(|addr| denylist::lookup(addr.ip()));
            let entry = match denied {
                None => break,
                Some(entry) => entry,
            };
            debug!(
                "Avoiding [{}] hosted at {} ({}, {})",
                inner.live[candidate].name, entry.ip, entry.location, entry.asn
            );
            candidate = LbStrategy::P2.get_candidate(&mut inner.rng, servers_count);
        }
        candidate
    }

    /// One online reordering step, run on every selection.
    fn estimator_update(inner: &mut Inner) {
        let servers_count = inner.live.len();
        let candidate = inner.rng.gen_range(0..servers_count);
        Self::estimator_apply(inner, candidate);
    }

    /// Body of the estimator step for a given candidate index.
    fn estimator_apply(inner: &mut Inner, candidate: usize) {
        if candidate == 0 {
            return;
        }
        let candidate_rtt = inner.live[candidate].stats.lock().rtt.value();
        let mut current_best_rtt = inner.live[0].stats.lock().rtt.value();
        if current_best_rtt < 0.0 {
            current_best_rtt = candidate_rtt;
            inner.live[0].stats.lock().rtt.set(current_best_rtt);
        }
        let mut partial_sort = false;
        if candidate_rtt < current_best_rtt {
            inner.live.swap(0, candidate);
            partial_sort = true;
            debug!(
                "New preferred candidate: {} (rtt: {}ms vs previous: {}ms)",
                inner.live[0].name, candidate_rtt as i64, current_best_rtt as i64
            );
        } else if candidate_rtt > 0.0 && candidate_rtt >= current_best_rtt * 4.0 {
            let mut stats = inner.live[candidate].stats.lock();
            let idle = stats
                .last_action
                .map_or(true, |t| t.elapsed() > ESTIMATOR_IDLE_AFTER);
            if idle {
                let new_rtt = (candidate_rtt / 2.0)
                    .max(current_best_rtt * 2.0)
                    .min(candidate_rtt);
                stats.rtt.set(new_rtt);
                debug!(
                    "Giving a new chance to candidate [{}], lowering its RTT from {} to {} (best: {})",
                    inner.live[candidate].name,
                    candidate_rtt as i64,
                    new_rtt as i64,
                    current_best_rtt as i64
                );
                partial_sort = true;
            }
        }
        if partial_sort {
            // one adjacent-swap pass, not a full sort; the head is already
            // the minimum and selection latency stays O(n)
            for i in 1..inner.live.len() {
                let prev = inner.live[i - 1].stats.lock().rtt.value();
                let cur = inner.live[i].stats.lock().rtt.value();
                if prev > cur {
                    inner.live.swap(i - 1, i);
                }
            }
        }
    }

    /// A query is about to be sent to `server`.
    pub fn notice_begin(&self, server: &ServerInfo) {
        let _registry = self.inner.write();
        server.stats.lock().last_action = Some(Instant::now());
    }

    /// The query sent after the matching [`Registry::notice_begin`] was
    /// answered; fold the observed latency into the estimate.
    pub fn notice_success(&self, server: &ServerInfo) {
        let now = Instant::now();
        let _registry = self.inner.write();
        let mut stats = server.stats.lock();
        if let Some(started) = stats.last_action {
            let elapsed = now.duration_since(started);
            let elapsed_ms = elapsed.as_millis() as u64;
            if elapsed_ms > 0 && elapsed < server.timeout {
                stats.rtt.add(elapsed_ms as f64);
            }
        }
    }

    /// The query failed or timed out; penalize the estimate by a full
    /// timeout so other resolvers become preferable.
    pub fn notice_failure(&self, server: &ServerInfo) {
        let _registry = self.inner.write();
        server
            .stats
            .lock()
            .rtt
            .add(server.timeout.as_millis() as f64);
    }
}

fn canonicalize_stamp(name: &str, stamp: Stamp) -> Result<Stamp> {
    match stamp {
        Stamp::DnsCrypt {
            props,
            addr,
            server_pk,
            provider_name,
        } if server_pk.len() != 32 => {
            let text = String::from_utf8_lossy(&server_pk).into_owned();
            let decoded = hex::decode(text.replace(':', ""))
                .ok()
                .filter(|pk| pk.len() == 32)
                .with_context(|| format!("Unsupported public key for [{}]: [{}]", name, text))?;
            warn!("Public key [{}] shouldn't be hex-encoded any more", text);
            Ok(Stamp::DnsCrypt {
                props,
                addr,
                server_pk: decoded,
                provider_name,
            })
        }
        stamp => Ok(stamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{
        CertFetchOutcome, CertFetchQuery, CertFetcher, CertInfo, DohResponse, DohTransport,
        TlsInfo,
    };
    use crate::proxy::Proxy;
    use async_trait::async_trait;
    use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
    use hickory_proto::rr::{Name, RecordType};
    use sha2::{Digest, Sha256};
    use std::collections::HashMap;
    use std::net::IpAddr;

    fn dnscrypt_stamp(pk: Vec<u8>) -> Stamp {
        Stamp::DnsCrypt {
            props: Default::default(),
            addr: "127.0.0.1:8443".to_string(),
            server_pk: pk,
            provider_name: "2.dnscrypt-cert.example".to_string(),
        }
    }

    fn live_entry(name: &str, rtt_ms: u64, tcp_ip: Option<&str>) -> Arc<ServerInfo> {
        Arc::new(ServerInfo {
            proto: StampProto::DnsCrypt,
            name: name.to_string(),
            timeout: Duration::from_millis(5000),
            magic_query: [0; 8],
            server_pk: [0; 32],
            shared_key: [0; 32],
            crypto_construction: CryptoConstruction::Undefined,
            udp_addr: None,
            tcp_addr: tcp_ip.map(|ip| SocketAddr::new(ip.parse::<IpAddr>().unwrap(), 443)),
            relay_udp_addr: None,
            relay_tcp_addr: None,
            url: None,
            host_name: String::new(),
            use_get: false,
            known_bugs: ServerBugs::default(),
            doh_client_creds: None,
            initial_rtt: rtt_ms,
            stats: ServerInfo::seeded_stats(rtt_ms),
        })
    }

    fn seeded_registry(strategy: LbStrategy, estimator: bool) -> Registry {
        Registry::with_rng(strategy, estimator, StdRng::seed_from_u64(0x5eed))
    }

    fn populate(registry: &Registry, entries: Vec<Arc<ServerInfo>>) {
        registry.inner.write().live = entries;
    }

    struct FakeCertFetcher {
        rtts: HashMap<String, u64>,
        fragments_blocked: bool,
    }

    #[async_trait]
    impl CertFetcher for FakeCertFetcher {
        async fn fetch(&self, query: CertFetchQuery<'_>) -> anyhow::Result<CertFetchOutcome> {
            let rtt_ms = *self
                .rtts
                .get(query.name)
                .ok_or_else(|| anyhow::anyhow!("unknown server"))?;
            Ok(CertFetchOutcome {
                cert: CertInfo::default(),
                rtt_ms,
                fragments_blocked: self.fragments_blocked,
            })
        }
    }

    /// DoH server double: rejects POST, answers GET with a canned
    /// NXDomain response and a fixed certificate chain.
    struct GetOnlyTransport {
        response: Vec<u8>,
        tbs: Vec<u8>,
    }

    #[async_trait]
    impl DohTransport for GetOnlyTransport {
        async fn doh_query(
            &self,
            use_get: bool,
            _url: &url::Url,
            _body: &[u8],
            _timeout: Duration,
        ) -> anyhow::Result<DohResponse> {
            if !use_get {
                anyhow::bail!("POST rejected");
            }
            Ok(DohResponse {
                body: self.response.clone(),
                tls: Some(TlsInfo {
                    handshake_complete: true,
                    negotiated_protocol: "h2".to_string(),
                    peer_certificates: vec![self.tbs.clone()],
                }),
                rtt: Duration::from_millis(42),
            })
        }

        fn save_cached_ip(&self, _host: &str, _ip: IpAddr, _ttl: Option<Duration>) {}
        fn set_client_creds(&self, _creds: Option<DohClientCreds>) {}
        fn rebuild_transport(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn nx_response_bytes() -> Vec<u8> {
        let mut msg = Message::new();
        msg.set_id(0xcafe);
        msg.set_message_type(MessageType::Response);
        msg.set_op_code(OpCode::Query);
        msg.set_response_code(ResponseCode::NXDomain);
        msg.add_query(Query::query(
            Name::from_ascii("nxnxnxnxnxnxnxnx.test.dnscrypt.").unwrap(),
            RecordType::NS,
        ));
        msg.to_vec().unwrap()
    }

    #[test]
    fn register_is_last_write_wins() {
        let registry = seeded_registry(LbStrategy::P2, true);
        registry
            .register("a", dnscrypt_stamp(vec![1; 32]), None)
            .unwrap();
        registry
            .register("b", dnscrypt_stamp(vec![2; 32]), None)
            .unwrap();
        registry
            .register("a", dnscrypt_stamp(vec![3; 32]), Some("updated".into()))
            .unwrap();

        let registered = registry.registered_servers();
        assert_eq!(registered.len(), 2);
        assert_eq!(registered[0].name, "a");
        assert_eq!(registered[1].name, "b");
        match &registered[0].stamp {
            Stamp::DnsCrypt { server_pk, .. } => assert_eq!(server_pk, &vec![3u8; 32]),
            other => panic!("wrong stamp: {other:?}"),
        }
        assert_eq!(registered[0].description.as_deref(), Some("updated"));
    }

    #[test]
    fn hex_encoded_keys_are_normalized_at_registration() {
        let registry = seeded_registry(LbStrategy::P2, true);
        let hex_key: String = (0u8..32)
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(":");
        registry
            .register("legacy", dnscrypt_stamp(hex_key.into_bytes()), None)
            .unwrap();
        match registry.find_registered("legacy").unwrap().stamp {
            Stamp::DnsCrypt { server_pk, .. } => {
                assert_eq!(server_pk, (0u8..32).collect::<Vec<u8>>());
            }
            other => panic!("wrong stamp: {other:?}"),
        }
    }

    #[test]
    fn malformed_keys_are_fatal_at_registration() {
        let registry = seeded_registry(LbStrategy::P2, true);
        let err = registry
            .register("broken", dnscrypt_stamp(b"ZZ:not-hex".to_vec()), None)
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[tokio::test]
    async fn refresh_sorts_by_name_and_seeds_estimates() {
        let registry = seeded_registry(LbStrategy::First, false);
        for name in ["c", "a", "b"] {
            registry
                .register(name, dnscrypt_stamp(vec![1; 32]), None)
                .unwrap();
        }
        let mut proxy = Proxy::for_tests(registry);
        proxy.cert_fetcher = Some(Arc::new(FakeCertFetcher {
            rtts: HashMap::from([
                ("a".to_string(), 30),
                ("b".to_string(), 10),
                ("c".to_string(), 20),
            ]),
            fragments_blocked: false,
        }));

        let (live, err) = proxy.servers.refresh(&proxy).await;
        assert_eq!(live, 3);
        assert!(err.is_none());

        let inner = proxy.servers.inner.read();
        let names: Vec<&str> = inner.live.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        let rtts: Vec<f64> = inner.live.iter().map(|s| s.rtt()).collect();
        assert_eq!(rtts, [30.0, 10.0, 20.0]);
        drop(inner);

        // the `first` strategy returns the head of the sorted set
        assert_eq!(proxy.servers.select("example.com.").unwrap().name, "a");

        // a single estimator step hitting the faster candidate promotes it
        Registry::estimator_apply(&mut proxy.servers.inner.write(), 1);
        assert_eq!(proxy.servers.inner.read().live[0].name, "b");
    }

    #[tokio::test]
    async fn failed_probes_keep_previous_entries_alive() {
        let registry = seeded_registry(LbStrategy::First, false);
        registry
            .register("a", dnscrypt_stamp(vec![1; 32]), None)
            .unwrap();
        registry
            .register("ghost", dnscrypt_stamp(vec![2; 32]), None)
            .unwrap();
        let mut proxy = Proxy::for_tests(registry);
        proxy.cert_fetcher = Some(Arc::new(FakeCertFetcher {
            rtts: HashMap::from([("a".to_string(), 15)]),
            fragments_blocked: false,
        }));

        let (live, err) = proxy.servers.refresh(&proxy).await;
        assert_eq!(live, 1);
        assert!(matches!(err, Some(ProbeError::CertFetch { .. })));
        assert_eq!(proxy.servers.live_count(), 1);

        // the previously live entry survives the next failing pass
        proxy.cert_fetcher = Some(Arc::new(FakeCertFetcher {
            rtts: HashMap::new(),
            fragments_blocked: false,
        }));
        let (live, err) = proxy.servers.refresh(&proxy).await;
        assert_eq!(live, 0);
        assert!(err.is_some());
        assert_eq!(proxy.servers.live_count(), 1);
    }

    #[tokio::test]
    async fn anon_incompatible_resolvers_are_dropped_when_asked_to() {
        let registry = seeded_registry(LbStrategy::First, false);
        registry
            .register("frag", dnscrypt_stamp(vec![1; 32]), None)
            .unwrap();
        let mut proxy = Proxy::for_tests(registry);
        proxy.skip_anon_incompatible_resolvers = true;
        proxy.routes = HashMap::from([("frag".to_string(), vec!["198.51.100.7:443".to_string()])]);
        proxy.cert_fetcher = Some(Arc::new(FakeCertFetcher {
            rtts: HashMap::from([("frag".to_string(), 12)]),
            fragments_blocked: true,
        }));

        let (live, err) = proxy.servers.refresh(&proxy).await;
        assert_eq!(live, 0);
        assert!(matches!(err, Some(ProbeError::AnonIncompatible(_))));
        assert_eq!(proxy.servers.live_count(), 0);
    }

    #[tokio::test]
    async fn doh_probe_falls_back_to_get_and_pins_certificates() {
        let tbs = b"fake tbs certificate".to_vec();
        let digest: [u8; 32] = Sha256::digest(&tbs).into();

        let registry = seeded_registry(LbStrategy::First, false);
        registry
            .register(
                "doh",
                Stamp::Doh {
                    props: Default::default(),
                    addr: "192.0.2.1".to_string(),
                    hashes: vec![digest],
                    provider_name: "doh.example.com".to_string(),
                    path: "/dns-query".to_string(),
                },
                None,
            )
            .unwrap();
        let mut proxy = Proxy::for_tests(registry);
        proxy.transport = Arc::new(GetOnlyTransport {
            response: nx_response_bytes(),
            tbs,
        });

        let (live, err) = proxy.servers.refresh(&proxy).await;
        assert_eq!(live, 1);
        assert!(err.is_none(), "unexpected error: {err:?}");

        let server = proxy.servers.select("example.com.").unwrap();
        assert!(server.use_get);
        assert_eq!(server.initial_rtt, 42);
        assert!(!server.known_bugs.fragments_blocked);
        assert_eq!(server.host_name, "doh.example.com");
    }

    #[tokio::test]
    async fn doh_probe_rejects_unpinned_certificates() {
        let registry = seeded_registry(LbStrategy::First, false);
        registry
            .register(
                "doh",
                Stamp::Doh {
                    props: Default::default(),
                    addr: String::new(),
                    hashes: vec![[0xee; 32]],
                    provider_name: "doh.example.com".to_string(),
                    path: "/dns-query".to_string(),
                },
                None,
            )
            .unwrap();
        let mut proxy = Proxy::for_tests(registry);
        proxy.transport = Arc::new(GetOnlyTransport {
            response: nx_response_bytes(),
            tbs: b"some other certificate".to_vec(),
        });

        let (live, err) = proxy.servers.refresh(&proxy).await;
        assert_eq!(live, 0);
        assert!(matches!(err, Some(ProbeError::CertNotPinned)));
    }

    #[test]
    fn select_on_an_empty_registry_returns_none() {
        let registry = seeded_registry(LbStrategy::P2, true);
        assert!(registry.select("example.com.").is_none());
    }

    #[test]
    fn round_robin_cycles_through_every_server() {
        let registry = seeded_registry(LbStrategy::RoundRobin, false);
        populate(
            &registry,
            vec![
                live_entry("a", 10, None),
                live_entry("b", 20, None),
                live_entry("c", 30, None),
            ],
        );
        let mut seen: Vec<String> = (0..3)
            .map(|_| registry.select("example.com.").unwrap().name.clone())
            .collect();
        seen.sort();
        assert_eq!(seen, ["a", "b", "c"]);
        // and the cycle repeats in the same order
        let again: Vec<String> = (0..3)
            .map(|_| registry.select("example.com.").unwrap().name.clone())
            .collect();
        assert_eq!(again.len(), 3);
        let mut again_sorted = again;
        again_sorted.sort();
        assert_eq!(again_sorted, ["a", "b", "c"]);
    }

    #[test]
    fn hash_strategy_is_pure_and_keyed_on_the_sld() {
        let registry = seeded_registry(LbStrategy::Hash, false);
        populate(
            &registry,
            vec![
                live_entry("a", 10, None),
                live_entry("b", 20, None),
                live_entry("c", 30, None),
            ],
        );
        // fnv1a32("example.com") = 0x431ceb26; 0x431ceb26 % 3 == 2
        let first = registry.select("news.example.com.").unwrap().name.clone();
        assert_eq!(first, "c");
        for _ in 0..5 {
            assert_eq!(registry.select("news.example.com.").unwrap().name, first);
        }
        // a different second-level domain may map elsewhere, same-SLD
        // subdomains never do
        assert_eq!(
            registry.select("deep.sub.example.com.").unwrap().name,
            first
        );
    }

    #[test]
    fn hash_strategy_needs_a_second_level_domain() {
        let registry = seeded_registry(LbStrategy::Hash, false);
        populate(&registry, vec![live_entry("a", 10, None)]);
        assert!(registry.select("localhost").is_none());
        assert!(registry.select(".").is_none());
    }

    #[test]
    fn location_avoidant_skips_denylisted_addresses() {
        let registry = seeded_registry(LbStrategy::LocationAvoidant, false);
        populate(
            &registry,
            vec![
                // denylisted address from the compiled-in table
                live_entry("x", 10, Some("180.94.94.194")),
                live_entry("y", 20, Some("93.184.216.34")),
            ],
        );
        for _ in 0..50 {
            assert_eq!(registry.select("example.com.").unwrap().name, "y");
        }
    }

    #[test]
    fn selection_index_stays_in_bounds() {
        for strategy in [
            LbStrategy::First,
            LbStrategy::Random,
            LbStrategy::P2,
            LbStrategy::PN(4),
            LbStrategy::PH,
            LbStrategy::RoundRobin,
            LbStrategy::Hash,
            LbStrategy::LocationAvoidant,
        ] {
            let registry = seeded_registry(strategy, true);
            populate(
                &registry,
                vec![live_entry("a", 10, None), live_entry("b", 20, None)],
            );
            for _ in 0..100 {
                let server = registry.select("news.example.com.").unwrap();
                assert!(server.name == "a" || server.name == "b");
            }
        }
    }

    #[test]
    fn feedback_raises_and_lowers_the_estimate() {
        let registry = seeded_registry(LbStrategy::First, false);
        populate(&registry, vec![live_entry("a", 10, None)]);
        let server = registry.select("example.com.").unwrap();

        registry.notice_failure(&server);
        let after_failure = server.rtt();
        assert!(after_failure > 10.0);
        assert!(after_failure >= 0.0);

        // a success measured from a begin-stamp in the past folds the
        // elapsed time back in
        server.stats.lock().last_action = Instant::now().checked_sub(Duration::from_millis(100));
        registry.notice_success(&server);
        assert!(server.rtt() < after_failure);
        assert!(server.rtt() >= 0.0);
    }

    #[test]
    fn success_slower_than_the_timeout_is_not_counted() {
        let registry = seeded_registry(LbStrategy::First, false);
        populate(&registry, vec![live_entry("a", 10, None)]);
        let server = registry.select("example.com.").unwrap();
        server.stats.lock().last_action = Instant::now().checked_sub(Duration::from_secs(30));
        registry.notice_success(&server);
        assert_eq!(server.rtt(), 10.0);
    }

    #[test]
    fn repeated_failures_dethrone_the_preferred_server() {
        let registry = seeded_registry(LbStrategy::P2, true);
        populate(
            &registry,
            vec![live_entry("a", 10, None), live_entry("b", 50, None)],
        );
        let head = registry.inner.read().live[0].clone();
        for _ in 0..5 {
            registry.notice_failure(&head);
        }
        Registry::estimator_apply(&mut registry.inner.write(), 1);
        assert_eq!(registry.inner.read().live[0].name, "b");
    }

    #[test]
    fn estimator_rehabilitates_idle_slow_servers() {
        let registry = seeded_registry(LbStrategy::P2, true);
        populate(
            &registry,
            vec![live_entry("fast", 10, None), live_entry("slow", 50, None)],
        );
        registry.inner.write().live[1].stats.lock().last_action =
            Instant::now().checked_sub(Duration::from_secs(120));

        Registry::estimator_apply(&mut registry.inner.write(), 1);
        // min(max(50/2, 2*10), 50) = 25
        assert_eq!(registry.inner.read().live[1].rtt(), 25.0);
        assert_eq!(registry.inner.read().live[0].name, "fast");
    }

    #[test]
    fn estimator_leaves_recently_used_servers_alone() {
        let registry = seeded_registry(LbStrategy::P2, true);
        populate(
            &registry,
            vec![live_entry("fast", 10, None), live_entry("slow", 50, None)],
        );
        registry.inner.write().live[1].stats.lock().last_action = Some(Instant::now());

        Registry::estimator_apply(&mut registry.inner.write(), 1);
        assert_eq!(registry.inner.read().live[1].rtt(), 50.0);
    }

    #[test]
    fn estimator_seeds_a_missing_best_estimate() {
        let registry = seeded_registry(LbStrategy::P2, true);
        let unmeasured = live_entry("u", 0, None);
        unmeasured.stats.lock().rtt = MovingAverage::default();
        populate(&registry, vec![unmeasured, live_entry("m", 30, None)]);

        Registry::estimator_apply(&mut registry.inner.write(), 1);
        assert_eq!(registry.inner.read().live[0].rtt(), 30.0);
    }
}
