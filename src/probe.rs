//! Liveness and handshake probes for upstream resolvers.
//!
//! A probe performs one live round-trip against a resolver (two HTTP
//! exchanges on the DoH path, where the first may be retried once over
//! GET), validates the cryptographic material it observes, and returns a
//! populated [`ServerInfo`] together with the measured RTT. The DNSCrypt
//! certificate exchange itself is behind the [`CertFetcher`] trait; the
//! HTTPS round-trip is behind [`DohTransport`].

use async_trait::async_trait;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::opt::EdnsOption;
use hickory_proto::rr::{Name, RecordType};
use hickory_proto::serialize::binary::BinDecodable;
use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::MainProto;
use crate::proxy::Proxy;
use crate::registry::{ServerBugs, ServerInfo};
use crate::relay;
use crate::stamp::{extract_host_port, Stamp, StampProto};

/// Smallest well-formed DNS packet: header plus a root question.
pub const MIN_DNS_PACKET_SIZE: usize = 12 + 5;
pub const MAX_DNS_PACKET_SIZE: usize = 4096;

/// Transaction id echoed back by both DoH probe queries.
const PROBE_MSG_ID: u16 = 0xcafe;

/// EDNS0 option code for padding (RFC 7830).
const EDNS_PADDING_CODE: u16 = 12;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("unsupported protocol")]
    ProtocolUnsupported,
    #[error("unsupported public key for [{0}]")]
    InvalidServerKey(String),
    #[error("route declared for [{0}] but the relay list is empty")]
    EmptyRelayList(String),
    #[error("undefined relay [{relay}] for server [{server}]")]
    UndefinedRelay { relay: String, server: String },
    #[error("invalid relay [{relay}] for server [{server}]")]
    InvalidRelay { relay: String, server: String },
    #[error("resolver [{0}] is incompatible with anonymization")]
    AnonIncompatible(String),
    #[error("failed to resolve [{addr}]")]
    AddrResolution {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no certificate fetcher is configured, cannot probe DNSCrypt resolvers")]
    NoCertFetcher,
    #[error("certificate fetch failed for [{name}]: {err}")]
    CertFetch { name: String, err: anyhow::Error },
    #[error("HTTPS probe failed for [{name}]: {err}")]
    Http { name: String, err: anyhow::Error },
    #[error("TLS handshake failed")]
    TlsIncomplete,
    #[error("certificate hash not found in the pinned set")]
    CertNotPinned,
    #[error("webserver returned an unexpected response")]
    MalformedResponse,
}

/// Key-exchange construction negotiated with a DNSCrypt resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CryptoConstruction {
    #[default]
    Undefined,
    XSalsa20Poly1305,
    XChaCha20Poly1305,
}

/// Session material extracted from a validated DNSCrypt certificate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertInfo {
    pub magic_query: [u8; 8],
    pub server_pk: [u8; 32],
    pub shared_key: [u8; 32],
    pub crypto_construction: CryptoConstruction,
}

/// Result of one DNSCrypt certificate fetch.
#[derive(Debug, Clone, Copy)]
pub struct CertFetchOutcome {
    pub cert: CertInfo,
    pub rtt_ms: u64,
    /// The probe observed that fragmented UDP questions were dropped.
    pub fragments_blocked: bool,
}

/// Everything the certificate fetcher needs for one exchange.
pub struct CertFetchQuery<'a> {
    pub name: &'a str,
    pub main_proto: MainProto,
    pub server_pk: [u8; 32],
    pub server_addr: &'a str,
    pub provider_name: &'a str,
    pub is_new: bool,
    pub relay_udp_addr: Option<SocketAddr>,
    pub relay_tcp_addr: Option<SocketAddr>,
    pub known_bugs: ServerBugs,
}

/// Fetches and validates the current DNSCrypt certificate of a resolver,
/// deriving the per-session shared key. Implemented by the host proxy;
/// the key exchange is out of this crate's hands.
#[async_trait]
pub trait CertFetcher: Send + Sync {
    async fn fetch(&self, query: CertFetchQuery<'_>) -> anyhow::Result<CertFetchOutcome>;
}

/// TLS connection state observed during a DoH exchange.
#[derive(Debug, Clone, Default)]
pub struct TlsInfo {
    pub handshake_complete: bool,
    /// Negotiated ALPN protocol; empty when none was agreed on.
    pub negotiated_protocol: String,
    /// Raw DER `tbsCertificate` bytes of each certificate in the
    /// presented chain, leaf first.
    pub peer_certificates: Vec<Vec<u8>>,
}

/// One completed DoH exchange.
#[derive(Debug)]
pub struct DohResponse {
    pub body: Vec<u8>,
    pub tls: Option<TlsInfo>,
    pub rtt: Duration,
}

/// TLS client credentials for a DoH server requiring authentication.
#[derive(Debug, Clone, Deserialize)]
pub struct DohClientCreds {
    pub client_cert: String,
    pub client_key: String,
    #[serde(default)]
    pub root_ca: Option<String>,
}

/// HTTPS transport used for DoH probes and queries.
#[async_trait]
pub trait DohTransport: Send + Sync {
    async fn doh_query(
        &self,
        use_get: bool,
        url: &Url,
        body: &[u8],
        timeout: Duration,
    ) -> anyhow::Result<DohResponse>;

    /// Pin `host` to `ip`. A `None` TTL never expires; it keeps a server
    /// from rotating per-client IPv6 addresses under us.
    fn save_cached_ip(&self, host: &str, ip: IpAddr, ttl: Option<Duration>);

    /// Install (or clear) TLS client credentials for subsequent
    /// connections. Takes effect after [`DohTransport::rebuild_transport`].
    fn set_client_creds(&self, creds: Option<DohClientCreds>);

    fn rebuild_transport(&self) -> anyhow::Result<()>;
}

/// Probe one resolver and return its live entry.
pub async fn fetch_server_info(
    proxy: &Proxy,
    name: &str,
    stamp: &Stamp,
    is_new: bool,
) -> Result<ServerInfo, ProbeError> {
    match stamp {
        Stamp::DnsCrypt {
            addr,
            server_pk,
            provider_name,
            ..
        } => fetch_dnscrypt_server_info(proxy, name, addr, server_pk, provider_name, is_new).await,
        Stamp::Doh {
            addr,
            hashes,
            provider_name,
            path,
            ..
        } => fetch_doh_server_info(proxy, name, addr, hashes, provider_name, path, is_new).await,
        Stamp::DnsCryptRelay { .. } => Err(ProbeError::ProtocolUnsupported),
    }
}

async fn fetch_dnscrypt_server_info(
    proxy: &Proxy,
    name: &str,
    addr: &str,
    server_pk: &[u8],
    provider_name: &str,
    is_new: bool,
) -> Result<ServerInfo, ProbeError> {
    let server_pk: [u8; 32] = server_pk
        .try_into()
        .map_err(|_| ProbeError::InvalidServerKey(name.to_string()))?;

    let mut known_bugs = ServerBugs::default();
    if proxy.servers_blocking_fragments.iter().any(|n| n == name) {
        known_bugs.fragments_blocked = true;
        info!(
            "Known bug in [{}]: fragmented questions over UDP are blocked",
            name
        );
    }

    let (mut relay_udp_addr, mut relay_tcp_addr) = relay::route(proxy, name).await?;

    let fetcher = proxy
        .cert_fetcher
        .as_ref()
        .ok_or(ProbeError::NoCertFetcher)?;
    let result = fetcher
        .fetch(CertFetchQuery {
            name,
            main_proto: proxy.main_proto,
            server_pk,
            server_addr: addr,
            provider_name,
            is_new,
            relay_udp_addr,
            relay_tcp_addr,
            known_bugs,
        })
        .await;

    if let Ok(outcome) = &result {
        if !known_bugs.fragments_blocked && outcome.fragments_blocked {
            debug!("[{}] drops fragmented queries", name);
            known_bugs.fragments_blocked = true;
        }
    }
    if known_bugs.fragments_blocked && (relay_udp_addr.is_some() || relay_tcp_addr.is_some()) {
        relay_udp_addr = None;
        relay_tcp_addr = None;
        if proxy.skip_anon_incompatible_resolvers {
            info!(
                "[{}] is incompatible with anonymization, it will be ignored",
                name
            );
            return Err(ProbeError::AnonIncompatible(name.to_string()));
        }
        warn!("[{}] is incompatible with anonymization", name);
    }
    let outcome = result.map_err(|err| ProbeError::CertFetch {
        name: name.to_string(),
        err,
    })?;

    let remote_addr = resolve_addr(addr).await?;
    if is_new {
        info!("[{}] OK (DNSCrypt) - rtt: {}ms", name, outcome.rtt_ms);
    } else {
        debug!("[{}] OK (DNSCrypt) - rtt: {}ms", name, outcome.rtt_ms);
    }

    Ok(ServerInfo {
        proto: StampProto::DnsCrypt,
        name: name.to_string(),
        timeout: proxy.timeout,
        magic_query: outcome.cert.magic_query,
        server_pk: outcome.cert.server_pk,
        shared_key: outcome.cert.shared_key,
        crypto_construction: outcome.cert.crypto_construction,
        udp_addr: Some(remote_addr),
        tcp_addr: Some(remote_addr),
        relay_udp_addr,
        relay_tcp_addr,
        url: None,
        host_name: String::new(),
        use_get: false,
        known_bugs,
        doh_client_creds: None,
        initial_rtt: outcome.rtt_ms,
        stats: ServerInfo::seeded_stats(outcome.rtt_ms),
    })
}

async fn fetch_doh_server_info(
    proxy: &Proxy,
    name: &str,
    addr: &str,
    hashes: &[[u8; 32]],
    provider_name: &str,
    path: &str,
    is_new: bool,
) -> Result<ServerInfo, ProbeError> {
    let url = Url::parse(&format!("https://{}{}", provider_name, path)).map_err(|err| {
        ProbeError::Http {
            name: name.to_string(),
            err: err.into(),
        }
    })?;

    // If the stamp provides an IP, use it forever. A fallback resolver run
    // by the same entity could otherwise hand each client a unique IPv6
    // address and fingerprint it across connections.
    if !addr.is_empty() {
        let (ip_only, _) = extract_host_port(addr, 443);
        if let Ok(ip) = ip_only.parse::<IpAddr>() {
            if let Some(host) = url.host_str() {
                proxy.transport.save_cached_ip(host, ip, None);
            }
        }
    }

    let creds = proxy
        .doh_creds
        .get(name)
        .or_else(|| proxy.doh_creds.get("*"))
        .cloned();
    if let Some(creds) = &creds {
        info!("Enabling TLS authentication for [{}]", name);
        proxy.transport.set_client_creds(Some(creds.clone()));
        proxy
            .transport
            .rebuild_transport()
            .map_err(|err| ProbeError::Http {
                name: name.to_string(),
                err,
            })?;
    }

    let body = doh_test_packet(PROBE_MSG_ID).map_err(|err| ProbeError::Http {
        name: name.to_string(),
        err,
    })?;
    let mut use_get = false;
    if proxy
        .transport
        .doh_query(use_get, &url, &body, proxy.timeout)
        .await
        .is_err()
    {
        use_get = true;
        if let Err(err) = proxy
            .transport
            .doh_query(use_get, &url, &body, proxy.timeout)
            .await
        {
            return Err(ProbeError::Http {
                name: name.to_string(),
                err,
            });
        }
        debug!(
            "Server [{}] doesn't appear to support POST; falling back to GET requests",
            name
        );
    }

    let body = doh_nx_test_packet(PROBE_MSG_ID).map_err(|err| ProbeError::Http {
        name: name.to_string(),
        err,
    })?;
    let response = proxy
        .transport
        .doh_query(use_get, &url, &body, proxy.timeout)
        .await
        .map_err(|err| {
            info!("[{}] [{}]: {}", name, url, err);
            ProbeError::Http {
                name: name.to_string(),
                err,
            }
        })?;

    let tls = response
        .tls
        .filter(|tls| tls.handshake_complete)
        .ok_or(ProbeError::TlsIncomplete)?;

    let msg = Message::from_bytes(&response.body).map_err(|err| {
        warn!("[{}]: {}", name, err);
        ProbeError::MalformedResponse
    })?;
    if msg.response_code() != ResponseCode::NXDomain {
        error!("[{}] may be a lying resolver", name);
    }

    let mut protocol = tls.negotiated_protocol.clone();
    if protocol.is_empty() {
        protocol = "h1".to_string();
        warn!("[{}] does not support HTTP/2", name);
    }
    info!("[{}] Protocol: {}", name, protocol);

    let mut found = false;
    for tbs in &tls.peer_certificates {
        let digest: [u8; 32] = Sha256::digest(tbs).into();
        if proxy.show_certs {
            info!("Advertised cert: [{}]", hex::encode(digest));
        } else {
            debug!("Advertised cert: [{}]", hex::encode(digest));
        }
        if hashes.iter().any(|hash| hash == &digest) {
            found = true;
            break;
        }
    }
    if !found && !hashes.is_empty() {
        error!("[{}] certificate hash not found", name);
        return Err(ProbeError::CertNotPinned);
    }

    let resp = &response.body;
    let sane = resp.len() >= MIN_DNS_PACKET_SIZE
        && resp.len() <= MAX_DNS_PACKET_SIZE
        && resp[0] == 0xca
        && resp[1] == 0xfe
        && resp[4] == 0x00
        && resp[5] == 0x01;
    if !sane {
        info!("Webserver returned an unexpected response");
        return Err(ProbeError::MalformedResponse);
    }

    let initial_rtt = response.rtt.as_millis() as u64;
    if is_new {
        info!("[{}] OK (DoH) - rtt: {}ms", name, initial_rtt);
    } else {
        debug!("[{}] OK (DoH) - rtt: {}ms", name, initial_rtt);
    }

    Ok(ServerInfo {
        proto: StampProto::Doh,
        name: name.to_string(),
        timeout: proxy.timeout,
        magic_query: [0; 8],
        server_pk: [0; 32],
        shared_key: [0; 32],
        crypto_construction: CryptoConstruction::Undefined,
        udp_addr: None,
        tcp_addr: None,
        relay_udp_addr: None,
        relay_tcp_addr: None,
        url: Some(url),
        host_name: provider_name.to_string(),
        use_get,
        known_bugs: ServerBugs::default(),
        doh_client_creds: creds,
        initial_rtt,
        stats: ServerInfo::seeded_stats(initial_rtt),
    })
}

/// Resolve `host:port` to a socket address.
pub async fn resolve_addr(addr: &str) -> Result<SocketAddr, ProbeError> {
    match tokio::net::lookup_host(addr).await {
        Ok(mut addrs) => addrs.next().ok_or_else(|| ProbeError::AddrResolution {
            addr: addr.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses returned"),
        }),
        Err(source) => Err(ProbeError::AddrResolution {
            addr: addr.to_string(),
            source,
        }),
    }
}

/// Well-formed `. IN NS` query used to find out whether a server accepts
/// POST at all.
fn doh_test_packet(msg_id: u16) -> anyhow::Result<Vec<u8>> {
    let mut msg = Message::new();
    msg.set_id(msg_id);
    msg.set_message_type(MessageType::Query);
    msg.set_op_code(OpCode::Query);
    msg.set_recursion_desired(true);
    msg.add_query(Query::query(Name::root(), RecordType::NS));
    msg.set_edns(padded_edns());
    Ok(msg.to_vec()?)
}

/// Query for a random label under `.test.dnscrypt.`, expected to come
/// back as NXDomain from an honest resolver.
fn doh_nx_test_packet(msg_id: u16) -> anyhow::Result<Vec<u8>> {
    let mut rng = rand::thread_rng();
    let mut label = String::with_capacity(16);
    for _ in 0..16 {
        label.push(rng.gen_range(b'a'..=b'z') as char);
    }
    let mut msg = Message::new();
    msg.set_id(msg_id);
    msg.set_message_type(MessageType::Query);
    msg.set_op_code(OpCode::Query);
    msg.set_recursion_desired(true);
    let name = Name::from_ascii(format!("{}.test.dnscrypt.", label))?;
    msg.add_query(Query::query(name, RecordType::NS));
    msg.set_edns(padded_edns());
    Ok(msg.to_vec()?)
}

fn padded_edns() -> Edns {
    let mut edns = Edns::new();
    edns.set_max_payload(MAX_DNS_PACKET_SIZE as u16);
    edns.set_version(0);
    let mut padding = [0u8; 16];
    rand::thread_rng().fill(&mut padding);
    edns.options_mut()
        .insert(EdnsOption::Unknown(EDNS_PADDING_CODE, padding.to_vec()));
    edns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_is_a_root_ns_query() {
        let bytes = doh_test_packet(PROBE_MSG_ID).unwrap();
        assert_eq!(&bytes[0..2], &[0xca, 0xfe]);
        let msg = Message::from_bytes(&bytes).unwrap();
        assert_eq!(msg.id(), PROBE_MSG_ID);
        assert!(msg.recursion_desired());
        let query = msg.queries().first().unwrap();
        assert!(query.name().is_root());
        assert_eq!(query.query_type(), RecordType::NS);
        assert!(msg.extensions().is_some());
    }

    #[test]
    fn nx_test_packet_targets_the_probe_zone() {
        let bytes = doh_nx_test_packet(PROBE_MSG_ID).unwrap();
        let msg = Message::from_bytes(&bytes).unwrap();
        assert_eq!(msg.id(), PROBE_MSG_ID);
        let name = msg.queries().first().unwrap().name().to_ascii();
        assert!(
            name.ends_with(".test.dnscrypt."),
            "unexpected probe name {name}"
        );
        // 16 random letters plus the fixed suffix
        assert_eq!(name.len(), 16 + ".test.dnscrypt.".len());
    }

    #[test]
    fn nx_test_packets_vary() {
        let a = doh_nx_test_packet(PROBE_MSG_ID).unwrap();
        let b = doh_nx_test_packet(PROBE_MSG_ID).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn probe_queries_carry_padding() {
        let bytes = doh_test_packet(PROBE_MSG_ID).unwrap();
        let msg = Message::from_bytes(&bytes).unwrap();
        let edns = msg.extensions().as_ref().unwrap();
        assert_eq!(edns.max_payload(), MAX_DNS_PACKET_SIZE as u16);
        assert!(edns.option(
            hickory_proto::rr::rdata::opt::EdnsCode::Padding
        )
        .is_some());
    }
}
