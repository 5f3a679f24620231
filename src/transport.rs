//! HTTPS transport for DoH probes and queries.
//!
//! Built directly on rustls so the probe can inspect what the connection
//! actually negotiated: the ALPN protocol and the presented certificate
//! chain, which certificate pinning needs. One HTTP/1.1 exchange per
//! query over a fresh connection, bounded by the caller's deadline.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::{Mutex, RwLock};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::{debug, trace};
use url::Url;

use crate::probe::{DohClientCreds, DohResponse, DohTransport, TlsInfo};

struct CachedIp {
    ip: IpAddr,
    /// `None` never expires.
    expires: Option<Instant>,
}

/// Production [`DohTransport`] implementation.
pub struct HttpsTransport {
    tls_config: RwLock<Arc<rustls::ClientConfig>>,
    creds: Mutex<Option<DohClientCreds>>,
    cached_ips: Mutex<HashMap<String, CachedIp>>,
}

impl HttpsTransport {
    pub fn new() -> Self {
        Self {
            tls_config: RwLock::new(Arc::new(default_tls_config())),
            creds: Mutex::new(None),
            cached_ips: Mutex::new(HashMap::new()),
        }
    }

    fn cached_ip(&self, host: &str) -> Option<IpAddr> {
        let mut cache = self.cached_ips.lock();
        match cache.get(host) {
            Some(cached) if cached.expires.map_or(true, |at| at > Instant::now()) => {
                Some(cached.ip)
            }
            Some(_) => {
                cache.remove(host);
                None
            }
            None => None,
        }
    }

    async fn resolve_host(&self, host: &str, port: u16) -> Result<SocketAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, port));
        }
        if let Some(ip) = self.cached_ip(host) {
            trace!("Using cached address {} for {}", ip, host);
            return Ok(SocketAddr::new(ip, port));
        }
        tokio::net::lookup_host((host, port))
            .await
            .with_context(|| format!("Failed to resolve {}", host))?
            .next()
            .with_context(|| format!("No addresses for {}", host))
    }

    async fn roundtrip(&self, use_get: bool, url: &Url, body: &[u8]) -> Result<(Vec<u8>, TlsInfo)> {
        let host = url.host_str().context("URL has no host")?;
        let port = url.port().unwrap_or(443);
        let addr = self.resolve_host(host, port).await?;

        let tcp = TcpStream::connect(addr)
            .await
            .with_context(|| format!("Failed to connect to {}", addr))?;
        tcp.set_nodelay(true)?;
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|_| anyhow::anyhow!("Invalid server name: {}", host))?;
        let connector = TlsConnector::from(self.tls_config.read().clone());
        let mut stream = connector
            .connect(server_name, tcp)
            .await
            .context("TLS handshake failed")?;

        let host_header = if port == 443 {
            host.to_string()
        } else {
            format!("{}:{}", host, port)
        };
        let request = if use_get {
            format!(
                "GET {}?dns={} HTTP/1.1\r\n\
                 Host: {}\r\n\
                 Accept: application/dns-message\r\n\
                 Connection: close\r\n\r\n",
                url.path(),
                URL_SAFE_NO_PAD.encode(body),
                host_header,
            )
            .into_bytes()
        } else {
            let mut req = format!(
                "POST {} HTTP/1.1\r\n\
                 Host: {}\r\n\
                 Accept: application/dns-message\r\n\
                 Content-Type: application/dns-message\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n",
                url.path(),
                host_header,
                body.len(),
            )
            .into_bytes();
            req.extend_from_slice(body);
            req
        };
        stream.write_all(&request).await?;
        stream.flush().await?;

        let mut raw = Vec::new();
        if let Err(err) = stream.read_to_end(&mut raw).await {
            // servers that skip close_notify still sent a full response
            if err.kind() != std::io::ErrorKind::UnexpectedEof || raw.is_empty() {
                return Err(err).context("Failed to read HTTP response");
            }
        }

        let (_, conn) = stream.get_ref();
        let tls_info = TlsInfo {
            handshake_complete: true,
            negotiated_protocol: conn
                .alpn_protocol()
                .map(|p| String::from_utf8_lossy(p).into_owned())
                .unwrap_or_default(),
            peer_certificates: conn
                .peer_certificates()
                .map(|certs| {
                    certs
                        .iter()
                        .filter_map(|cert| raw_tbs(cert.as_ref()).map(<[u8]>::to_vec))
                        .collect()
                })
                .unwrap_or_default(),
        };

        let body = parse_http_response(&raw)?;
        Ok((body, tls_info))
    }
}

impl Default for HttpsTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DohTransport for HttpsTransport {
    async fn doh_query(
        &self,
        use_get: bool,
        url: &Url,
        body: &[u8],
        timeout: Duration,
    ) -> Result<DohResponse> {
        let start = Instant::now();
        let (body, tls) = tokio::time::timeout(timeout, self.roundtrip(use_get, url, body))
            .await
            .map_err(|_| anyhow::anyhow!("DoH query to {} timed out", url))??;
        Ok(DohResponse {
            body,
            tls: Some(tls),
            rtt: start.elapsed(),
        })
    }

    fn save_cached_ip(&self, host: &str, ip: IpAddr, ttl: Option<Duration>) {
        debug!("Pinning {} to {}", host, ip);
        self.cached_ips.lock().insert(
            host.to_string(),
            CachedIp {
                ip,
                expires: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
    }

    fn set_client_creds(&self, creds: Option<DohClientCreds>) {
        *self.creds.lock() = creds;
    }

    fn rebuild_transport(&self) -> Result<()> {
        let creds = self.creds.lock().clone();
        let config = base_tls_config(creds.as_ref())?;
        *self.tls_config.write() = Arc::new(config);
        Ok(())
    }
}

fn default_tls_config() -> rustls::ClientConfig {
    let mut roots = rustls::RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let mut config = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    config
}

fn base_tls_config(creds: Option<&DohClientCreds>) -> Result<rustls::ClientConfig> {
    let creds = match creds {
        Some(creds) => creds,
        None => return Ok(default_tls_config()),
    };

    let mut roots = rustls::RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    if let Some(ca_path) = &creds.root_ca {
        for cert in load_certs(ca_path)? {
            roots
                .add(cert)
                .with_context(|| format!("Invalid root CA certificate in {}", ca_path))?;
        }
    }

    let mut config = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_client_auth_cert(load_certs(&creds.client_cert)?, load_key(&creds.client_key)?)
        .context("Failed to install TLS client credentials")?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    Ok(config)
}

fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>> {
    let mut reader = BufReader::new(
        File::open(path).with_context(|| format!("Failed to open certificate file {}", path))?,
    );
    let certs: Vec<_> = rustls_pemfile::certs(&mut reader)
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("Failed to parse certificates from {}", path))?;
    if certs.is_empty() {
        bail!("No certificates found in {}", path);
    }
    Ok(certs)
}

fn load_key(path: &str) -> Result<PrivateKeyDer<'static>> {
    let mut reader = BufReader::new(
        File::open(path).with_context(|| format!("Failed to open key file {}", path))?,
    );
    rustls_pemfile::private_key(&mut reader)
        .with_context(|| format!("Failed to parse private key from {}", path))?
        .with_context(|| format!("No private key found in {}", path))
}

/// Minimal HTTP/1.1 response parser for `Connection: close` exchanges.
fn parse_http_response(raw: &[u8]) -> Result<Vec<u8>> {
    let header_end = find_subsequence(raw, b"\r\n\r\n").context("Truncated HTTP response")?;
    let head = std::str::from_utf8(&raw[..header_end]).context("Invalid HTTP header")?;
    let mut lines = head.split("\r\n");
    let status_line = lines.next().context("Empty HTTP response")?;
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .with_context(|| format!("Malformed status line: {}", status_line))?;
    if !(200..300).contains(&status) {
        bail!("Server returned HTTP status {}", status);
    }

    let mut content_length = None;
    let mut chunked = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().ok();
        } else if name.eq_ignore_ascii_case("transfer-encoding")
            && value.eq_ignore_ascii_case("chunked")
        {
            chunked = true;
        }
    }

    let body = &raw[header_end + 4..];
    if chunked {
        return decode_chunked(body);
    }
    match content_length {
        Some(len) if body.len() >= len => Ok(body[..len].to_vec()),
        Some(_) => bail!("Truncated HTTP body"),
        None => Ok(body.to_vec()),
    }
}

fn decode_chunked(mut body: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        let line_end = find_subsequence(body, b"\r\n").context("Truncated chunk header")?;
        let size_line = std::str::from_utf8(&body[..line_end]).context("Invalid chunk header")?;
        let size_field = size_line.trim().split(';').next().unwrap_or_default();
        let size = usize::from_str_radix(size_field, 16)
            .with_context(|| format!("Invalid chunk size: {}", size_field))?;
        body = &body[line_end + 2..];
        if size == 0 {
            return Ok(out);
        }
        if body.len() < size + 2 {
            bail!("Truncated chunk");
        }
        out.extend_from_slice(&body[..size]);
        body = &body[size + 2..];
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// The `tbsCertificate` element of a DER certificate: the first child of
/// the outer SEQUENCE, returned with its own tag and length header so the
/// digest matches what the server signed.
fn raw_tbs(der: &[u8]) -> Option<&[u8]> {
    if der.first() != Some(&0x30) {
        return None;
    }
    let (outer_header, outer_len) = der_header(der)?;
    let inner = der.get(outer_header..outer_header + outer_len)?;
    let (tbs_header, tbs_len) = der_header(inner)?;
    inner.get(..tbs_header + tbs_len)
}

/// Header length and content length of the DER element at the start of
/// `data`.
fn der_header(data: &[u8]) -> Option<(usize, usize)> {
    let len_byte = *data.get(1)?;
    if len_byte & 0x80 == 0 {
        return Some((2, len_byte as usize));
    }
    let len_octets = (len_byte & 0x7f) as usize;
    if len_octets == 0 || len_octets > 4 || data.len() < 2 + len_octets {
        return None;
    }
    let mut len = 0usize;
    for &b in &data[2..2 + len_octets] {
        len = (len << 8) | b as usize;
    }
    Some((2 + len_octets, len))
}
