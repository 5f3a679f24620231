//! `sdns://` server-stamp codec.
//!
//! A stamp is a compact descriptor of one upstream resolver or relay:
//! protocol, address, cryptographic material, and informational flags,
//! base64url-encoded. Only the protocols the registry dispatches on are
//! decoded here; anything else is rejected at configuration time.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

const SCHEME: &str = "sdns://";

const PROTO_DNSCRYPT: u8 = 0x01;
const PROTO_DOH: u8 = 0x02;
const PROTO_DNSCRYPT_RELAY: u8 = 0x81;

#[derive(Debug, Error)]
pub enum StampError {
    #[error("server stamps must start with \"sdns://\"")]
    MissingScheme,
    #[error("invalid stamp encoding: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("stamp is too short")]
    Truncated,
    #[error("unsupported stamp protocol 0x{0:02x}")]
    UnsupportedProtocol(u8),
    #[error("unexpected certificate hash length {0}")]
    BadHashLength(usize),
    #[error("unexpected trailing bytes in stamp")]
    TrailingBytes,
}

/// Protocol tag of a parsed stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampProto {
    DnsCrypt,
    Doh,
    DnsCryptRelay,
}

impl std::fmt::Display for StampProto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DnsCrypt => write!(f, "DNSCrypt"),
            Self::Doh => write!(f, "DoH"),
            Self::DnsCryptRelay => write!(f, "anonymized DNSCrypt relay"),
        }
    }
}

/// Informational resolver properties advertised by the stamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StampProps {
    pub dnssec: bool,
    pub no_log: bool,
    pub no_filter: bool,
}

impl StampProps {
    fn from_bits(bits: u64) -> Self {
        Self {
            dnssec: bits & 0x01 != 0,
            no_log: bits & 0x02 != 0,
            no_filter: bits & 0x04 != 0,
        }
    }
}

/// A parsed resolver descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Stamp {
    DnsCrypt {
        props: StampProps,
        /// `host:port`; the port is always present in DNSCrypt stamps.
        addr: String,
        /// Raw key material as stored in the stamp. The canonical form is
        /// 32 bytes; legacy hex-with-colons text is normalized at
        /// registration.
        server_pk: Vec<u8>,
        provider_name: String,
    },
    Doh {
        props: StampProps,
        /// Optional `host:port` or bare IP used to reach the server.
        addr: String,
        /// SHA-256 digests of acceptable TLS leaf `tbsCertificate`s.
        /// Empty means pinning is disabled.
        hashes: Vec<[u8; 32]>,
        provider_name: String,
        path: String,
    },
    DnsCryptRelay {
        addr: String,
    },
}

impl Stamp {
    pub fn parse(input: &str) -> Result<Self, StampError> {
        let encoded = input.strip_prefix(SCHEME).ok_or(StampError::MissingScheme)?;
        let bytes = URL_SAFE_NO_PAD.decode(encoded)?;
        let mut reader = Reader::new(&bytes);

        let stamp = match reader.u8()? {
            PROTO_DNSCRYPT => {
                let props = StampProps::from_bits(reader.u64_le()?);
                let addr = reader.lp_string()?;
                let server_pk = reader.lp_bytes()?.to_vec();
                let provider_name = reader.lp_string()?;
                Stamp::DnsCrypt {
                    props,
                    addr,
                    server_pk,
                    provider_name,
                }
            }
            PROTO_DOH => {
                let props = StampProps::from_bits(reader.u64_le()?);
                let addr = reader.lp_string()?;
                let mut hashes = Vec::new();
                for hash in reader.vlp()? {
                    if hash.is_empty() {
                        continue;
                    }
                    let hash: [u8; 32] = hash
                        .try_into()
                        .map_err(|h: Vec<u8>| StampError::BadHashLength(h.len()))?;
                    hashes.push(hash);
                }
                let provider_name = reader.lp_string()?;
                let path = reader.lp_string()?;
                // optional bootstrap IP list, not used by the registry
                if !reader.is_empty() {
                    reader.vlp()?;
                }
                Stamp::Doh {
                    props,
                    addr,
                    hashes,
                    provider_name,
                    path,
                }
            }
            PROTO_DNSCRYPT_RELAY => Stamp::DnsCryptRelay {
                addr: reader.lp_string()?,
            },
            other => return Err(StampError::UnsupportedProtocol(other)),
        };
        if !reader.is_empty() {
            return Err(StampError::TrailingBytes);
        }
        Ok(stamp)
    }

    pub fn proto(&self) -> StampProto {
        match self {
            Self::DnsCrypt { .. } => StampProto::DnsCrypt,
            Self::Doh { .. } => StampProto::Doh,
            Self::DnsCryptRelay { .. } => StampProto::DnsCryptRelay,
        }
    }

    /// The `host:port` (or bare host) the stamp points at.
    pub fn addr(&self) -> &str {
        match self {
            Self::DnsCrypt { addr, .. }
            | Self::Doh { addr, .. }
            | Self::DnsCryptRelay { addr } => addr,
        }
    }
}

/// Split `addr` into host and port, defaulting the port when absent.
/// Handles bracketed IPv6 (`[::1]:443`) and bare IPv6 literals.
pub fn extract_host_port(addr: &str, default_port: u16) -> (String, u16) {
    if let Some(rest) = addr.strip_prefix('[') {
        if let Some((host, port)) = rest.split_once(']') {
            let port = port
                .strip_prefix(':')
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port);
            return (host.to_string(), port);
        }
    }
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => match port.parse() {
            Ok(port) => (host.to_string(), port),
            Err(_) => (addr.to_string(), default_port),
        },
        _ => (addr.to_string(), default_port),
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], StampError> {
        let end = self.pos.checked_add(n).ok_or(StampError::Truncated)?;
        if end > self.data.len() {
            return Err(StampError::Truncated);
        }
        let out = &self.data[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, StampError> {
        Ok(self.take(1)?[0])
    }

    fn u64_le(&mut self) -> Result<u64, StampError> {
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().expect("8 bytes")))
    }

    /// One length-prefixed field.
    fn lp_bytes(&mut self) -> Result<&'a [u8], StampError> {
        let len = self.u8()? as usize;
        self.take(len)
    }

    fn lp_string(&mut self) -> Result<String, StampError> {
        Ok(String::from_utf8_lossy(self.lp_bytes()?).into_owned())
    }

    /// A length-prefixed set: the high bit of each length byte marks that
    /// another element follows.
    fn vlp(&mut self) -> Result<Vec<Vec<u8>>, StampError> {
        let mut out = Vec::new();
        loop {
            let len = self.u8()?;
            let more = len & 0x80 != 0;
            out.push(self.take((len & 0x7f) as usize)?.to_vec());
            if !more {
                return Ok(out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_public_doh_stamp() {
        let stamp = Stamp::parse(
            "sdns://AgcAAAAAAAAABzEuMC4wLjEAEmRucy5jbG91ZGZsYXJlLmNvbQovZG5zLXF1ZXJ5",
        )
        .unwrap();
        match stamp {
            Stamp::Doh {
                props,
                addr,
                hashes,
                provider_name,
                path,
            } => {
                assert!(props.dnssec && props.no_log && props.no_filter);
                assert_eq!(addr, "1.0.0.1");
                assert!(hashes.is_empty());
                assert_eq!(provider_name, "dns.cloudflare.com");
                assert_eq!(path, "/dns-query");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn parses_dnscrypt_stamp() {
        let stamp = Stamp::parse(
            "sdns://AQUAAAAAAAAADjEyNy4wLjAuMTo4NDQzIAABAgMEBQYHCAkKCwwNDg8QERITFBUWFxgZGhscHR4fFzIuZG5zY3J5cHQtY2VydC5leGFtcGxl",
        )
        .unwrap();
        match stamp {
            Stamp::DnsCrypt {
                props,
                addr,
                server_pk,
                provider_name,
            } => {
                assert!(props.dnssec && props.no_filter && !props.no_log);
                assert_eq!(addr, "127.0.0.1:8443");
                assert_eq!(server_pk, (0u8..32).collect::<Vec<u8>>());
                assert_eq!(provider_name, "2.dnscrypt-cert.example");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn parses_relay_stamp() {
        let stamp = Stamp::parse("sdns://gQs5LjkuOS45OjQ0Mw").unwrap();
        assert_eq!(stamp.proto(), StampProto::DnsCryptRelay);
        assert_eq!(stamp.addr(), "9.9.9.9:443");
    }

    #[test]
    fn parses_pinned_doh_stamp() {
        let stamp = Stamp::parse(
            "sdns://AgAAAAAAAAAABzEuMi4zLjQgqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqoPZG9oLmV4YW1wbGUuY29tCi9kbnMtcXVlcnk",
        )
        .unwrap();
        match stamp {
            Stamp::Doh { hashes, .. } => {
                assert_eq!(hashes, vec![[0xaa; 32]]);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_stamps() {
        assert!(matches!(
            Stamp::parse("https://example.com"),
            Err(StampError::MissingScheme)
        ));
        assert!(matches!(
            Stamp::parse("sdns://AA"),
            Err(StampError::UnsupportedProtocol(0))
        ));
        assert!(Stamp::parse("sdns://!!!").is_err());
        // DNSCrypt tag with nothing behind it
        assert!(matches!(
            Stamp::parse("sdns://AQ"),
            Err(StampError::Truncated)
        ));
    }

    #[test]
    fn host_port_extraction() {
        assert_eq!(
            extract_host_port("1.2.3.4:853", 443),
            ("1.2.3.4".to_string(), 853)
        );
        assert_eq!(
            extract_host_port("1.2.3.4", 443),
            ("1.2.3.4".to_string(), 443)
        );
        assert_eq!(
            extract_host_port("[2620:fe::fe]:5353", 443),
            ("2620:fe::fe".to_string(), 5353)
        );
        assert_eq!(
            extract_host_port("2620:fe::fe", 443),
            ("2620:fe::fe".to_string(), 443)
        );
    }
}
