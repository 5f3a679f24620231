//! Umbra - resolver registry and dispatcher for an encrypted-DNS client proxy.
//!
//! The library keeps an inventory of upstream resolvers described by
//! `sdns://` stamps, revalidates them with live probes, tracks their
//! observed latency, and picks one resolver per client query according to a
//! configurable load-balancing policy. Query forwarding, answer caching,
//! and the DNSCrypt key exchange itself live outside this crate.

pub mod config;
pub mod denylist;
pub mod ewma;
pub mod lb;
pub mod probe;
pub mod proxy;
pub mod registry;
pub mod relay;
pub mod stamp;
pub mod transport;

pub use probe::{CertFetcher, CertInfo, DohClientCreds, DohTransport, ProbeError};
pub use proxy::Proxy;
pub use registry::{Registry, RegisteredServer, ServerInfo};
pub use stamp::Stamp;
