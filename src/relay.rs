//! Relay routing for anonymized DNSCrypt.
//!
//! Maps a resolver name to the relay endpoint its traffic should hop
//! through, if the configuration asks for one.

use std::net::SocketAddr;
use tracing::debug;

use crate::probe::{resolve_addr, ProbeError};
use crate::proxy::Proxy;
use crate::stamp::{Stamp, StampProto};

/// Look up the relay for `name` in the route table and resolve it.
///
/// Returns `(None, None)` when no route applies. A matching route with an
/// empty relay list, an unresolvable relay name, or a relay that is not a
/// DNSCrypt endpoint are all errors; anonymization was requested and
/// cannot be honored.
pub async fn route(
    proxy: &Proxy,
    name: &str,
) -> Result<(Option<SocketAddr>, Option<SocketAddr>), ProbeError> {
    let relay_names = match proxy.routes.get(name).or_else(|| proxy.routes.get("*")) {
        Some(relay_names) => relay_names,
        None => return Ok((None, None)),
    };
    if relay_names.is_empty() {
        return Err(ProbeError::EmptyRelayList(name.to_string()));
    }
    let relay_name = &relay_names[proxy.servers.rand_below(relay_names.len())];

    let relay_stamp =
        resolve_relay_stamp(proxy, relay_name).ok_or_else(|| ProbeError::UndefinedRelay {
            relay: relay_name.clone(),
            server: name.to_string(),
        })?;
    match relay_stamp.proto() {
        StampProto::DnsCrypt | StampProto::DnsCryptRelay => {
            let addr = resolve_addr(relay_stamp.addr()).await?;
            debug!("Anonymizing queries for [{}] via [{}]", name, relay_name);
            Ok((Some(addr), Some(addr)))
        }
        _ => Err(ProbeError::InvalidRelay {
            relay: relay_name.clone(),
            server: name.to_string(),
        }),
    }
}

/// A relay reference can be a stamp, a bare `host:port`, or the name of a
/// registered relay or server. First match wins.
fn resolve_relay_stamp(proxy: &Proxy, relay_name: &str) -> Option<Stamp> {
    if let Ok(stamp) = Stamp::parse(relay_name) {
        return Some(stamp);
    }
    if looks_like_host_port(relay_name) {
        return Some(Stamp::DnsCryptRelay {
            addr: relay_name.to_string(),
        });
    }
    if let Some(registered) = proxy
        .registered_relays
        .iter()
        .find(|r| r.name == relay_name)
    {
        return Some(registered.stamp.clone());
    }
    proxy
        .servers
        .find_registered(relay_name)
        .map(|registered| registered.stamp)
}

fn looks_like_host_port(s: &str) -> bool {
    if s.parse::<SocketAddr>().is_ok() {
        return true;
    }
    matches!(s.rsplit_once(':'), Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok())
}
