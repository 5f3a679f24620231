//! Load-balancing strategies for picking one live resolver per query.
//!
//! The randomized strategies sample uniformly from a prefix of the live
//! set; because the latency estimator keeps the fastest resolver at index
//! 0, sampling the best-`k` prefix implements power-of-k-choices.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::warn;

/// Attempt cap for the location-avoidant re-draw loop. On exhaustion the
/// last sampled candidate is used even if it matched the denylist.
pub const MAX_LOCATION_AVOIDANT_ATTEMPTS: usize = 16;

/// Resolver selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LbStrategy {
    /// Always the current best resolver.
    First,
    /// Uniform over the whole live set.
    Random,
    /// Power-of-two-choices over the best two resolvers.
    P2,
    /// Power-of-k-choices over the best `k` resolvers.
    PN(usize),
    /// Uniform over the better half of the live set.
    PH,
    /// Deterministic rotation over the live set.
    RoundRobin,
    /// Deterministic pick keyed on the query's second-level domain.
    Hash,
    /// Power-of-two-choices, re-drawn while the pick is on a denylisted IP.
    LocationAvoidant,
}

impl LbStrategy {
    /// Parse the configuration string form. Unknown strategies warn and
    /// fall back to the default (`p2`).
    pub fn parse(s: &str) -> Self {
        match s {
            "first" => Self::First,
            "random" => Self::Random,
            "p2" => Self::P2,
            "ph" => Self::PH,
            "rr" => Self::RoundRobin,
            "hash" => Self::Hash,
            "la" => Self::LocationAvoidant,
            _ => {
                // both the short form ("p4") and the explicit one ("pN:4")
                let n = s
                    .strip_prefix("pN:")
                    .or_else(|| s.strip_prefix('p'))
                    .and_then(|n| n.parse::<usize>().ok());
                if let Some(n) = n.filter(|&n| n > 0) {
                    return Self::PN(n);
                }
                warn!("Unknown load-balancing strategy [{}], using p2", s);
                Self::P2
            }
        }
    }

    /// Length of the live-set prefix this strategy samples from.
    ///
    /// The deterministic strategies (`rr`, `hash`) and the re-drawing one
    /// (`la`) are resolved by the registry itself; their prefix is 1 so a
    /// plain draw degrades to the best resolver.
    pub fn prefix(&self, servers_count: usize) -> usize {
        let k = match self {
            Self::First | Self::RoundRobin | Self::Hash | Self::LocationAvoidant => 1,
            Self::Random => servers_count,
            Self::P2 => servers_count.min(2),
            Self::PN(n) => servers_count.min(*n),
            Self::PH => servers_count.min(2).max(servers_count / 2),
        };
        k.max(1)
    }

    /// Draw a candidate index in `[0, servers_count)`.
    pub fn get_candidate(&self, rng: &mut StdRng, servers_count: usize) -> usize {
        rng.gen_range(0..self.prefix(servers_count))
    }
}

/// 32-bit FNV-1a over `data`.
pub fn fnv1a_32(data: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &b in data {
        hash ^= u32::from(b);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Second-level domain of `qname`: the last two labels joined by a dot.
///
/// Multi-label public suffixes are not consulted, so `a.b.example.co.uk`
/// yields `co.uk`. Returns `None` when the name has fewer than two labels.
pub fn parse_sld(qname: &str) -> Option<String> {
    let labels: Vec<&str> = qname.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() < 2 {
        return None;
    }
    Some(format!(
        "{}.{}",
        labels[labels.len() - 2],
        labels[labels.len() - 1]
    ))
}
