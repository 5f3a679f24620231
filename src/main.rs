//! Umbra - encrypted-DNS client proxy: resolver registry daemon.
//!
//! Loads the configured resolvers and relays, probes them, and keeps
//! their certificates and latency estimates fresh on a timer.

// Use jemalloc as the global allocator (Linux/macOS only, better performance)
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

use umbra::config::Config;
use umbra::transport::HttpsTransport;
use umbra::Proxy;

/// Umbra - encrypted-DNS client proxy with anonymizing relays and
/// latency-aware resolver selection.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(short = 'c', long = "config", default_value = "umbra.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    init_logging(&config.log_level)?;

    info!("Starting umbra");
    info!("Config loaded from: {:?}", args.config);
    info!(
        "{} server(s) and {} relay(s) configured",
        config.servers.len(),
        config.relays.len()
    );

    let transport = Arc::new(HttpsTransport::new());
    let proxy = Proxy::new(&config, transport, None).context("Failed to initialize proxy")?;

    let (live, err) = proxy.servers.refresh(&proxy).await;
    if live == 0 {
        match err {
            Some(err) => warn!("No usable resolvers yet: {}", err),
            None => warn!("No resolvers are configured"),
        }
    } else {
        info!("{} resolver(s) are available", live);
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(
        config.cert_refresh_delay_mins.max(1) * 60,
    ));
    // the interval fires immediately; the initial refresh already ran
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let (live, err) = proxy.servers.refresh(&proxy).await;
        if let Some(err) = err {
            warn!("Refresh finished with errors: {}", err);
        }
        debug!("{} resolver(s) are available", live);
    }
}

/// Initialize logging with the specified level
fn init_logging(level: &str) -> Result<()> {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(!cfg!(windows))
        .init();

    Ok(())
}
