//! # giraartnetd
//!
//! Bridges one Art-Net universe to the data points of a home-automation
//! server, so a lighting console can drive dimmers, RGBW lights and
//! switches like ordinary DMX fixtures.
//!
//! # Usage
//!
//! ```bash
//! # Run against the server configured in ./config.json
//! giraartnetd
//!
//! # Offline, with a saved UI configuration; pushes are printed as JSON
//! giraartnetd --fake-uiconfig uiconfig.json
//!
//! # Debug logging, raw universe dumps, every pushed value
//! giraartnetd -d -D -v
//! ```

mod logging_setup;

use anyhow::{Context, Result};
use artgira_control::{resolve_interface, ArtNetNode, FakeClient, NodeConfig, RestClient};
use artgira_core::{
    build_channel_table, AutomationClient, BuildOptions, Config, FrameReceiver, SharedUniverse,
    SyncEngine,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Art-Net to home-automation bridge
#[derive(Parser, Debug)]
#[command(name = "giraartnetd")]
#[command(version)]
#[command(about = "Drive home-automation dimmers and switches from an Art-Net universe")]
#[command(long_about = None)]
struct Args {
    /// Path to the bridge configuration
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Path to fake uiconfig (no server access, pushes go to stdout)
    #[arg(long, value_name = "FILE")]
    fake_uiconfig: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    debug: bool,

    /// Dump raw universe data
    #[arg(short = 'D', long)]
    dump: bool,

    /// Log every pushed value
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging_setup::init(args.debug) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    info!("giraartnetd v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::load_file(&args.config)
        .with_context(|| format!("Failed to load config {:?}", args.config))?;
    config.validate()?;
    debug!("{:?}", config);

    let client: Arc<dyn AutomationClient> = match &args.fake_uiconfig {
        Some(path) => {
            info!("Using fake uiconfig {:?}", path);
            let fake = FakeClient::from_file(path)
                .with_context(|| format!("Failed to load fake uiconfig {:?}", path))?;
            Arc::new(fake.with_echo(true))
        }
        None => Arc::new(RestClient::new(&config)?),
    };

    let ui = client
        .ui_config()
        .await
        .context("Failed to fetch UI configuration")?;

    // an unknown channel type aborts here, before anything is synchronized
    let layout = build_channel_table(&ui, &BuildOptions::from(&config))?;

    for fixture in &layout.fixtures {
        debug!(
            "fixture {:?} ({}) at {}: {} channels",
            fixture.name,
            fixture.uid,
            fixture.offset + 1,
            fixture.channels.len()
        );
    }
    for line in layout.table.channel_listing(config.artnet.sub_uni) {
        println!("{}", line);
    }

    let ip = resolve_interface(&config.artnet.network)?;

    let universe = Arc::new(SharedUniverse::new());
    let receiver = FrameReceiver::new(config.artnet.net, config.artnet.sub_uni, universe.clone())
        .with_dump(args.dump);

    let node = ArtNetNode::bind(NodeConfig::new(
        ip,
        config.artnet.net,
        config.artnet.sub_uni,
    ))
    .await
    .context("cannot start Art-Net node")?;

    let engine = SyncEngine::new(Arc::new(layout.table), universe, client)
        .with_interval(config.sync_interval())
        .with_push_timeout(config.push_timeout())
        .with_verbose(args.verbose);

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal"),
            Err(e) => {
                error!("Cannot listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    // the node only stops when the sync loop does
    tokio::select! {
        _ = node.run(move |frame| {
            receiver.handle_frame(frame);
        }) => {}
        _ = engine.run(shutdown) => {}
    }

    info!("giraartnetd stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["giraartnetd"]);
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert!(args.fake_uiconfig.is_none());
        assert!(!args.debug && !args.dump && !args.verbose);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "giraartnetd",
            "-d",
            "-D",
            "-v",
            "--fake-uiconfig",
            "ui.json",
        ]);
        assert!(args.debug && args.dump && args.verbose);
        assert_eq!(args.fake_uiconfig, Some(PathBuf::from("ui.json")));
    }
}
