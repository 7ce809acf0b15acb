use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tabclick_cdp::{list_targets, run_click, select_target, CdpChannel};
use tabclick_core::{Config, Error};

#[derive(Parser)]
#[command(name = "tabclick")]
#[command(about = "Click a UI element in a running browser via the DevTools protocol", long_about = None)]
#[command(version)]
struct Cli {
    /// Remote debugging port the browser was started with
    #[arg(short, long)]
    port: Option<u16>,

    /// Substring the target page URL must contain
    #[arg(short, long)]
    filter: Option<String>,

    /// CSS selector of the element to click
    #[arg(short, long)]
    selector: Option<String>,

    /// Seconds to wait for each command reply
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut cfg = Config::default();
        if let Some(port) = self.port {
            cfg.debug_port = port;
        }
        if let Some(filter) = self.filter {
            cfg.target_filter = filter;
        }
        if let Some(selector) = self.selector {
            cfg.selector = selector;
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }
        cfg
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let cfg = cli.into_config();

    let targets = list_targets(cfg.debug_port).await?;
    let target = select_target(&targets, &cfg.target_filter).ok_or_else(|| {
        Error::Discovery(format!(
            "no page target matching '{}' on port {}",
            cfg.target_filter, cfg.debug_port
        ))
    })?;
    let ws_url = target.ws_url.as_deref().ok_or_else(|| {
        Error::Discovery(format!("target '{}' has no WebSocket debugger URL", target.url))
    })?;

    info!(url = %target.url, "selected page target");

    let mut channel =
        CdpChannel::connect(ws_url, Duration::from_secs(cfg.timeout_secs)).await?;
    let result = run_click(&mut channel, &cfg.selector).await;
    channel.close().await;

    println!("{}", result?);
    Ok(())
}
