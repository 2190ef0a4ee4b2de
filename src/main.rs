use anyhow::{Context, Result};
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use feedcast::config::Config;
use feedcast::feed::HttpFeedFetcher;
use feedcast::publish::Publisher;
use feedcast::scheduler::{send_startup_check, Scheduler};
use feedcast::sources::default_sources;
use feedcast::storage::DedupStore;
use feedcast::telegram::TelegramClient;

#[derive(Parser, Debug)]
#[command(
    name = "feedcast",
    about = "Publish the newest item of each configured feed to a Telegram channel"
)]
struct Args {
    /// Optional TOML config file (environment variables take precedence)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run a single publish cycle after the startup check, then exit
    #[arg(long)]
    once: bool,

    /// Skip the startup confirmation message
    #[arg(long)]
    no_startup_check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Invalid configuration")?;
    tracing::debug!(config = ?config, "Configuration loaded");

    let bot_token: SecretString = config.bot_token.take().context("BOT_TOKEN is required")?;

    let http = reqwest::Client::builder()
        .user_agent(concat!("feedcast/", env!("CARGO_PKG_VERSION")))
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(Duration::from_secs(30)) // Whole request, body included
        .build()
        .context("Failed to build HTTP client")?;

    let transport = Arc::new(
        TelegramClient::new(http.clone(), bot_token, config.channel_id.clone())
            .with_api_base(config.telegram_api_base.clone()),
    );
    let fetcher = Arc::new(HttpFeedFetcher::new(http));
    let store = DedupStore::new(config.seen_path.clone());

    let publisher = Arc::new(
        Publisher::new(
            default_sources(),
            fetcher,
            transport,
            store,
            config.default_animation_url.clone(),
        )
        .with_pacing_delay(config.pacing_delay()),
    );

    if !args.no_startup_check {
        send_startup_check(publisher.transport()).await;
    }

    if args.once {
        let stats = publisher.run_cycle().await;
        println!(
            "Cycle complete: {} published, {} text-only, {} skipped, {} failed",
            stats.published, stats.degraded, stats.skipped, stats.failed
        );
        return Ok(());
    }

    tracing::info!(
        interval_hours = config.interval_hours,
        channel = %config.channel_id,
        "Publisher running"
    );

    let scheduler = Scheduler::new(publisher, config.interval());
    scheduler
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await;

    println!("Goodbye!");
    Ok(())
}
