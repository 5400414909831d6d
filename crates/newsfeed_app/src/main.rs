use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use feed_logging::{feed_error, feed_info, LogDestination};
use log::LevelFilter;
use newsfeed_app::commands::HELP;
use newsfeed_app::config::DEFAULT_CONFIG_FILENAME;
use newsfeed_app::render::render;
use newsfeed_app::{AppConfig, Command, Orchestrator};
use newsfeed_core::{NoticeKind, QuerySpec};
use newsfeed_engine::{Notifier, ReqwestFetcher, Subscription};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(author, version, about = "Terminal news feed backed by NewsAPI")]
struct Args {
    /// Path to the RON config file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,
    /// Log destination: file, terminal or both.
    #[arg(long)]
    log: Option<String>,
    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args.config)?.with_env_overrides();

    let destination = match args.log.as_deref() {
        Some(raw) => LogDestination::parse(raw)
            .with_context(|| format!("unknown log destination {raw:?}"))?,
        None => config.log_destination()?.unwrap_or_default(),
    };
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.log_level()?.unwrap_or(LevelFilter::Info)
    };
    feed_logging::initialize(destination, level, None);

    let fetch_settings = config.fetch_settings();
    if fetch_settings.api_key.is_none() {
        eprintln!("No API key configured; set NEWSAPI_KEY or api_key in the config file.");
    }
    let fetcher = ReqwestFetcher::new(fetch_settings).context("building HTTP client")?;

    let notifier = Notifier::global().clone();
    let notices = notifier.subscribe();
    let (orchestrator, handle) =
        Orchestrator::new(config.feed_settings()?, Arc::new(fetcher), notifier);
    let task = tokio::spawn(orchestrator.run());
    feed_info!("newsfeed started");

    handle.fetch_now(QuerySpec::default());

    let mut view_rx = handle.subscribe_view();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        tokio::select! {
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = view_rx.borrow_and_update().clone();
                print_notices(&notices);
                for line in render(&view, Utc::now()) {
                    println!("{line}");
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        feed_error!("stdin read failed: {}", err);
                        break;
                    }
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(command) => {
                        let view = handle.view();
                        if !command.apply(&handle, &view) {
                            break;
                        }
                    }
                    Err(err) => println!("{err}"),
                }
            }
        }
    }

    handle.shutdown();
    drop(handle);
    task.await.context("event loop panicked")?;
    print_notices(&notices);
    feed_info!("newsfeed stopped");
    Ok(())
}

fn print_notices(notices: &Subscription) {
    for notice in notices.drain() {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        println!("[{tag}] {}", notice.message);
    }
}
