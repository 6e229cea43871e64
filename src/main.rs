//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `xkcd_client` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Caller-side retries of transient failures
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::future::Future;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tokio_retry::RetryIf;

use xkcd_client::config::Opt;
use xkcd_client::initialization::init_logger_with;
use xkcd_client::{get_retry_strategy, CancellationToken, Comic, XkcdClient, XkcdError};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let shutdown = CancellationToken::new();
    let client = XkcdClient::new(opt.client_config())
        .context("Failed to initialize HTTP client")?
        .with_cancellation(shutdown.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight request");
            shutdown.cancel();
        }
    });

    if let Err(e) = run(&opt, &client).await {
        eprintln!("{:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(opt: &Opt, client: &XkcdClient) -> Result<()> {
    let comic = match opt.id {
        Some(id) if !opt.random => {
            with_retries(opt.retries, move || client.fetch_comic(id)).await?
        }
        _ => with_retries(opt.retries, move || client.fetch_random_comic()).await?,
    };

    print_comic(opt, &comic)?;

    if let Some(path) = &opt.download {
        let comic = &comic;
        let saved =
            with_retries(opt.retries, move || comic.download_image(client, path)).await?;
        info!("Image written to {}", saved.display());
    }
    Ok(())
}

fn print_comic(opt: &Opt, comic: &Comic) -> Result<()> {
    if opt.json {
        let json = serde_json::to_string_pretty(comic).context("Failed to serialize comic")?;
        println!("{}", json);
    } else if opt.dump {
        println!("{}", comic.to_pretty_string());
    } else {
        println!("[{}]: \"{}\"\n{}", comic.date_label(), comic.title(), comic.img());
    }
    Ok(())
}

/// Runs `action` again after a backoff delay while it fails with a retriable error.
async fn with_retries<T, F, Fut>(retries: usize, mut action: F) -> Result<T, XkcdError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, XkcdError>>,
{
    let mut attempt = 0usize;
    RetryIf::spawn(
        get_retry_strategy(retries),
        || {
            attempt += 1;
            if attempt > 1 {
                info!("Retrying (attempt {} of {})", attempt, retries + 1);
            }
            action()
        },
        |e: &XkcdError| {
            let retry = e.is_retriable();
            if retry {
                warn!("Transient failure: {}", e);
            }
            retry
        },
    )
    .await
}
