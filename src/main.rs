use std::process::ExitCode;

use catalog_cascade::catalog::RetryPolicy;
use catalog_cascade::effects::CatalogExecutor;
use catalog_cascade::session::{Command, FilterSession, SessionConfig, TerminalHost, parse_command};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_cascade=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SessionConfig::from_env();
    let client = match config.catalog_client() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build catalog client");
            return ExitCode::FAILURE;
        }
    };
    info!(base_url = %config.base_url, "Using catalog backend");

    let shutdown = CancellationToken::new();
    let executor = CatalogExecutor::new(
        client,
        config.retry,
        RetryPolicy::RetryTransient,
        shutdown.clone(),
    );
    let session = FilterSession::new(TerminalHost::new(std::io::stdout()))
        .fetching_categories(config.load_categories);
    let (handle, task) = session.spawn(executor, config.channel_capacity, shutdown.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "Failed to read stdin");
                break;
            }
        };

        let sent = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Select(event))) => handle.select(event).await,
            Ok(Some(Command::Show)) => handle.show().await,
            Ok(Some(Command::Quit)) => break,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        if let Err(e) = sent {
            error!(error = %e, "Session is no longer running");
            break;
        }
    }

    let _ = handle.shutdown().await;
    shutdown.cancel();

    match task.await {
        Ok(session) => {
            info!(state = %session.state(), "Exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Session task failed");
            ExitCode::FAILURE
        }
    }
}
