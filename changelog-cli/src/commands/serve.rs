use anyhow::Result;
use changelog_server::{ChangelogServer, ServerConfig};
use colored::Colorize;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub async fn run(host: Option<String>, port: Option<u16>, db: Option<PathBuf>) -> Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(db) = db {
        config.db_path = db;
    }

    let addr = config.addr()?;

    println!("{}", "🚀 Starting changelog server...".bold().cyan());
    println!("   {}: {:?}", "Database".bold(), config.db_path);

    let server = ChangelogServer::new(&config)?;
    let listener = TcpListener::bind(addr).await?;

    println!(
        "   {}: {}",
        "API Server".bold(),
        format!("http://{}", listener.local_addr()?).green()
    );
    println!();
    println!("{}", "Press Ctrl+C to stop".dimmed());
    println!();

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        on_signal.cancel();
    });

    server.serve_until(listener, shutdown).await
}
