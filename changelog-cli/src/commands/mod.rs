pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod publish;
pub mod serve;
pub mod show;

use anyhow::{Context, Result};
use changelog_sdk::{ClientConfig, DashboardController, HttpRepository};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection settings shared by every client command.
pub struct Remote {
    config: ClientConfig,
}

impl Remote {
    pub fn new(server: String, timeout_secs: u64) -> Self {
        Self {
            config: ClientConfig::new(server).with_timeout(Duration::from_secs(timeout_secs)),
        }
    }

    pub fn repository(&self) -> Result<HttpRepository> {
        HttpRepository::new(&self.config).context("Failed to create HTTP client")
    }

    /// A dashboard with the full list already fetched.
    pub async fn dashboard(&self) -> Result<DashboardController<HttpRepository>> {
        let dashboard = DashboardController::new(self.repository()?);
        with_spinner("Loading changelogs...", dashboard.load())
            .await
            .with_context(|| format!("Failed to reach {}", self.config.base_url))?;
        Ok(dashboard)
    }
}

/// Shows a spinner on stderr while `work` is pending.
pub async fn with_spinner<F: Future>(message: &str, work: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let output = work.await;

    spinner.finish_and_clear();
    output
}

/// Reads a pasted git diff from a file, or from stdin when the path is `-`.
pub fn read_diff(source: Option<PathBuf>) -> Result<Option<String>> {
    let Some(path) = source else {
        return Ok(None);
    };

    if path == Path::new("-") {
        let mut diff = String::new();
        std::io::stdin()
            .read_to_string(&mut diff)
            .context("Failed to read diff from stdin")?;
        return Ok(Some(diff));
    }

    let diff = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read diff from {:?}", path))?;
    Ok(Some(diff))
}

/// Prints per-field messages when `err` is a validation failure.
pub fn report_field_errors(err: &changelog_core::Error) {
    if let changelog_core::Error::Validation(report) = err {
        for (field, message) in &report.errors {
            println!("  {} {}: {}", "✗".red(), field.to_string().bold(), message);
        }
    }
}
