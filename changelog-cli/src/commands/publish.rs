use super::{with_spinner, Remote};
use crate::display;
use anyhow::Result;
use colored::Colorize;
use uuid::Uuid;

pub async fn run(remote: &Remote, id: Uuid, published: bool) -> Result<()> {
    let dashboard = remote.dashboard().await?;

    let message = if published {
        "Publishing..."
    } else {
        "Unpublishing..."
    };
    let changelog = with_spinner(message, dashboard.set_published(id, published)).await?;

    println!(
        "{} v{} {} is now {}",
        "✓".green(),
        changelog.version,
        changelog.title.bold(),
        display::status_label(&changelog)
    );

    Ok(())
}
