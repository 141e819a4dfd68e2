use super::{with_spinner, Remote};
use crate::display;
use anyhow::Result;
use changelog_sdk::PublicViewController;
use colored::Colorize;

pub async fn run(remote: &Remote, published: bool) -> Result<()> {
    if published {
        return public(remote).await;
    }

    let dashboard = remote.dashboard().await?;
    let changelogs = dashboard.changelogs();

    if changelogs.is_empty() {
        println!("{}", "No changelogs yet".yellow());
        return Ok(());
    }

    println!("{}", "Changelogs".bold().cyan());
    println!();
    for changelog in &changelogs {
        display::print_summary(changelog);
    }

    let drafts = changelogs.iter().filter(|c| c.is_draft()).count();
    println!();
    println!(
        "{} total, {} draft(s)",
        changelogs.len().to_string().cyan(),
        drafts.to_string().yellow()
    );

    Ok(())
}

/// What end users see: published entries, newest first, fully rendered.
async fn public(remote: &Remote) -> Result<()> {
    let view = PublicViewController::new(remote.repository()?);
    with_spinner("Loading release notes...", view.init()).await?;

    let changelogs = view.changelogs();
    if changelogs.is_empty() {
        println!("{}", "No release notes published yet".yellow());
        return Ok(());
    }

    for changelog in &changelogs {
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "{}",
            changelog.created_at.format("%Y-%m-%d").to_string().dimmed()
        );
        display::print_markdown(&changelog.generated_content);
        println!();
    }

    Ok(())
}
