use super::{read_diff, report_field_errors, with_spinner, Remote};
use crate::display;
use anyhow::Result;
use changelog_core::ChangelogInput;
use changelog_sdk::DashboardController;
use colored::Colorize;
use std::path::PathBuf;

pub async fn run(
    remote: &Remote,
    version: String,
    title: String,
    description: Option<String>,
    diff: Option<PathBuf>,
) -> Result<()> {
    let input = ChangelogInput {
        version,
        title,
        description,
        git_diff: read_diff(diff)?,
    };

    let dashboard = DashboardController::new(remote.repository()?);
    dashboard.new_changelog();

    let created = match with_spinner("Creating changelog...", dashboard.submit(input)).await {
        Ok(created) => created,
        Err(e) => {
            println!("{}", "Changelog not created".red().bold());
            report_field_errors(&e);
            return Err(e.into());
        }
    };

    println!(
        "{}",
        format!("✓ Created draft {}", created.id).green().bold()
    );
    println!();
    display::print_changelog(&created);
    println!();
    println!(
        "Run {} to make it visible",
        format!("changelog publish {}", created.id).cyan()
    );

    Ok(())
}
