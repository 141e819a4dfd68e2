use super::{read_diff, report_field_errors, with_spinner, Remote};
use crate::display;
use anyhow::{Context, Result};
use changelog_core::diff::ContentDiff;
use changelog_core::{Changelog, ChangelogInput};
use colored::Colorize;
use std::path::PathBuf;
use uuid::Uuid;

/// Fields given on the command line; `None` keeps the current value.
pub struct Changes {
    pub version: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub diff: Option<PathBuf>,
}

impl Changes {
    fn apply_to(self, current: &Changelog) -> Result<ChangelogInput> {
        let mut input = current.to_input();
        if let Some(version) = self.version {
            input.version = version;
        }
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(description) = self.description {
            input.description = Some(description);
        }
        if let Some(diff) = read_diff(self.diff)? {
            input.git_diff = Some(diff);
        }
        Ok(input)
    }
}

pub async fn run(remote: &Remote, id: Uuid, changes: Changes) -> Result<()> {
    let dashboard = remote.dashboard().await?;
    dashboard
        .select(id)
        .with_context(|| format!("No changelog with id {}", id))?;

    let before = dashboard
        .selected()
        .with_context(|| format!("No changelog with id {}", id))?;
    let input = changes.apply_to(&before)?;

    let updated = match with_spinner("Saving changelog...", dashboard.submit(input)).await {
        Ok(updated) => updated,
        Err(e) => {
            println!("{}", "Changelog not saved".red().bold());
            report_field_errors(&e);
            return Err(e.into());
        }
    };

    println!(
        "{}",
        format!("✓ Updated {} (v{})", updated.id, updated.version)
            .green()
            .bold()
    );
    println!();
    display::print_content_diff(&ContentDiff::between(
        &before.generated_content,
        &updated.generated_content,
    ));

    Ok(())
}
