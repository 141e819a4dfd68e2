use super::Remote;
use anyhow::Result;
use changelog_core::{Changelog, ChangelogId};
use changelog_sdk::DeleteOutcome;
use colored::Colorize;
use uuid::Uuid;

pub async fn run(remote: &Remote, id: Uuid, yes: bool) -> Result<()> {
    let dashboard = remote.dashboard().await?;

    let confirm = move |id: ChangelogId, changelog: Option<&Changelog>| -> bool {
        if yes {
            return true;
        }

        let prompt = match changelog {
            Some(c) => format!("Delete v{} {}?", c.version, c.title),
            None => format!("Delete changelog {}?", id),
        };

        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    };

    // No spinner here: it would draw over the confirmation prompt.
    let outcome = dashboard.delete(id, confirm).await?;

    match outcome {
        DeleteOutcome::Deleted => println!("{}", format!("✓ Deleted {}", id).green().bold()),
        DeleteOutcome::Cancelled => println!("{}", "Delete cancelled".yellow()),
    }

    Ok(())
}
