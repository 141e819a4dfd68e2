use super::{with_spinner, Remote};
use crate::display;
use anyhow::Result;
use changelog_sdk::ChangelogRepository;
use uuid::Uuid;

pub async fn run(remote: &Remote, id: Uuid) -> Result<()> {
    let repository = remote.repository()?;
    let changelog = with_spinner("Fetching changelog...", repository.get(id)).await?;

    display::print_changelog(&changelog);

    Ok(())
}
