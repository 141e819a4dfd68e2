//! End-user view: the published changelogs, read-only.

use crate::repository::ChangelogRepository;
use changelog_core::{Changelog, ChangelogFilter, Result};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicSnapshot {
    /// Exactly what the server returned for `published_only = true`.
    pub changelogs: Vec<Changelog>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

pub struct PublicViewController<R> {
    repository: R,
    state: Mutex<PublicSnapshot>,
}

impl<R: ChangelogRepository> PublicViewController<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            state: Mutex::new(PublicSnapshot::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PublicSnapshot> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetches the published list once per view. Later calls are no-ops
    /// after a successful load; after a failure they retry.
    ///
    /// A call made while another is still loading returns `Ok(())` at once
    /// without waiting; check [`PublicSnapshot::loading`] before treating an
    /// empty list as "nothing published".
    pub async fn init(&self) -> Result<()> {
        {
            let mut state = self.lock();
            if state.loaded || state.loading {
                debug!("Public view already initialized");
                return Ok(());
            }
            state.loading = true;
        }

        let result = self.repository.list(ChangelogFilter::published_only()).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(changelogs) => {
                info!(count = changelogs.len(), "Public view loaded");
                state.changelogs = changelogs;
                state.loaded = true;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load published changelogs");
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn changelogs(&self) -> Vec<Changelog> {
        self.lock().changelogs.clone()
    }

    pub fn snapshot(&self) -> PublicSnapshot {
        self.lock().clone()
    }
}
