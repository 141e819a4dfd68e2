//! In-process [`ChangelogRepository`] for deterministic tests and offline use.
//!
//! Behaves like the REST server (newest first, template content, `NotFound`
//! for unknown ids) and adds test controls: injected failures, a record of
//! every call, and a gate that holds calls until released so tests can
//! choose the order in which responses arrive.
//!
//! ```
//! use changelog_core::{ChangelogFilter, ChangelogInput};
//! use changelog_sdk::{ChangelogRepository, MemoryRepository};
//!
//! # tokio_test_block_on(async {
//! let repository = MemoryRepository::new();
//! let created = repository
//!     .create(ChangelogInput::new("1.0.0", "Launch"))
//!     .await
//!     .unwrap();
//!
//! assert!(!created.published);
//! assert!(repository.list(ChangelogFilter::published_only()).await.unwrap().is_empty());
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use crate::repository::ChangelogRepository;
use async_trait::async_trait;
use changelog_core::{
    validate, Changelog, ChangelogFilter, ChangelogId, ChangelogInput, ContentGenerator, Error,
    Result, TemplateGenerator,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    /// Newest first, like the server's listing order.
    changelogs: Vec<Changelog>,
    fail_on: Option<FailOn>,
    operations: Vec<Operation>,
    gate: Option<Arc<Semaphore>>,
}

/// Which kind of call should fail with a 500-style `Request` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    List,
    Get,
    Create,
    Update,
    SetPublished,
    Remove,
}

/// A call as the repository received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List(ChangelogFilter),
    Get(ChangelogId),
    Create(ChangelogInput),
    Update(ChangelogId, ChangelogInput),
    SetPublished(ChangelogId, bool),
    Remove(ChangelogId),
}

impl Operation {
    fn kind(&self) -> FailOn {
        match self {
            Operation::List(_) => FailOn::List,
            Operation::Get(_) => FailOn::Get,
            Operation::Create(_) => FailOn::Create,
            Operation::Update(..) => FailOn::Update,
            Operation::SetPublished(..) => FailOn::SetPublished,
            Operation::Remove(_) => FailOn::Remove,
        }
    }
}

/// Holds calls made while it is installed; each `release` lets one through.
#[derive(Debug, Clone)]
pub struct Gate {
    semaphore: Arc<Semaphore>,
}

impl Gate {
    pub fn release(&self) {
        self.semaphore.add_permits(1);
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds stored entries directly, bypassing generation. Order is kept.
    pub fn with_changelogs(changelogs: Vec<Changelog>) -> Self {
        let repository = Self::default();
        repository.lock().changelogs = changelogs;
        repository
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn fail_on(&self, kind: FailOn) {
        self.lock().fail_on = Some(kind);
    }

    pub fn clear_failure(&self) {
        self.lock().fail_on = None;
    }

    /// Every call received so far, in arrival order.
    pub fn operations(&self) -> Vec<Operation> {
        self.lock().operations.clone()
    }

    /// Calls issued from now on wait for a [`Gate::release`] before executing.
    pub fn hold(&self) -> Gate {
        let semaphore = Arc::new(Semaphore::new(0));
        self.lock().gate = Some(Arc::clone(&semaphore));
        Gate { semaphore }
    }

    /// Later calls run immediately; calls already held still need a release.
    pub fn resume(&self) {
        self.lock().gate = None;
    }

    /// Current server-side contents, newest first.
    pub fn stored(&self) -> Vec<Changelog> {
        self.lock().changelogs.clone()
    }

    /// Records the call, waits at the gate if one is installed, then runs
    /// `apply` against the stored state as it is at that moment.
    async fn call<T>(
        &self,
        operation: Operation,
        apply: impl FnOnce(&mut Vec<Changelog>) -> Result<T>,
    ) -> Result<T> {
        let kind = operation.kind();
        let gate = {
            let mut inner = self.lock();
            inner.operations.push(operation);
            inner.gate.clone()
        };

        if let Some(gate) = gate {
            gate.acquire()
                .await
                .map_err(|e| Error::request(None, e.to_string()))?
                .forget();
        }

        let mut inner = self.lock();
        if inner.fail_on == Some(kind) {
            return Err(Error::request(Some(500), format!("injected {:?} failure", kind)));
        }
        apply(&mut inner.changelogs)
    }
}

fn find(changelogs: &mut [Changelog], id: ChangelogId) -> Result<&mut Changelog> {
    changelogs
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

#[async_trait]
impl ChangelogRepository for MemoryRepository {
    async fn list(&self, filter: ChangelogFilter) -> Result<Vec<Changelog>> {
        self.call(Operation::List(filter), |changelogs| {
            Ok(changelogs
                .iter()
                .filter(|c| filter.matches(c))
                .cloned()
                .collect())
        })
        .await
    }

    async fn get(&self, id: ChangelogId) -> Result<Changelog> {
        self.call(Operation::Get(id), |changelogs| {
            find(changelogs, id).map(|c| c.clone())
        })
        .await
    }

    async fn create(&self, input: ChangelogInput) -> Result<Changelog> {
        validate(&input).into_result()?;

        self.call(Operation::Create(input.clone()), |changelogs| {
            let content = TemplateGenerator.generate(&input);
            let changelog = Changelog::new(input, content);
            changelogs.insert(0, changelog.clone());
            Ok(changelog)
        })
        .await
    }

    async fn update(&self, id: ChangelogId, input: ChangelogInput) -> Result<Changelog> {
        validate(&input).into_result()?;

        self.call(Operation::Update(id, input.clone()), |changelogs| {
            let changelog = find(changelogs, id)?;
            let content = TemplateGenerator.generate(&input);
            changelog.apply_input(input, content);
            Ok(changelog.clone())
        })
        .await
    }

    async fn set_published(&self, id: ChangelogId, published: bool) -> Result<Changelog> {
        self.call(Operation::SetPublished(id, published), |changelogs| {
            let changelog = find(changelogs, id)?;
            changelog.published = published;
            Ok(changelog.clone())
        })
        .await
    }

    async fn remove(&self, id: ChangelogId) -> Result<()> {
        self.call(Operation::Remove(id), |changelogs| {
            let index = changelogs
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            changelogs.remove(index);
            Ok(())
        })
        .await
    }
}
