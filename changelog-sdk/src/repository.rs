//! The client-side gateway to the changelog collection resource.

use async_trait::async_trait;
use changelog_core::{Changelog, ChangelogFilter, ChangelogId, ChangelogInput, Result};

/// Lifecycle intents against the server of record.
///
/// Every call is single-shot: it resolves to a complete entity (or `()` for
/// `remove`) or to an explicit error, never to a partial merge. `create` and
/// `update` reject input with a blank version or title before any request is
/// issued.
#[async_trait]
pub trait ChangelogRepository: Send + Sync {
    /// The full collection matching `filter`, in server order.
    async fn list(&self, filter: ChangelogFilter) -> Result<Vec<Changelog>>;

    async fn get(&self, id: ChangelogId) -> Result<Changelog>;

    /// A new draft with server-assigned id, content and timestamp.
    async fn create(&self, input: ChangelogInput) -> Result<Changelog>;

    /// Resubmits every field; the server regenerates `generated_content`.
    async fn update(&self, id: ChangelogId, input: ChangelogInput) -> Result<Changelog>;

    /// Changes only `published`. Repeating the same value is a no-op.
    async fn set_published(&self, id: ChangelogId, published: bool) -> Result<Changelog>;

    async fn remove(&self, id: ChangelogId) -> Result<()>;
}
