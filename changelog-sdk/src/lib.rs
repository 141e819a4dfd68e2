//! # changelog-sdk
//!
//! Client-side state management for changelog.
//!
//! A [`ChangelogRepository`] talks to the server of record. The
//! [`DashboardController`] drives the developer view (create, edit, publish,
//! delete) over a [`ChangelogListStore`], and the [`PublicViewController`]
//! lists what end users may see.
//!
//! ## Example
//!
//! ```no_run
//! use changelog_core::ChangelogInput;
//! use changelog_sdk::{ClientConfig, DashboardController, HttpRepository};
//!
//! # async fn run() -> changelog_core::Result<()> {
//! let repository = HttpRepository::new(&ClientConfig::new("http://localhost:8000"))?;
//! let dashboard = DashboardController::new(repository);
//! dashboard.load().await?;
//!
//! dashboard.new_changelog();
//! let created = dashboard
//!     .submit(ChangelogInput::new("1.0.0", "Launch").with_description("First release"))
//!     .await?;
//! dashboard.set_published(created.id, true).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dashboard;
pub mod http;
pub mod memory;
pub mod public;
pub mod repository;
pub mod store;

pub use config::ClientConfig;
pub use dashboard::{Confirm, DashboardController, DashboardSnapshot, DeleteOutcome, Mode};
pub use http::HttpRepository;
pub use memory::MemoryRepository;
pub use public::{PublicSnapshot, PublicViewController};
pub use repository::ChangelogRepository;
pub use store::ChangelogListStore;
