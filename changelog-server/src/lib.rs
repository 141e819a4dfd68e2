//! # changelog-server
//!
//! Reference REST server for changelog: the `/api/changelogs/` collection
//! resource over SQLite storage.

pub mod api;
pub mod config;
pub mod server;

pub use config::ServerConfig;
pub use server::ChangelogServer;
