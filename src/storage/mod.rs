//! Storage abstractions for the board snapshot.
//!
//! The snapshot is the ordered list of posts seen on the previous run, one
//! `title|url` record per line:
//!
//! ```text
//! storage/
//! ├── config.toml    # Notifier configuration
//! └── data.txt       # Board snapshot, replaced wholesale every run
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PostIdentity;

pub use local::LocalStorage;

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the previous snapshot; an absent snapshot loads as empty.
    async fn load_snapshot(&self) -> Result<Vec<PostIdentity>>;

    /// Replace the snapshot with `posts`.
    async fn save_snapshot(&self, posts: &[PostIdentity]) -> Result<()>;
}
