//! Local filesystem snapshot storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::PostIdentity;
use crate::storage::SnapshotStore;

/// Snapshot kept in a plain text file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read the file, returning None if it doesn't exist.
    async fn read_string(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

/// Parse snapshot lines, skipping blanks and records without a delimiter.
pub fn parse_snapshot(content: &str) -> Vec<PostIdentity> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| {
            let post = PostIdentity::from_line(line);
            if post.is_none() {
                log::warn!("Skipping malformed snapshot line {}: {:?}", i + 1, line);
            }
            post
        })
        .collect()
}

/// Render posts as snapshot lines.
pub fn render_snapshot(posts: &[PostIdentity]) -> String {
    posts
        .iter()
        .map(|post| format!("{}\n", post.to_line()))
        .collect()
}

#[async_trait]
impl SnapshotStore for LocalStorage {
    async fn load_snapshot(&self) -> Result<Vec<PostIdentity>> {
        match self.read_string().await? {
            Some(content) => {
                let posts = parse_snapshot(&content);
                log::debug!("Loaded {} posts from {}", posts.len(), self.path.display());
                Ok(posts)
            }
            None => {
                log::debug!("No snapshot at {}", self.path.display());
                Ok(Vec::new())
            }
        }
    }

    async fn save_snapshot(&self, posts: &[PostIdentity]) -> Result<()> {
        self.write_bytes(render_snapshot(posts).as_bytes()).await?;
        log::info!("Snapshot: {} posts written to {}", posts.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts() -> Vec<PostIdentity> {
        vec![
            PostIdentity::new("A", "https://x/a"),
            PostIdentity::new("B", "https://x/b"),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("data.txt"));
        assert!(storage.load_snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested/data.txt"));

        storage.save_snapshot(&posts()).await.unwrap();
        assert_eq!(storage.load_snapshot().await.unwrap(), posts());

        let raw = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(raw, "A|https://x/a\nB|https://x/b\n");
        assert!(!dir.path().join("nested/data.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_replaces_not_appends() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("data.txt"));

        storage.save_snapshot(&posts()).await.unwrap();
        let replacement = vec![PostIdentity::new("C", "https://x/c")];
        storage.save_snapshot(&replacement).await.unwrap();
        assert_eq!(storage.load_snapshot().await.unwrap(), replacement);
    }

    #[test]
    fn test_parse_snapshot_skips_garbage() {
        let parsed = parse_snapshot("A|https://x/a\n\n   \nbroken line\r\nB|https://x/b\r\n");
        assert_eq!(parsed, posts());
    }
}
