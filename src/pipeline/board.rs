// src/pipeline/board.rs

//! Notice board pipeline.

use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, PostIdentity};
use crate::services::{BoardScraper, Notifier, message};
use crate::storage::SnapshotStore;

use super::diff::{DiffOutcome, PostDiffEngine};

/// Summary of a board run.
#[derive(Debug)]
pub struct BoardOutcome {
    pub diff: DiffOutcome,

    /// Number of messages delivered
    pub sent: usize,
}

/// Diff `current` against the stored snapshot, announce new posts, then
/// persist.
///
/// Every announcement is sent before the snapshot is written, so a delivery
/// failure leaves the old snapshot in place and the posts are retried on the
/// next run.
pub async fn process_board(
    current: &[PostIdentity],
    template: &str,
    storage: &dyn SnapshotStore,
    notifier: &dyn Notifier,
) -> Result<BoardOutcome> {
    let previous = storage.load_snapshot().await?;
    let diff = PostDiffEngine::new().calculate(&previous, current);

    match &diff {
        DiffOutcome::Skipped => {
            log::warn!("No posts scraped; keeping the existing snapshot");
        }
        DiffOutcome::ColdStart { snapshot } => {
            log::info!(
                "No previous snapshot; recording {} posts without notifying",
                snapshot.len()
            );
        }
        DiffOutcome::Warm { new_posts, .. } if new_posts.is_empty() => {
            log::info!("No new posts");
        }
        DiffOutcome::Warm { .. } => {}
    }

    let mut sent = 0;
    for post in diff.new_posts() {
        log::info!("New post: {}", post.title);
        notifier.send(&message::post_message(template, post)).await?;
        sent += 1;
    }
    if sent > 0 {
        log::info!("Sent {} new post notifications", sent);
    }

    if let Some(snapshot) = diff.snapshot() {
        storage.save_snapshot(snapshot).await?;
    }

    Ok(BoardOutcome { diff, sent })
}

/// Run the board pipeline: fetch, diff, notify, persist.
pub async fn run_board(
    config: &Config,
    client: &Client,
    storage: &dyn SnapshotStore,
    notifier: &dyn Notifier,
) -> Result<BoardOutcome> {
    let scraper = BoardScraper::new(config.board.clone());
    let current = scraper.fetch(client).await?;
    process_board(&current, &config.board.template, storage, notifier).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::services::Message;
    use crate::storage::LocalStorage;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, message: &Message) -> Result<()> {
            if self.fail {
                return Err(AppError::notify("offline"));
            }
            self.sent.lock().unwrap().push(message.text.clone());
            Ok(())
        }
    }

    fn post(name: &str) -> PostIdentity {
        PostIdentity::new(name, format!("https://example.com/{}", name))
    }

    fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path().join("data.txt"))
    }

    #[tokio::test]
    async fn test_cold_then_warm() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        let notifier = RecordingNotifier::default();

        let first = vec![post("A"), post("B")];
        let outcome = process_board(&first, "{title}", &storage, &notifier)
            .await
            .unwrap();
        assert_eq!(outcome.sent, 0);
        assert_eq!(storage.load_snapshot().await.unwrap(), first);

        let second = vec![post("C"), post("A"), post("B")];
        let outcome = process_board(&second, "{title} {url}", &storage, &notifier)
            .await
            .unwrap();
        assert_eq!(outcome.sent, 1);
        assert_eq!(
            *notifier.sent.lock().unwrap(),
            vec!["C https://example.com/C".to_string()]
        );
        assert_eq!(storage.load_snapshot().await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_empty_scrape_leaves_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        let notifier = RecordingNotifier::default();
        let existing = vec![post("A")];
        storage.save_snapshot(&existing).await.unwrap();

        let outcome = process_board(&[], "{title}", &storage, &notifier)
            .await
            .unwrap();
        assert_eq!(outcome.diff, DiffOutcome::Skipped);
        assert_eq!(storage.load_snapshot().await.unwrap(), existing);
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_old_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        let notifier = RecordingNotifier {
            fail: true,
            ..RecordingNotifier::default()
        };
        let existing = vec![post("A")];
        storage.save_snapshot(&existing).await.unwrap();

        let result = process_board(&[post("B"), post("A")], "{title}", &storage, &notifier).await;
        assert!(matches!(result, Err(AppError::Notify(_))));
        assert_eq!(storage.load_snapshot().await.unwrap(), existing);
    }
}
