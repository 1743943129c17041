//! Diff calculation for board notifications.
//!
//! Compares the freshly scraped top of the board against the previous
//! snapshot and decides which posts are new.
//!
//! | previous  | current   | outcome                                  |
//! |-----------|-----------|------------------------------------------|
//! | any       | empty     | `Skipped`, snapshot untouched            |
//! | empty     | non-empty | `ColdStart`, nothing sent, snapshot set  |
//! | non-empty | non-empty | `Warm`, unseen posts sent, snapshot set  |

use std::collections::HashSet;

use crate::models::PostIdentity;

/// Result of comparing the current board against the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// Nothing scraped; treat as a transient failure and keep the old snapshot
    Skipped,

    /// No previous snapshot; adopt the current posts silently
    ColdStart { snapshot: Vec<PostIdentity> },

    /// Previous snapshot exists; report unseen posts
    Warm {
        new_posts: Vec<PostIdentity>,
        snapshot: Vec<PostIdentity>,
    },
}

impl DiffOutcome {
    /// Posts to announce, in board order.
    pub fn new_posts(&self) -> &[PostIdentity] {
        match self {
            DiffOutcome::Warm { new_posts, .. } => new_posts,
            _ => &[],
        }
    }

    /// Snapshot to persist, or `None` to leave the stored one alone.
    pub fn snapshot(&self) -> Option<&[PostIdentity]> {
        match self {
            DiffOutcome::Skipped => None,
            DiffOutcome::ColdStart { snapshot } | DiffOutcome::Warm { snapshot, .. } => {
                Some(snapshot)
            }
        }
    }

    /// Check if there is anything to announce.
    pub fn has_changes(&self) -> bool {
        !self.new_posts().is_empty()
    }
}

/// Calculator for new board posts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostDiffEngine;

impl PostDiffEngine {
    pub fn new() -> Self {
        Self
    }

    /// Calculate the diff between the previous snapshot and current posts.
    pub fn calculate(&self, previous: &[PostIdentity], current: &[PostIdentity]) -> DiffOutcome {
        if current.is_empty() {
            return DiffOutcome::Skipped;
        }

        let snapshot = current.to_vec();
        if previous.is_empty() {
            return DiffOutcome::ColdStart { snapshot };
        }

        let seen: HashSet<&PostIdentity> = previous.iter().collect();
        let new_posts = current
            .iter()
            .filter(|post| !seen.contains(post))
            .cloned()
            .collect();

        DiffOutcome::Warm {
            new_posts,
            snapshot,
        }
    }
}

/// Convenience function to calculate diff.
pub fn calculate_diff(previous: &[PostIdentity], current: &[PostIdentity]) -> DiffOutcome {
    PostDiffEngine::new().calculate(previous, current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(name: &str) -> PostIdentity {
        PostIdentity::new(name, format!("https://example.com/{}", name))
    }

    #[test]
    fn test_cold_start_is_silent() {
        let current = vec![post("A"), post("B")];

        let result = calculate_diff(&[], &current);
        assert!(!result.has_changes());
        assert_eq!(result.snapshot(), Some(current.as_slice()));
        assert!(matches!(result, DiffOutcome::ColdStart { .. }));
    }

    #[test]
    fn test_new_post_on_top() {
        let prev = vec![post("A"), post("B")];
        let curr = vec![post("C"), post("A"), post("B")];

        let result = calculate_diff(&prev, &curr);
        assert_eq!(result.new_posts(), &[post("C")]);
        assert_eq!(result.snapshot(), Some(curr.as_slice()));
    }

    #[test]
    fn test_no_changes() {
        let prev = vec![post("A"), post("B")];
        let result = calculate_diff(&prev, &prev);
        assert!(!result.has_changes());
        assert_eq!(result.snapshot(), Some(prev.as_slice()));
    }

    #[test]
    fn test_empty_scrape_keeps_snapshot() {
        let prev = vec![post("A")];
        let result = calculate_diff(&prev, &[]);
        assert_eq!(result, DiffOutcome::Skipped);
        assert_eq!(result.snapshot(), None);

        assert_eq!(calculate_diff(&[], &[]), DiffOutcome::Skipped);
    }

    #[test]
    fn test_new_posts_keep_board_order() {
        let prev = vec![post("A"), post("B")];
        let curr = vec![post("E"), post("D"), post("A"), post("C")];

        let result = calculate_diff(&prev, &curr);
        assert_eq!(result.new_posts(), &[post("E"), post("D"), post("C")]);
    }

    #[test]
    fn test_identity_is_exact_pair() {
        let prev = vec![PostIdentity::new("A", "https://example.com/1")];
        let curr = vec![
            PostIdentity::new("A", "https://example.com/2"),
            PostIdentity::new("A ", "https://example.com/1"),
        ];

        let result = calculate_diff(&prev, &curr);
        assert_eq!(result.new_posts().len(), 2);
    }

    #[test]
    fn test_post_dropping_off_is_not_reported() {
        let prev = vec![post("A"), post("B"), post("C")];
        let curr = vec![post("A"), post("B")];

        let result = calculate_diff(&prev, &curr);
        assert!(!result.has_changes());
        assert_eq!(result.snapshot(), Some(curr.as_slice()));
    }
}
