// src/services/dedup.rs

//! Duplicate event removal.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::Event;

/// Drop events whose `(title, start)` pair was already seen, keeping the
/// first occurrence and the original order.
pub fn dedup_events(events: Vec<Event>) -> Vec<Event> {
    let before = events.len();
    let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();
    let mut deduped = Vec::with_capacity(before);

    for event in events {
        if seen.insert((event.title.clone(), event.start)) {
            deduped.push(event);
        }
    }

    if deduped.len() < before {
        log::debug!("Removed {} duplicate events", before - deduped.len());
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, m: u32, d: u32, end_d: u32) -> Event {
        Event::new(
            title,
            NaiveDate::from_ymd_opt(2026, m, d).unwrap(),
            NaiveDate::from_ymd_opt(2026, m, end_d).unwrap(),
        )
    }

    #[test]
    fn test_keeps_first_seen() {
        let events = vec![
            event("개강", 3, 2, 2),
            event("수강정정", 3, 3, 6),
            event("개강", 3, 2, 5),
            event("수강정정", 3, 3, 6),
        ];
        let deduped = dedup_events(events);
        assert_eq!(deduped, vec![event("개강", 3, 2, 2), event("수강정정", 3, 3, 6)]);
    }

    #[test]
    fn test_same_title_different_start_kept() {
        let events = vec![event("보강주간", 4, 20, 24), event("보강주간", 6, 8, 12)];
        assert_eq!(dedup_events(events.clone()), events);
    }

    #[test]
    fn test_exact_title_match_only() {
        let events = vec![event("개강", 3, 2, 2), event("개강 ", 3, 2, 2)];
        assert_eq!(dedup_events(events).len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let events = vec![
            event("A", 1, 5, 5),
            event("B", 1, 6, 6),
            event("A", 1, 5, 5),
            event("C", 1, 7, 9),
            event("B", 1, 6, 6),
        ];
        let once = dedup_events(events);
        let twice = dedup_events(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty() {
        assert!(dedup_events(Vec::new()).is_empty());
    }
}
