use std::collections::HashSet;

use crate::domain::{Post, Priority};

/// The rotating showcase at the top of each listing page holds at most this
/// many high-priority items. Changing it changes the rotation cadence the
/// public pages were designed around.
pub const SHOWCASE_CAP: usize = 3;

#[derive(Debug, Default)]
pub struct Tiers {
    pub high: Vec<Post>,
    pub normal: Vec<Post>,
    pub low: Vec<Post>,
}

/// Partition posts into priority tiers. Every input post lands in exactly one
/// tier; anything without a recognized priority is already `Normal` by the
/// time it gets here.
pub fn partition(posts: Vec<Post>) -> Tiers {
    let mut tiers = Tiers::default();
    for post in posts {
        match post.priority {
            Priority::High => tiers.high.push(post),
            Priority::Normal => tiers.normal.push(post),
            Priority::Low => tiers.low.push(post),
        }
    }
    tiers
}

/// Drop posts whose identity key was already seen, keeping the first
/// occurrence. Duplicates come from bulk imports and double-submitted admin
/// forms; they are logged and dropped, never surfaced as an error.
pub fn dedupe(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::with_capacity(posts.len());
    let before = posts.len();

    let deduped: Vec<Post> = posts
        .into_iter()
        .filter(|post| seen.insert(post.identity_key()))
        .collect();

    let removed = before - deduped.len();
    if removed > 0 {
        tracing::warn!("Removed {} duplicate post(s) from listing batch", removed);
    }

    deduped
}

/// Cap the high tier to the showcase size. Items beyond the cap are dropped
/// from the showcase only, not from the underlying data.
pub fn showcase(high: &[Post]) -> &[Post] {
    &high[..high.len().min(SHOWCASE_CAP)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::post_with;
    use crate::domain::Priority;
    use uuid::Uuid;

    #[test]
    fn test_partition_is_complete() {
        let posts = vec![
            post_with(1, None, Priority::High),
            post_with(2, None, Priority::Normal),
            post_with(3, None, Priority::Low),
            post_with(4, None, Priority::Normal),
            post_with(5, None, Priority::High),
        ];
        let total = posts.len();
        let tiers = partition(posts);

        assert_eq!(tiers.high.len() + tiers.normal.len() + tiers.low.len(), total);
        assert_eq!(tiers.high.len(), 2);
        assert_eq!(tiers.normal.len(), 2);
        assert_eq!(tiers.low.len(), 1);
        assert!(tiers.high.iter().all(|p| p.priority == Priority::High));
        assert!(tiers.normal.iter().all(|p| p.priority == Priority::Normal));
        assert!(tiers.low.iter().all(|p| p.priority == Priority::Low));
    }

    #[test]
    fn test_unrecognized_priority_defaults_to_normal() {
        assert_eq!(Priority::from_label("urgent"), Priority::Normal);
        assert_eq!(Priority::from_label(""), Priority::Normal);
        assert_eq!(Priority::from_label("high"), Priority::High);
        assert_eq!(Priority::from_label("low"), Priority::Low);
    }

    #[test]
    fn test_dedupe_prefers_uuid_and_keeps_first() {
        let shared = Uuid::new_v4();
        let posts = vec![
            post_with(1, Some(shared), Priority::Normal),
            post_with(2, None, Priority::Normal),
            // Different numeric id but same uuid: still a duplicate.
            post_with(3, Some(shared), Priority::Normal),
        ];

        let deduped = dedupe(posts);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, 1);
        assert_eq!(deduped[1].id, 2);
    }

    #[test]
    fn test_dedupe_falls_back_to_numeric_id() {
        let posts = vec![
            post_with(7, None, Priority::Normal),
            post_with(7, None, Priority::Normal),
            post_with(8, None, Priority::Normal),
        ];

        let deduped = dedupe(posts);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let shared = Uuid::new_v4();
        let posts = vec![
            post_with(1, Some(shared), Priority::Normal),
            post_with(2, Some(shared), Priority::Normal),
            post_with(3, None, Priority::Normal),
        ];

        let once = dedupe(posts);
        let ids_once: Vec<i64> = once.iter().map(|p| p.id).collect();
        let twice = dedupe(once);
        let ids_twice: Vec<i64> = twice.iter().map(|p| p.id).collect();

        assert_eq!(ids_once, ids_twice);
    }

    #[test]
    fn test_showcase_cap() {
        let five: Vec<Post> = (1..=5)
            .map(|i| post_with(i, None, Priority::High))
            .collect();
        assert_eq!(showcase(&five).len(), SHOWCASE_CAP);

        let two: Vec<Post> = (1..=2)
            .map(|i| post_with(i, None, Priority::High))
            .collect();
        assert_eq!(showcase(&two).len(), 2);

        let none: Vec<Post> = Vec::new();
        assert!(showcase(&none).is_empty());
    }
}
