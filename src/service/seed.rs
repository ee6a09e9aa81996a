//! Bundled fallback dataset for the public listings.
//!
//! When the posts store cannot be reached the listing pages render this seed
//! content instead of an error screen. The items carry fixed uuids so repeat
//! fallbacks dedupe cleanly; dates are offsets from "now" so the windows on
//! the listing pages still match something.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::{Post, PostKind, PostStatus, Priority};

pub fn fallback_posts(kind: PostKind) -> Vec<Post> {
    match kind {
        PostKind::News => news_seed(),
        PostKind::Announcement => announcement_seed(),
        PostKind::Event => event_seed(),
    }
}

fn seed_post(
    id: i64,
    kind: PostKind,
    priority: Priority,
    title: &str,
    content: &str,
    category: Option<&str>,
    days_ago: i64,
) -> Post {
    let created_at = Utc::now() - Duration::days(days_ago);
    Post {
        id,
        uuid: Some(Uuid::from_u128(0x5eed_0000_0000_0000_0000 + id as u128)),
        title: title.to_string(),
        content: content.to_string(),
        image_url: None,
        kind,
        priority,
        status: PostStatus::Published,
        category: category.map(str::to_string),
        location: None,
        event_date: None,
        event_time: None,
        created_by: Uuid::nil(),
        created_at,
        updated_at: created_at,
    }
}

fn news_seed() -> Vec<Post> {
    vec![
        seed_post(
            9001,
            PostKind::News,
            Priority::High,
            "Municipal hall reopens after renovation",
            "The renovated municipal hall is now open to the public. Transaction windows are back at the ground floor.",
            Some("Infrastructure"),
            1,
        ),
        seed_post(
            9002,
            PostKind::News,
            Priority::Normal,
            "Free anti-rabies vaccination drive this month",
            "The municipal veterinary office will hold free anti-rabies vaccination in all barangays this month.",
            Some("Health"),
            3,
        ),
        seed_post(
            9003,
            PostKind::News,
            Priority::Normal,
            "New garbage collection schedule",
            "Collection in the poblacion area moves to Tuesdays and Fridays starting next week.",
            Some("Public Services"),
            5,
        ),
        seed_post(
            9004,
            PostKind::News,
            Priority::Low,
            "Municipal nursery seedlings available",
            "Vegetable seedlings are available for free at the municipal nursery while supplies last.",
            Some("Agriculture"),
            8,
        ),
    ]
}

fn announcement_seed() -> Vec<Post> {
    vec![
        seed_post(
            9101,
            PostKind::Announcement,
            Priority::High,
            "Real property tax deadline extended",
            "Payment of real property tax without penalty is extended until the end of the quarter.",
            Some("Treasury"),
            2,
        ),
        seed_post(
            9102,
            PostKind::Announcement,
            Priority::Normal,
            "Business permit renewal now accepts online payment",
            "Renewing businesses may settle fees through the municipal online payment portal.",
            Some("Business"),
            4,
        ),
        seed_post(
            9103,
            PostKind::Announcement,
            Priority::Low,
            "Municipal library weekend hours",
            "The municipal library is now open on Saturdays from 8 AM to 12 noon.",
            Some("Education"),
            10,
        ),
    ]
}

fn event_seed() -> Vec<Post> {
    let mut posts = vec![
        seed_post(
            9201,
            PostKind::Event,
            Priority::High,
            "Town fiesta grand parade",
            "The annual town fiesta opens with a civic-military parade from the plaza to the sports complex.",
            Some("Culture"),
            0,
        ),
        seed_post(
            9202,
            PostKind::Event,
            Priority::Normal,
            "Barangay assembly day",
            "Simultaneous barangay assemblies in all 13 barangays. Residents are encouraged to attend.",
            Some("Governance"),
            0,
        ),
        seed_post(
            9203,
            PostKind::Event,
            Priority::Normal,
            "Coastal clean-up drive",
            "Volunteers should assemble at the fish port at 6 AM. Gloves and sacks provided.",
            Some("Environment"),
            0,
        ),
    ];

    let today = Utc::now().date_naive();
    posts[0].event_date = Some(today + Duration::days(7));
    posts[0].event_time = Some("07:00".to_string());
    posts[1].event_date = Some(today + Duration::days(14));
    posts[1].event_time = Some("09:00".to_string());
    posts[2].event_date = Some(today + Duration::days(21));
    posts[2].event_time = Some("06:00".to_string());

    posts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_items_are_published_and_kind_consistent() {
        for kind in PostKind::ALL {
            let posts = fallback_posts(kind);
            assert!(!posts.is_empty());
            assert!(posts.iter().all(|p| p.kind == kind && p.is_published()));
        }
    }

    #[test]
    fn test_seed_uuids_are_stable_and_unique() {
        let first = fallback_posts(PostKind::News);
        let second = fallback_posts(PostKind::News);
        let uuids_first: Vec<_> = first.iter().map(|p| p.uuid).collect();
        let uuids_second: Vec<_> = second.iter().map(|p| p.uuid).collect();
        assert_eq!(uuids_first, uuids_second);

        let mut all: Vec<_> = PostKind::ALL
            .iter()
            .flat_map(|k| fallback_posts(*k))
            .map(|p| p.uuid.unwrap())
            .collect();
        let before = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), before);
    }
}
