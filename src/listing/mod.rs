//! Priority-tiered content selection shared by the news, announcements and
//! events listings.
//!
//! One pass over a fetched batch: keep published items of the page's kind,
//! dedupe by identity key, split into priority tiers, sort each tier by its
//! relevant date, cap the high tier for the rotating showcase, and paginate
//! the normal and low tiers independently. Category and date-window filters
//! apply to the normal tier only.

pub mod filter;
pub mod paginate;
pub mod tiers;

pub use filter::{category_matches, DateWindow, UpcomingWindow, Window, ALL_CATEGORIES};
pub use paginate::{Paginator, LOW_PAGE_SIZE, NORMAL_PAGE_SIZE};
pub use tiers::{dedupe, partition, showcase, Tiers, SHOWCASE_CAP};

use chrono::NaiveDate;

use crate::domain::{Post, PostKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent first: news and announcements.
    NewestFirst,
    /// Soonest first: events.
    SoonestFirst,
}

#[derive(Debug, Clone, Copy)]
pub struct ListingConfig {
    pub sort: SortOrder,
    pub normal_page_size: usize,
    pub low_page_size: usize,
    pub default_window: Window,
}

impl ListingConfig {
    pub fn for_kind(kind: PostKind) -> Self {
        match kind {
            PostKind::News | PostKind::Announcement => Self {
                sort: SortOrder::NewestFirst,
                normal_page_size: NORMAL_PAGE_SIZE,
                low_page_size: LOW_PAGE_SIZE,
                default_window: Window::Past(DateWindow::All),
            },
            PostKind::Event => Self {
                sort: SortOrder::SoonestFirst,
                normal_page_size: NORMAL_PAGE_SIZE,
                low_page_size: LOW_PAGE_SIZE,
                default_window: Window::Upcoming(UpcomingWindow::All),
            },
        }
    }
}

/// A built listing snapshot for one content kind: the showcase, the two
/// paginated tiers, and the active normal-tier filters.
#[derive(Debug)]
pub struct Listing {
    kind: PostKind,
    config: ListingConfig,
    today: NaiveDate,
    high: Vec<Post>,
    normal_all: Vec<Post>,
    normal: Vec<Post>,
    low: Vec<Post>,
    normal_pager: Paginator,
    low_pager: Paginator,
    category: String,
    window: Window,
}

impl Listing {
    pub fn build(kind: PostKind, items: Vec<Post>, today: NaiveDate) -> Self {
        let config = ListingConfig::for_kind(kind);
        let mut listing = Self {
            kind,
            config,
            today,
            high: Vec::new(),
            normal_all: Vec::new(),
            normal: Vec::new(),
            low: Vec::new(),
            normal_pager: Paginator::new(config.normal_page_size),
            low_pager: Paginator::new(config.low_page_size),
            category: ALL_CATEGORIES.to_string(),
            window: config.default_window,
        };
        listing.rebuild(items);
        listing
    }

    /// Swap in a freshly fetched batch. Tier contents are recomputed and both
    /// pagination cursors go back to page 1.
    pub fn replace_items(&mut self, items: Vec<Post>, today: NaiveDate) {
        self.today = today;
        self.rebuild(items);
    }

    fn rebuild(&mut self, items: Vec<Post>) {
        let eligible: Vec<Post> = items
            .into_iter()
            .filter(|p| p.kind == self.kind && p.is_published())
            .collect();

        let mut tiers = partition(dedupe(eligible));
        sort_tier(&mut tiers.high, self.config.sort);
        sort_tier(&mut tiers.normal, self.config.sort);
        sort_tier(&mut tiers.low, self.config.sort);

        self.high = tiers.high;
        self.normal_all = tiers.normal;
        self.low = tiers.low;

        self.apply_filters();
        self.normal_pager.reset();
        self.low_pager.reset();
    }

    /// The normal tier is the only filtered tier; high and low pass through
    /// untouched.
    fn apply_filters(&mut self) {
        let category = self.category.clone();
        let window = self.window;
        let today = self.today;
        self.normal = self
            .normal_all
            .iter()
            .filter(|p| category_matches(&category, p) && window.includes(today, p.relevant_date()))
            .cloned()
            .collect();
    }

    pub fn set_category(&mut self, category: String) {
        if self.category != category {
            self.category = category;
            self.apply_filters();
            self.normal_pager.reset();
        }
    }

    pub fn set_window(&mut self, window: Window) {
        if self.window != window {
            self.window = window;
            self.apply_filters();
            self.normal_pager.reset();
        }
    }

    pub fn kind(&self) -> PostKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn showcase(&self) -> &[Post] {
        showcase(&self.high)
    }

    pub fn normal_page(&self) -> &[Post] {
        self.normal_pager.slice(&self.normal)
    }

    pub fn low_page(&self) -> &[Post] {
        self.low_pager.slice(&self.low)
    }

    pub fn normal_page_number(&self) -> usize {
        self.normal_pager.current()
    }

    pub fn low_page_number(&self) -> usize {
        self.low_pager.current()
    }

    pub fn normal_total_pages(&self) -> usize {
        self.normal_pager.total_pages(self.normal.len())
    }

    pub fn low_total_pages(&self) -> usize {
        self.low_pager.total_pages(self.low.len())
    }

    pub fn normal_total_items(&self) -> usize {
        self.normal.len()
    }

    pub fn low_total_items(&self) -> usize {
        self.low.len()
    }

    pub fn set_normal_page(&mut self, page: usize) {
        self.normal_pager.set_page(page, self.normal.len());
    }

    pub fn set_low_page(&mut self, page: usize) {
        self.low_pager.set_page(page, self.low.len());
    }

    pub fn next_normal_page(&mut self) {
        self.normal_pager.next(self.normal.len());
    }

    pub fn previous_normal_page(&mut self) {
        self.normal_pager.previous();
    }

    pub fn next_low_page(&mut self) {
        self.low_pager.next(self.low.len());
    }

    pub fn previous_low_page(&mut self) {
        self.low_pager.previous();
    }
}

fn sort_tier(tier: &mut [Post], order: SortOrder) {
    match order {
        SortOrder::NewestFirst => {
            tier.sort_by(|a, b| {
                b.relevant_date()
                    .cmp(&a.relevant_date())
                    .then(b.created_at.cmp(&a.created_at))
            });
        }
        SortOrder::SoonestFirst => {
            tier.sort_by(|a, b| {
                a.relevant_date()
                    .cmp(&b.relevant_date())
                    .then(a.created_at.cmp(&b.created_at))
            });
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use crate::domain::{Post, PostKind, PostStatus, Priority};

    /// A published news post dated `id` days after 2025-01-01, so ids double
    /// as a deterministic date order.
    pub(crate) fn base_post(id: i64) -> Post {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::days(id);
        Post {
            id,
            uuid: Some(Uuid::new_v4()),
            title: format!("Post {}", id),
            content: "Body".to_string(),
            image_url: None,
            kind: PostKind::News,
            priority: Priority::Normal,
            status: PostStatus::Published,
            category: None,
            location: None,
            event_date: None,
            event_time: None,
            created_by: Uuid::nil(),
            created_at,
            updated_at: created_at,
        }
    }

    pub(crate) fn post_with(id: i64, uuid: Option<Uuid>, priority: Priority) -> Post {
        let mut post = base_post(id);
        post.uuid = uuid;
        post.priority = priority;
        post
    }

    pub(crate) fn post_with_category(id: i64, category: Option<&str>) -> Post {
        let mut post = base_post(id);
        post.category = category.map(str::to_string);
        post
    }

    pub(crate) fn event_on(id: i64, date: NaiveDate) -> Post {
        let mut post = base_post(id);
        post.kind = PostKind::Event;
        post.event_date = Some(date);
        post
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{base_post, event_on, post_with};
    use super::*;
    use crate::domain::{PostStatus, Priority};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    #[test]
    fn test_drafts_and_foreign_kinds_are_excluded() {
        let mut draft = base_post(1);
        draft.status = PostStatus::Draft;
        let event = event_on(2, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let news = base_post(3);

        let listing = Listing::build(PostKind::News, vec![draft, event, news], today());
        assert_eq!(listing.normal_total_items(), 1);
    }

    #[test]
    fn test_news_sorted_newest_first() {
        let items = vec![base_post(1), base_post(5), base_post(3)];
        let listing = Listing::build(PostKind::News, items, today());

        let ids: Vec<i64> = listing.normal_page().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 3, 1]);
    }

    #[test]
    fn test_events_sorted_soonest_first() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let items = vec![event_on(1, d(20)), event_on(2, d(5)), event_on(3, d(12))];
        let listing = Listing::build(PostKind::Event, items, today());

        let ids: Vec<i64> = listing.normal_page().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_duplicate_high_items_collapse_before_showcase() {
        // Five published news posts: four high (two sharing a uuid), one normal.
        let shared = Uuid::new_v4();
        let items = vec![
            post_with(1, Some(shared), Priority::High),
            post_with(2, Some(shared), Priority::High),
            post_with(3, None, Priority::High),
            post_with(4, None, Priority::High),
            post_with(5, None, Priority::Normal),
        ];

        let listing = Listing::build(PostKind::News, items, today());

        assert_eq!(listing.showcase().len(), 3);
        assert_eq!(listing.normal_total_items(), 1);
        assert_eq!(listing.normal_page().len(), 1);
        assert_eq!(listing.normal_page()[0].id, 5);
    }

    #[test]
    fn test_replace_items_resets_pages() {
        let items: Vec<_> = (1..=30).map(base_post).collect();
        let mut listing = Listing::build(PostKind::News, items, today());

        listing.set_normal_page(3);
        assert_eq!(listing.normal_page_number(), 3);

        let fresh: Vec<_> = (1..=4).map(base_post).collect();
        listing.replace_items(fresh, today());

        assert_eq!(listing.normal_page_number(), 1);
        assert_eq!(listing.low_page_number(), 1);
        assert_eq!(listing.normal_total_pages(), 1);
    }

    #[test]
    fn test_filters_touch_normal_tier_only() {
        let mut items: Vec<_> = (1..=4)
            .map(|i| {
                let mut p = base_post(i);
                p.category = Some("Health".to_string());
                p
            })
            .collect();
        items.push(post_with(5, None, Priority::High));
        items.push(post_with(6, None, Priority::Low));

        let mut listing = Listing::build(PostKind::News, items, today());
        listing.set_category("Infrastructure".to_string());

        assert_eq!(listing.normal_total_items(), 0);
        // High and low tiers ignore the category filter.
        assert_eq!(listing.showcase().len(), 1);
        assert_eq!(listing.low_total_items(), 1);
        // Empty normal tier still reports one page.
        assert_eq!(listing.normal_total_pages(), 1);
    }

    #[test]
    fn test_filter_change_resets_normal_page() {
        let items: Vec<_> = (1..=30).map(base_post).collect();
        let mut listing = Listing::build(PostKind::News, items, today());

        listing.set_normal_page(2);
        listing.set_window(Window::Past(DateWindow::Last3Months));
        assert_eq!(listing.normal_page_number(), 1);
    }

    #[test]
    fn test_pagination_covers_whole_tier() {
        let items: Vec<_> = (1..=30).map(base_post).collect();
        let mut listing = Listing::build(PostKind::News, items, today());

        let mut seen = Vec::new();
        for _ in 0..listing.normal_total_pages() {
            seen.extend(listing.normal_page().iter().map(|p| p.id));
            listing.next_normal_page();
        }

        assert_eq!(seen.len(), 30);
        let mut sorted = seen.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 30);
    }
}
