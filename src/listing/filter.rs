use chrono::{Datelike, NaiveDate};

use crate::domain::Post;

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

pub fn category_matches(selected: &str, post: &Post) -> bool {
    if selected == ALL_CATEGORIES {
        return true;
    }
    post.category.as_deref() == Some(selected)
}

/// Retrospective date windows used by the news and announcements listings.
///
/// Each window is a literal inclusive day-count bound measured from
/// midnight-normalized "today" — "Last Month" is a fixed 29-day window, not a
/// calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    All,
    Last24Hours,
    Last3Days,
    LastWeek,
    Last2Weeks,
    LastMonth,
    Last3Months,
}

impl DateWindow {
    fn bound_days(&self) -> Option<i64> {
        match self {
            DateWindow::All => None,
            DateWindow::Last24Hours => Some(0),
            DateWindow::Last3Days => Some(2),
            DateWindow::LastWeek => Some(6),
            DateWindow::Last2Weeks => Some(13),
            DateWindow::LastMonth => Some(29),
            DateWindow::Last3Months => Some(89),
        }
    }

    pub fn includes(&self, today: NaiveDate, date: NaiveDate) -> bool {
        match self.bound_days() {
            None => true,
            Some(bound) => {
                let elapsed = (today - date).num_days();
                (0..=bound).contains(&elapsed)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateWindow::All => "all",
            DateWindow::Last24Hours => "last-24-hours",
            DateWindow::Last3Days => "last-3-days",
            DateWindow::LastWeek => "last-week",
            DateWindow::Last2Weeks => "last-2-weeks",
            DateWindow::LastMonth => "last-month",
            DateWindow::Last3Months => "last-3-months",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(DateWindow::All),
            "last-24-hours" => Some(DateWindow::Last24Hours),
            "last-3-days" => Some(DateWindow::Last3Days),
            "last-week" => Some(DateWindow::LastWeek),
            "last-2-weeks" => Some(DateWindow::Last2Weeks),
            "last-month" => Some(DateWindow::LastMonth),
            "last-3-months" => Some(DateWindow::Last3Months),
            _ => None,
        }
    }
}

/// Forward-looking date windows used by the events listing.
///
/// "This Month" is the odd one out: it is a calendar month+year equality
/// check, while the rest are fixed day-count bounds like [`DateWindow`]. Both
/// behaviors are intentional and kept distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpcomingWindow {
    All,
    Next7Days,
    Next2Weeks,
    ThisMonth,
    NextMonth,
    Next3Months,
}

impl UpcomingWindow {
    fn bound_days(&self) -> Option<i64> {
        match self {
            UpcomingWindow::All | UpcomingWindow::ThisMonth => None,
            UpcomingWindow::Next7Days => Some(6),
            UpcomingWindow::Next2Weeks => Some(13),
            UpcomingWindow::NextMonth => Some(29),
            UpcomingWindow::Next3Months => Some(89),
        }
    }

    pub fn includes(&self, today: NaiveDate, date: NaiveDate) -> bool {
        match self {
            UpcomingWindow::All => true,
            UpcomingWindow::ThisMonth => {
                date.month() == today.month() && date.year() == today.year()
            }
            _ => {
                let until = (date - today).num_days();
                match self.bound_days() {
                    Some(bound) => (0..=bound).contains(&until),
                    None => true,
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpcomingWindow::All => "all",
            UpcomingWindow::Next7Days => "next-7-days",
            UpcomingWindow::Next2Weeks => "next-2-weeks",
            UpcomingWindow::ThisMonth => "this-month",
            UpcomingWindow::NextMonth => "next-month",
            UpcomingWindow::Next3Months => "next-3-months",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(UpcomingWindow::All),
            "next-7-days" => Some(UpcomingWindow::Next7Days),
            "next-2-weeks" => Some(UpcomingWindow::Next2Weeks),
            "this-month" => Some(UpcomingWindow::ThisMonth),
            "next-month" => Some(UpcomingWindow::NextMonth),
            "next-3-months" => Some(UpcomingWindow::Next3Months),
            _ => None,
        }
    }
}

/// The date-window filter a listing carries: retrospective for news and
/// announcements, forward-looking for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Past(DateWindow),
    Upcoming(UpcomingWindow),
}

impl Window {
    pub fn includes(&self, today: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Window::Past(w) => w.includes(today, date),
            Window::Upcoming(w) => w.includes(today, date),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Window::Past(w) => w.as_str(),
            Window::Upcoming(w) => w.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_week_boundary() {
        let today = date(2025, 1, 15);
        let window = DateWindow::LastWeek; // bound 6

        // 7 days prior: out.
        assert!(!window.includes(today, date(2025, 1, 8)));
        // 6 days prior: in.
        assert!(window.includes(today, date(2025, 1, 9)));
        // Today itself: in.
        assert!(window.includes(today, today));
    }

    #[test]
    fn test_last_24_hours_is_today_only() {
        let today = date(2025, 1, 15);
        let window = DateWindow::Last24Hours;

        assert!(window.includes(today, today));
        assert!(!window.includes(today, date(2025, 1, 14)));
    }

    #[test]
    fn test_future_dates_excluded_from_past_windows() {
        let today = date(2025, 1, 15);
        assert!(!DateWindow::LastMonth.includes(today, date(2025, 1, 16)));
    }

    #[test]
    fn test_fixed_month_is_29_days() {
        let today = date(2025, 1, 30);
        let window = DateWindow::LastMonth;

        assert!(window.includes(today, date(2025, 1, 1))); // 29 days
        assert!(!window.includes(today, date(2024, 12, 31))); // 30 days
    }

    #[test]
    fn test_this_month_is_calendar_aware() {
        let today = date(2025, 1, 15);
        let window = UpcomingWindow::ThisMonth;

        // Same calendar month, even in the past relative to today.
        assert!(window.includes(today, date(2025, 1, 2)));
        assert!(window.includes(today, date(2025, 1, 31)));
        // Next month, even though it is within 29 days.
        assert!(!window.includes(today, date(2025, 2, 1)));
        // Same month number, different year.
        assert!(!window.includes(today, date(2024, 1, 15)));
    }

    #[test]
    fn test_next_7_days_boundary() {
        let today = date(2025, 1, 15);
        let window = UpcomingWindow::Next7Days; // bound 6

        assert!(window.includes(today, today));
        assert!(window.includes(today, date(2025, 1, 21)));
        assert!(!window.includes(today, date(2025, 1, 22)));
        // Already past: out.
        assert!(!window.includes(today, date(2025, 1, 14)));
    }

    #[test]
    fn test_category_filter() {
        use crate::listing::test_support::post_with_category;

        let health = post_with_category(1, Some("Health"));
        let uncategorized = post_with_category(2, None);

        assert!(category_matches(ALL_CATEGORIES, &health));
        assert!(category_matches(ALL_CATEGORIES, &uncategorized));
        assert!(category_matches("Health", &health));
        assert!(!category_matches("Infrastructure", &health));
        assert!(!category_matches("Health", &uncategorized));
    }

    #[test]
    fn test_window_labels_round_trip() {
        for w in [
            DateWindow::All,
            DateWindow::Last24Hours,
            DateWindow::Last3Days,
            DateWindow::LastWeek,
            DateWindow::Last2Weeks,
            DateWindow::LastMonth,
            DateWindow::Last3Months,
        ] {
            assert_eq!(DateWindow::from_str(w.as_str()), Some(w));
        }
        assert_eq!(DateWindow::from_str("fortnight"), None);
    }
}
