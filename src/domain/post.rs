use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single piece of portal content: a news item, an announcement, or an
/// event. The three public listing pages all consume this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    /// Secondary identity key. Preferred over `id` for deduplication when
    /// present, since numeric ids have been known to collide after bulk
    /// imports.
    pub uuid: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub kind: PostKind,
    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: Priority,
    pub status: PostStatus,
    pub category: Option<String>,
    pub location: Option<String>,
    /// Events are dated by when they happen, not when they were written.
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    News,
    Announcement,
    Event,
}

impl PostKind {
    pub const ALL: [PostKind; 3] = [PostKind::News, PostKind::Announcement, PostKind::Event];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::News => "news",
            PostKind::Announcement => "announcement",
            PostKind::Event => "event",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "news" => Some(PostKind::News),
            "announcement" => Some(PostKind::Announcement),
            "event" => Some(PostKind::Event),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }

    /// Missing or unrecognized labels fall back to `Normal` rather than
    /// rejecting the item.
    pub fn from_label(s: &str) -> Self {
        match s {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Normal,
        }
    }
}

fn deserialize_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Priority::from_label).unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "TEXT")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Draft => "draft",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "published" => Some(PostStatus::Published),
            "draft" => Some(PostStatus::Draft),
            _ => None,
        }
    }
}

/// Identity key used for deduplication and render keying: the uuid when the
/// backend assigned one, otherwise the numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Uuid(Uuid),
    Numeric(i64),
}

impl Post {
    pub fn identity_key(&self) -> IdentityKey {
        match self.uuid {
            Some(uuid) => IdentityKey::Uuid(uuid),
            None => IdentityKey::Numeric(self.id),
        }
    }

    /// The date a listing sorts and filters this post by. Events use their
    /// event date (falling back to creation when it was never set); news and
    /// announcements use the creation date.
    pub fn relevant_date(&self) -> NaiveDate {
        match self.kind {
            PostKind::Event => self
                .event_date
                .unwrap_or_else(|| self.created_at.date_naive()),
            _ => self.created_at.date_naive(),
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub kind: PostKind,
    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: Priority,
    pub status: PostStatus,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<PostStatus>,
    pub image_url: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub event_date: Option<Option<NaiveDate>>,
    pub event_time: Option<Option<String>>,
}
