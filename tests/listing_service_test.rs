use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use munisipyo::{
    domain::{
        CreatePostRequest, CreateUserRequest, Post, PostKind, PostStatus, Priority, UserRole,
    },
    error::{AppError, Result},
    repository::{PostRepository, SqlitePostRepository, SqliteUserRepository, UserRepository},
    service::{InvalidationBus, ListingService},
};
use sqlx::SqlitePool;
use uuid::Uuid;

const ROTATION: Duration = Duration::from_secs(5);

async fn setup() -> anyhow::Result<(Arc<SqlitePostRepository>, Uuid)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_repo = SqliteUserRepository::new(pool.clone());
    let author = user_repo
        .create(CreateUserRequest {
            email: "staff@example.com".to_string(),
            username: "staff".to_string(),
            full_name: "Staff User".to_string(),
            password: "secure_password123".to_string(),
            role: UserRole::Staff,
            barangay: None,
        })
        .await?;

    Ok((Arc::new(SqlitePostRepository::new(pool)), author.id))
}

fn news(title: &str, priority: Priority) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        content: "Body text".to_string(),
        kind: PostKind::News,
        priority,
        status: PostStatus::Published,
        image_url: None,
        category: None,
        location: None,
        event_date: None,
        event_time: None,
    }
}

#[tokio::test]
async fn test_showcase_caps_high_tier_and_normal_tier_paginates() -> anyhow::Result<()> {
    let (post_repo, author_id) = setup().await?;

    for i in 0..4 {
        post_repo
            .create(news(&format!("High {}", i), Priority::High), author_id)
            .await?;
    }
    post_repo.create(news("Normal", Priority::Normal), author_id).await?;

    let service = ListingService::new(post_repo, ROTATION);
    service.refresh(PostKind::News).await;

    service
        .with_listing(PostKind::News, |listing| {
            assert_eq!(listing.showcase().len(), 3);
            assert_eq!(listing.normal_total_items(), 1);
            assert_eq!(listing.normal_page()[0].title, "Normal");
            assert_eq!(listing.normal_total_pages(), 1);
        })
        .await;

    Ok(())
}

#[tokio::test]
async fn test_refresh_resets_pagination() -> anyhow::Result<()> {
    let (post_repo, author_id) = setup().await?;

    for i in 0..15 {
        post_repo
            .create(news(&format!("Item {}", i), Priority::Normal), author_id)
            .await?;
    }

    let service = ListingService::new(post_repo.clone(), ROTATION);
    service.refresh(PostKind::News).await;

    service
        .with_listing(PostKind::News, |listing| {
            assert_eq!(listing.normal_total_pages(), 2);
            listing.set_normal_page(2);
            assert_eq!(listing.normal_page_number(), 2);
        })
        .await;

    post_repo.create(news("Fresh", Priority::Normal), author_id).await?;
    service.refresh(PostKind::News).await;

    service
        .with_listing(PostKind::News, |listing| {
            assert_eq!(listing.normal_page_number(), 1);
            assert_eq!(listing.normal_total_items(), 16);
        })
        .await;

    Ok(())
}

struct FailingPostRepository;

#[async_trait]
impl PostRepository for FailingPostRepository {
    async fn create(&self, _request: CreatePostRequest, _created_by: Uuid) -> Result<Post> {
        Err(AppError::Database("store is down".to_string()))
    }
    async fn find_by_id(&self, _id: i64) -> Result<Option<Post>> {
        Err(AppError::Database("store is down".to_string()))
    }
    async fn list(&self, _limit: i64, _offset: i64) -> Result<Vec<Post>> {
        Err(AppError::Database("store is down".to_string()))
    }
    async fn list_by_kind(&self, _kind: PostKind, _limit: i64, _offset: i64) -> Result<Vec<Post>> {
        Err(AppError::Database("store is down".to_string()))
    }
    async fn list_published(&self, _kind: PostKind) -> Result<Vec<Post>> {
        Err(AppError::Database("store is down".to_string()))
    }
    async fn update(&self, _id: i64, _post: Post) -> Result<Post> {
        Err(AppError::Database("store is down".to_string()))
    }
    async fn delete(&self, _id: i64) -> Result<()> {
        Err(AppError::Database("store is down".to_string()))
    }
    async fn count_by_status(&self, _status: PostStatus) -> Result<i64> {
        Err(AppError::Database("store is down".to_string()))
    }
}

#[tokio::test]
async fn test_failed_fetch_falls_back_to_seed_content() {
    let service = ListingService::new(Arc::new(FailingPostRepository), ROTATION);
    service.refresh_all().await;

    for kind in PostKind::ALL {
        service
            .with_listing(kind, |listing| {
                let total = listing.showcase().len()
                    + listing.normal_total_items()
                    + listing.low_total_items();
                assert!(total > 0, "{} listing should serve seed content", kind.as_str());
            })
            .await;
    }
}

#[tokio::test]
async fn test_invalidation_triggers_refresh_of_published_kind_only() -> anyhow::Result<()> {
    let (post_repo, author_id) = setup().await?;

    let service = Arc::new(ListingService::new(post_repo.clone(), ROTATION));
    service.refresh_all().await;

    let bus = InvalidationBus::new();
    let listener = service.spawn_invalidation_listener(&bus);

    post_repo.create(news("Breaking", Priority::Normal), author_id).await?;
    bus.publish(PostKind::News);

    // Give the listener a moment to re-fetch.
    tokio::time::sleep(Duration::from_millis(200)).await;

    service
        .with_listing(PostKind::News, |listing| {
            assert_eq!(listing.normal_total_items(), 1);
        })
        .await;

    listener.abort();
    Ok(())
}
