use munisipyo::{
    domain::{CreatePostRequest, CreateUserRequest, PostKind, PostStatus, Priority, UserRole},
    repository::{PostRepository, SqlitePostRepository, SqliteUserRepository, UserRepository},
};
use sqlx::SqlitePool;

async fn setup() -> anyhow::Result<(SqlitePool, uuid::Uuid)> {
    // Create an in-memory SQLite database
    let pool = SqlitePool::connect(":memory:").await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Posts need an author
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

    Ok((pool, author.id))
}

fn news_request(title: &str, status: PostStatus) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        content: "Body text".to_string(),
        kind: PostKind::News,
        priority: Priority::Normal,
        status,
        image_url: None,
        category: Some("Health".to_string()),
        location: None,
        event_date: None,
        event_time: None,
    }
}

#[tokio::test]
async fn test_post_crud() -> anyhow::Result<()> {
    let (pool, author_id) = setup().await?;
    let repo = SqlitePostRepository::new(pool);

    // Test Create
    let post = repo
        .create(news_request("Health center opens", PostStatus::Published), author_id)
        .await?;
    assert_eq!(post.title, "Health center opens");
    assert_eq!(post.kind, PostKind::News);
    assert_eq!(post.status, PostStatus::Published);
    assert!(post.uuid.is_some(), "create should assign a uuid");
    assert_eq!(post.created_by, author_id);

    // Test Find by ID
    let found = repo.find_by_id(post.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, post.id);

    // Test List
    let posts = repo.list(10, 0).await?;
    assert_eq!(posts.len(), 1);

    // Test Update
    let mut updated = post.clone();
    updated.title = "Health center now open".to_string();
    updated.priority = Priority::High;
    let updated = repo.update(post.id, updated).await?;
    assert_eq!(updated.title, "Health center now open");
    assert_eq!(updated.priority, Priority::High);

    // Test Delete
    repo.delete(post.id).await?;
    let deleted = repo.find_by_id(post.id).await?;
    assert!(deleted.is_none());

    Ok(())
}

#[tokio::test]
async fn test_list_published_excludes_drafts_and_other_kinds() -> anyhow::Result<()> {
    let (pool, author_id) = setup().await?;
    let repo = SqlitePostRepository::new(pool);

    repo.create(news_request("Published news", PostStatus::Published), author_id)
        .await?;
    repo.create(news_request("Draft news", PostStatus::Draft), author_id)
        .await?;

    let mut event = news_request("Fiesta parade", PostStatus::Published);
    event.kind = PostKind::Event;
    event.event_date = chrono::NaiveDate::from_ymd_opt(2026, 9, 15);
    repo.create(event, author_id).await?;

    let published_news = repo.list_published(PostKind::News).await?;
    assert_eq!(published_news.len(), 1);
    assert_eq!(published_news[0].title, "Published news");

    let published_events = repo.list_published(PostKind::Event).await?;
    assert_eq!(published_events.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_count_by_status() -> anyhow::Result<()> {
    let (pool, author_id) = setup().await?;
    let repo = SqlitePostRepository::new(pool);

    repo.create(news_request("One", PostStatus::Published), author_id)
        .await?;
    repo.create(news_request("Two", PostStatus::Published), author_id)
        .await?;
    repo.create(news_request("Three", PostStatus::Draft), author_id)
        .await?;

    assert_eq!(repo.count_by_status(PostStatus::Published).await?, 2);
    assert_eq!(repo.count_by_status(PostStatus::Draft).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_unknown_priority_in_storage_degrades_to_normal() -> anyhow::Result<()> {
    let (pool, author_id) = setup().await?;
    let repo = SqlitePostRepository::new(pool.clone());

    let post = repo
        .create(news_request("Odd priority", PostStatus::Published), author_id)
        .await?;

    // A row written by an older system revision may carry a label the
    // current code does not know.
    sqlx::query("UPDATE posts SET priority = 'urgent' WHERE id = ?")
        .bind(post.id)
        .execute(&pool)
        .await?;

    let found = repo.find_by_id(post.id).await?.unwrap();
    assert_eq!(found.priority, Priority::Normal);

    Ok(())
}
