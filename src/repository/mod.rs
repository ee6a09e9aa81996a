use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::*;
use crate::error::Result;

pub mod post_repository;
pub mod user_repository;
pub mod verification_repository;
pub mod service_request_repository;

pub use post_repository::SqlitePostRepository;
pub use user_repository::SqliteUserRepository;
pub use verification_repository::SqliteVerificationRepository;
pub use service_request_repository::SqliteServiceRequestRepository;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, request: CreatePostRequest, created_by: Uuid) -> Result<Post>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Post>>;
    async fn list_by_kind(&self, kind: PostKind, limit: i64, offset: i64) -> Result<Vec<Post>>;
    /// Everything a public listing page is allowed to see: published posts of
    /// one kind, most recently created first.
    async fn list_published(&self, kind: PostKind) -> Result<Vec<Post>>;
    async fn update(&self, id: i64, post: Post) -> Result<Post>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn count_by_status(&self, status: PostStatus) -> Result<i64>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>>;
    async fn update(&self, id: Uuid, update: UpdateUserRequest) -> Result<User>;
    async fn set_verified(&self, id: Uuid, verified: bool) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait VerificationRepository: Send + Sync {
    async fn create(&self, request: CreateVerificationRequest) -> Result<VerificationRequest>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRequest>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<VerificationRequest>>;
    async fn list_pending(&self) -> Result<Vec<VerificationRequest>>;
    async fn review(
        &self,
        id: Uuid,
        status: VerificationStatus,
        reviewed_by: Uuid,
        reviewer_notes: Option<String>,
    ) -> Result<VerificationRequest>;
    async fn count_pending(&self) -> Result<i64>;
}

#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    async fn create(&self, request: CreateServiceRequestRequest) -> Result<ServiceRequest>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceRequest>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ServiceRequest>>;
    async fn list_by_status(&self, status: RequestStatus) -> Result<Vec<ServiceRequest>>;
    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
        staff_notes: Option<String>,
    ) -> Result<ServiceRequest>;
    async fn count_open(&self) -> Result<i64>;
}
