use munisipyo::{
    domain::{
        all_barangays, CreatePostRequest, CreateServiceRequestRequest, CreateUserRequest,
        PostKind, PostStatus, Priority, ServiceType, UserRole,
    },
    repository::{
        PostRepository, ServiceRequestRepository, SqlitePostRepository,
        SqliteServiceRequestRepository, SqliteUserRepository, UserRepository,
    },
};

use chrono::{Duration, Utc};
use clap::Parser;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use sqlx::sqlite::SqlitePoolOptions;

#[derive(Parser)]
#[command(name = "seed", about = "Populate the portal database with sample data")]
struct Args {
    /// Database to seed. Falls back to DATABASE_URL, then sqlite:munisipyo.db.
    #[arg(long)]
    database_url: Option<String>,

    /// How many generated resident accounts to create.
    #[arg(long, default_value_t = 5)]
    residents: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:munisipyo.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize repositories
    let user_repo = SqliteUserRepository::new(db_pool.clone());
    let post_repo = SqlitePostRepository::new(db_pool.clone());
    let service_request_repo = SqliteServiceRequestRepository::new(db_pool.clone());

    // Seed users
    println!("👥 Creating users...");

    let admin = user_repo
        .create(CreateUserRequest {
            email: "admin@munisipyo.local".to_string(),
            username: "admin".to_string(),
            full_name: "Portal Administrator".to_string(),
            password: "admin123".to_string(),
            role: UserRole::Admin,
            barangay: None,
        })
        .await?;

    println!("  ✅ Created admin user (admin@munisipyo.local / admin123)");

    let staff = user_repo
        .create(CreateUserRequest {
            email: "staff@munisipyo.local".to_string(),
            username: "staff".to_string(),
            full_name: "Information Office Staff".to_string(),
            password: "staff123".to_string(),
            role: UserRole::Staff,
            barangay: None,
        })
        .await?;

    println!("  ✅ Created staff user (staff@munisipyo.local / staff123)");

    let barangays = all_barangays();
    for i in 0..args.residents {
        let barangay = &barangays[i % barangays.len()];
        user_repo
            .create(CreateUserRequest {
                email: FreeEmail().fake(),
                username: format!("resident{}", i + 1),
                full_name: Name().fake(),
                password: "password123".to_string(),
                role: UserRole::Resident,
                barangay: Some(barangay.name.to_string()),
            })
            .await?;
    }

    println!("  ✅ Created {} resident accounts", args.residents);

    // Seed posts
    println!("📰 Creating posts...");

    post_repo
        .create(
            CreatePostRequest {
                title: "New Municipal Health Center Opens This Week".to_string(),
                content: "The new two-storey health center along the national highway opens \
                          its doors to the public this week, with free consultations for the \
                          first month of operation."
                    .to_string(),
                kind: PostKind::News,
                priority: Priority::High,
                status: PostStatus::Published,
                image_url: None,
                category: Some("Health".to_string()),
                location: None,
                event_date: None,
                event_time: None,
            },
            admin.id,
        )
        .await?;

    post_repo
        .create(
            CreatePostRequest {
                title: "Road Widening Along Rizal Street Completed".to_string(),
                content: "The road widening project along Rizal Street has been completed \
                          ahead of schedule. Both lanes are now open to traffic."
                    .to_string(),
                kind: PostKind::News,
                priority: Priority::Normal,
                status: PostStatus::Published,
                image_url: None,
                category: Some("Infrastructure".to_string()),
                location: None,
                event_date: None,
                event_time: None,
            },
            staff.id,
        )
        .await?;

    post_repo
        .create(
            CreatePostRequest {
                title: "Scholarship Application Results Released".to_string(),
                content: "The list of approved municipal scholarship grantees for this school \
                          year is now posted at the municipal hall lobby and on this portal."
                    .to_string(),
                kind: PostKind::News,
                priority: Priority::Low,
                status: PostStatus::Published,
                image_url: None,
                category: Some("Education".to_string()),
                location: None,
                event_date: None,
                event_time: None,
            },
            staff.id,
        )
        .await?;

    post_repo
        .create(
            CreatePostRequest {
                title: "Scheduled Water Interruption on Saturday".to_string(),
                content: "The water district has advised of a scheduled service interruption \
                          this Saturday from 8 AM to 5 PM affecting all lowland barangays. \
                          Please store enough water for the day."
                    .to_string(),
                kind: PostKind::Announcement,
                priority: Priority::High,
                status: PostStatus::Published,
                image_url: None,
                category: Some("Utilities".to_string()),
                location: None,
                event_date: None,
                event_time: None,
            },
            admin.id,
        )
        .await?;

    post_repo
        .create(
            CreatePostRequest {
                title: "Real Property Tax Deadline Extended".to_string(),
                content: "The deadline for real property tax payments without penalty has \
                          been extended to the end of the month."
                    .to_string(),
                kind: PostKind::Announcement,
                priority: Priority::Normal,
                status: PostStatus::Published,
                image_url: None,
                category: Some("Taxation".to_string()),
                location: None,
                event_date: None,
                event_time: None,
            },
            staff.id,
        )
        .await?;

    let today = Utc::now().date_naive();

    post_repo
        .create(
            CreatePostRequest {
                title: "Town Fiesta Grand Parade".to_string(),
                content: "The annual town fiesta opens with a grand parade from the plaza to \
                          the municipal grounds. All barangay contingents are expected to \
                          assemble by 6 AM."
                    .to_string(),
                kind: PostKind::Event,
                priority: Priority::High,
                status: PostStatus::Published,
                image_url: None,
                category: Some("Culture".to_string()),
                location: Some("Town Plaza".to_string()),
                event_date: Some(today + Duration::days(10)),
                event_time: Some("07:00".to_string()),
            },
            admin.id,
        )
        .await?;

    post_repo
        .create(
            CreatePostRequest {
                title: "Free Anti-Rabies Vaccination Drive".to_string(),
                content: "The municipal veterinary office will hold a free anti-rabies \
                          vaccination drive for dogs and cats. Bring your pets with a leash \
                          or carrier."
                    .to_string(),
                kind: PostKind::Event,
                priority: Priority::Normal,
                status: PostStatus::Published,
                image_url: None,
                category: Some("Health".to_string()),
                location: Some("Municipal Covered Court".to_string()),
                event_date: Some(today + Duration::days(18)),
                event_time: Some("08:00".to_string()),
            },
            staff.id,
        )
        .await?;

    // One draft that should never show up on public listings
    post_repo
        .create(
            CreatePostRequest {
                title: "DRAFT: Budget Hearing Schedule".to_string(),
                content: "Schedule still being finalized with the Sangguniang Bayan.".to_string(),
                kind: PostKind::Announcement,
                priority: Priority::Normal,
                status: PostStatus::Draft,
                image_url: None,
                category: Some("Governance".to_string()),
                location: None,
                event_date: None,
                event_time: None,
            },
            staff.id,
        )
        .await?;

    println!("  ✅ Created 8 posts (7 published, 1 draft)");

    // Seed service requests
    println!("📨 Creating service requests...");

    service_request_repo
        .create(CreateServiceRequestRequest {
            requester_name: Name().fake(),
            contact_number: PhoneNumber().fake(),
            barangay: barangays[0].name.to_string(),
            service_type: ServiceType::BarangayClearance,
            details: "Requesting a barangay clearance for a job application.".to_string(),
        })
        .await?;

    service_request_repo
        .create(CreateServiceRequestRequest {
            requester_name: Name().fake(),
            contact_number: PhoneNumber().fake(),
            barangay: barangays[1].name.to_string(),
            service_type: ServiceType::Complaint,
            details: "Streetlight at the corner of the feeder road has been out for two weeks."
                .to_string(),
        })
        .await?;

    println!("  ✅ Created 2 service requests");

    println!("\n✨ Database seeding complete!");
    println!("\n📝 Test credentials:");
    println!("  Admin: admin@munisipyo.local / admin123");
    println!("  Staff: staff@munisipyo.local / staff123");
    println!("  Residents: resident1..resident{} / password123", args.residents);

    Ok(())
}
