use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::PgPool;

use super::announcement_repository::PostgresAnnouncementRepository;
use super::user_repository::PostgresUserRepository;
use crate::data::announcement_repository::{AnnouncementRepository, NewAnnouncement};
use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::announcement::{Announcement, AnnouncementType};
use crate::domain::user::User;
use crate::infrastructure::database::{create_pool, run_migrations};

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub(crate) async fn test_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");
    let pool = create_pool(&database_url, 5)
        .await
        .expect("test pool must connect");
    run_migrations(&pool)
        .await
        .expect("migrations must apply");
    pool
}

/// Digits only, so it can be used in phone numbers too.
pub(crate) fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{seq:03}", nanos % 1_000_000_000_000)
}

pub(crate) fn new_user(suffix: &str) -> NewUser {
    NewUser {
        email: format!("user_{suffix}@example.com"),
        phone: format!("+{suffix}"),
        name: "Test User".to_string(),
        password_hash: format!("hash-{suffix}"),
        city: "Almaty".to_string(),
    }
}

pub(crate) async fn insert_user(pool: &PgPool) -> User {
    PostgresUserRepository::new(pool.clone())
        .create_user(new_user(&unique_suffix()))
        .await
        .expect("test user must be inserted")
}

pub(crate) fn new_announcement(user_id: i64, kind: AnnouncementType, price: f64) -> NewAnnouncement {
    NewAnnouncement {
        kind,
        price,
        address: "Abay ave 10".to_string(),
        area: 54.5,
        rooms_count: 2,
        description: "Sunny flat".to_string(),
        user_id,
    }
}

pub(crate) async fn insert_announcement(pool: &PgPool, user_id: i64) -> Announcement {
    PostgresAnnouncementRepository::new(pool.clone())
        .create_announcement(new_announcement(user_id, AnnouncementType::Sell, 150_000.0))
        .await
        .expect("test announcement must be inserted")
}
