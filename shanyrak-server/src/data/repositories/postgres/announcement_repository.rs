use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::announcement_repository::{
    AnnouncementPatch, AnnouncementRepository, NewAnnouncement, Pagination,
};
use crate::domain::announcement::{Announcement, SearchFilter};
use crate::domain::error::DomainError;

// Every filter is optional: a NULL bind disables its predicate.
const SEARCH_PREDICATE: &str = r#"
    ($1::text IS NULL OR type = $1)
    AND ($2::int4 IS NULL OR rooms_count = $2)
    AND ($3::float8 IS NULL OR price >= $3)
    AND ($4::float8 IS NULL OR price <= $4)
"#;

#[derive(Debug, Clone)]
pub(crate) struct PostgresAnnouncementRepository {
    pool: PgPool,
}

impl PostgresAnnouncementRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AnnouncementRow {
    id: i64,
    #[sqlx(rename = "type")]
    kind: String,
    price: f64,
    address: String,
    area: f64,
    rooms_count: i32,
    description: String,
    created_at: DateTime<Utc>,
    user_id: i64,
    total_comments: i32,
}

#[async_trait]
impl AnnouncementRepository for PostgresAnnouncementRepository {
    async fn create_announcement(
        &self,
        input: NewAnnouncement,
    ) -> Result<Announcement, DomainError> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            INSERT INTO announcements (type, price, address, area, rooms_count, description, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, type, price, address, area, rooms_count, description,
                      created_at, user_id, total_comments
            "#,
        )
        .bind(input.kind.as_str())
        .bind(input.price)
        .bind(&input.address)
        .bind(input.area)
        .bind(input.rooms_count)
        .bind(&input.description)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_announcement_db_error)?;

        map_row_to_announcement(row)
    }

    async fn get_announcement(&self, id: i64) -> Result<Option<Announcement>, DomainError> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT
                id,
                type,
                price,
                address,
                area,
                rooms_count,
                description,
                created_at,
                user_id,
                total_comments
            FROM announcements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_announcement_db_error)?;

        row.map(map_row_to_announcement).transpose()
    }

    async fn update_announcement(
        &self,
        id: i64,
        patch: AnnouncementPatch,
    ) -> Result<Option<Announcement>, DomainError> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            UPDATE announcements
            SET type = $2,
                price = $3,
                address = $4,
                area = $5,
                rooms_count = $6,
                description = $7
            WHERE id = $1
            RETURNING id, type, price, address, area, rooms_count, description,
                      created_at, user_id, total_comments
            "#,
        )
        .bind(id)
        .bind(patch.kind.as_str())
        .bind(patch.price)
        .bind(&patch.address)
        .bind(patch.area)
        .bind(patch.rooms_count)
        .bind(&patch.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_announcement_db_error)?;

        row.map(map_row_to_announcement).transpose()
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM announcements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_announcement_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(
        &self,
        filter: &SearchFilter,
        pagination: Pagination,
    ) -> Result<Vec<Announcement>, DomainError> {
        let sql = format!(
            r#"
            SELECT
                id,
                type,
                price,
                address,
                area,
                rooms_count,
                description,
                created_at,
                user_id,
                total_comments
            FROM announcements
            WHERE {SEARCH_PREDICATE}
            ORDER BY created_at DESC, id DESC
            LIMIT $5
            OFFSET $6
            "#
        );

        let rows = sqlx::query_as::<_, AnnouncementRow>(&sql)
            .bind(filter.kind.map(|kind| kind.as_str()))
            .bind(filter.rooms_count)
            .bind(filter.price_from)
            .bind(filter.price_until)
            .bind(pagination.sql_limit())
            .bind(pagination.sql_offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_announcement_db_error)?;

        rows.into_iter().map(map_row_to_announcement).collect()
    }

    async fn count(&self, filter: &SearchFilter) -> Result<i64, DomainError> {
        let sql = format!(
            r#"
            SELECT COUNT(*)
            FROM announcements
            WHERE {SEARCH_PREDICATE}
            "#
        );

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.kind.map(|kind| kind.as_str()))
            .bind(filter.rooms_count)
            .bind(filter.price_from)
            .bind(filter.price_until)
            .fetch_one(&self.pool)
            .await
            .map_err(map_announcement_db_error)
    }

    async fn comment_count(&self, id: i64) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM comments
            WHERE announcement_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_announcement_db_error)
    }
}

fn map_row_to_announcement(row: AnnouncementRow) -> Result<Announcement, DomainError> {
    Announcement::new(
        row.id,
        &row.kind,
        row.price,
        row.address,
        row.area,
        row.rooms_count,
        row.description,
        row.created_at,
        row.user_id,
        row.total_comments,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_announcement_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("user".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
