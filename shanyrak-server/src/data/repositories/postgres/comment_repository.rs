use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    content: String,
    user_id: i64,
    announcement_id: i64,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_comment_db_error)?;

        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (content, user_id, announcement_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, user_id, announcement_id, created_at
            "#,
        )
        .bind(&input.content)
        .bind(input.user_id)
        .bind(input.announcement_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_comment_db_error)?;

        adjust_total_comments(&mut tx, input.announcement_id, 1).await?;
        tx.commit().await.map_err(map_comment_db_error)?;

        map_row_to_comment(row)
    }

    async fn list_by_announcement(
        &self,
        announcement_id: i64,
    ) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, content, user_id, announcement_id, created_at
            FROM comments
            WHERE announcement_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(announcement_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        rows.into_iter().map(map_row_to_comment).collect()
    }

    async fn find_by_id(
        &self,
        announcement_id: i64,
        comment_id: i64,
    ) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, content, user_id, announcement_id, created_at
            FROM comments
            WHERE id = $1 AND announcement_id = $2
            "#,
        )
        .bind(comment_id)
        .bind(announcement_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        row.map(map_row_to_comment).transpose()
    }

    async fn update_comment(
        &self,
        announcement_id: i64,
        comment_id: i64,
        user_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET content = $4
            WHERE id = $1 AND announcement_id = $2 AND user_id = $3
            RETURNING id, content, user_id, announcement_id, created_at
            "#,
        )
        .bind(comment_id)
        .bind(announcement_id)
        .bind(user_id)
        .bind(&content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        row.map(map_row_to_comment).transpose()
    }

    async fn delete_comment(
        &self,
        announcement_id: i64,
        comment_id: i64,
        user_id: i64,
    ) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_comment_db_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1 AND announcement_id = $2 AND user_id = $3
            "#,
        )
        .bind(comment_id)
        .bind(announcement_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_comment_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        adjust_total_comments(&mut tx, announcement_id, -1).await?;
        tx.commit().await.map_err(map_comment_db_error)?;

        Ok(true)
    }
}

/// Single-statement increment, so concurrent writers never read a stale count.
async fn adjust_total_comments(
    tx: &mut Transaction<'_, Postgres>,
    announcement_id: i64,
    delta: i32,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE announcements
        SET total_comments = total_comments + $2
        WHERE id = $1
        "#,
    )
    .bind(announcement_id)
    .bind(delta)
    .execute(&mut **tx)
    .await
    .map_err(map_comment_db_error)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::not_found("announcement", announcement_id));
    }
    Ok(())
}

fn map_row_to_comment(row: CommentRow) -> Result<Comment, DomainError> {
    Comment::new(
        row.id,
        row.content,
        row.user_id,
        row.announcement_id,
        row.created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_comment_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        let resource = match db_err.constraint() {
            Some("comments_user_id_fkey") => "user",
            _ => "announcement",
        };
        return DomainError::NotFound(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
