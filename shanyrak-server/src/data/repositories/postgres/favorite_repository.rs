use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::data::favorite_repository::{FavoriteRepository, NewFavorite};
use crate::domain::error::DomainError;
use crate::domain::favorite::Favorite;

#[derive(Debug, Clone)]
pub(crate) struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FavoriteRow {
    id: i64,
    user_id: i64,
    announcement_id: i64,
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn add_favorite(&self, input: NewFavorite) -> Result<Favorite, DomainError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            INSERT INTO user_favorites (user_id, announcement_id)
            VALUES ($1, $2)
            RETURNING id, user_id, announcement_id
            "#,
        )
        .bind(input.user_id)
        .bind(input.announcement_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_favorite_db_error)?;

        map_row_to_favorite(row)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Favorite>, DomainError> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, user_id, announcement_id
            FROM user_favorites
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_favorite_db_error)?;

        rows.into_iter().map(map_row_to_favorite).collect()
    }

    async fn find_by_id(&self, favorite_id: i64) -> Result<Option<Favorite>, DomainError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, user_id, announcement_id
            FROM user_favorites
            WHERE id = $1
            "#,
        )
        .bind(favorite_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_favorite_db_error)?;

        row.map(map_row_to_favorite).transpose()
    }

    async fn delete_favorite(&self, favorite_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_favorites
            WHERE id = $1
            "#,
        )
        .bind(favorite_id)
        .execute(&self.pool)
        .await
        .map_err(map_favorite_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_favorite(row: FavoriteRow) -> Result<Favorite, DomainError> {
    Favorite::new(row.id, row.user_id, row.announcement_id)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_favorite_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        let resource = match db_err.constraint() {
            Some("user_favorites_user_id_fkey") => "user",
            _ => "announcement",
        };
        return DomainError::NotFound(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::PostgresFavoriteRepository;
    use crate::data::announcement_repository::AnnouncementRepository;
    use crate::data::favorite_repository::{FavoriteRepository, NewFavorite};
    use crate::data::repositories::postgres::announcement_repository::PostgresAnnouncementRepository;
    use crate::data::repositories::postgres::test_support::{
        insert_announcement, insert_user, test_pool,
    };
    use crate::domain::error::DomainError;

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a Postgres instance"]
    async fn favorites_are_listed_per_user() {
        let pool = test_pool().await;
        let repo = PostgresFavoriteRepository::new(pool.clone());
        let owner = insert_user(&pool).await;
        let other = insert_user(&pool).await;
        let announcement = insert_announcement(&pool, owner.id).await;

        let mine = repo
            .add_favorite(NewFavorite {
                announcement_id: announcement.id,
                user_id: owner.id,
            })
            .await
            .expect("insert must succeed");
        repo.add_favorite(NewFavorite {
            announcement_id: announcement.id,
            user_id: other.id,
        })
        .await
        .expect("insert must succeed");

        let listed = repo.list_by_user(owner.id).await.expect("list must succeed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, mine.id);
        assert!(listed.iter().all(|fav| fav.user_id == owner.id));

        assert!(repo.delete_favorite(mine.id).await.expect("delete must succeed"));
        assert!(
            repo.find_by_id(mine.id)
                .await
                .expect("query must succeed")
                .is_none()
        );
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a Postgres instance"]
    async fn favorite_for_missing_announcement_is_not_found() {
        let pool = test_pool().await;
        let repo = PostgresFavoriteRepository::new(pool.clone());
        let owner = insert_user(&pool).await;

        let err = repo
            .add_favorite(NewFavorite {
                announcement_id: i64::MAX,
                user_id: owner.id,
            })
            .await
            .expect_err("missing announcement must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a Postgres instance"]
    async fn deleting_announcement_cascades_to_favorites() {
        let pool = test_pool().await;
        let repo = PostgresFavoriteRepository::new(pool.clone());
        let announcements = PostgresAnnouncementRepository::new(pool.clone());
        let owner = insert_user(&pool).await;
        let announcement = insert_announcement(&pool, owner.id).await;

        let favorite = repo
            .add_favorite(NewFavorite {
                announcement_id: announcement.id,
                user_id: owner.id,
            })
            .await
            .expect("insert must succeed");

        assert!(
            announcements
                .delete_announcement(announcement.id)
                .await
                .expect("delete must succeed")
        );
        assert!(
            repo.find_by_id(favorite.id)
                .await
                .expect("query must succeed")
                .is_none()
        );
    }
}
