use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::favorite::Favorite;

#[derive(Debug, Clone)]
pub(crate) struct NewFavorite {
    pub(crate) announcement_id: i64,
    pub(crate) user_id: i64,
}

#[async_trait]
pub(crate) trait FavoriteRepository: Send + Sync {
    async fn add_favorite(&self, input: NewFavorite) -> Result<Favorite, DomainError>;
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Favorite>, DomainError>;
    async fn find_by_id(&self, favorite_id: i64) -> Result<Option<Favorite>, DomainError>;
    async fn delete_favorite(&self, favorite_id: i64) -> Result<bool, DomainError>;
}
