use tracing::info;

use super::policy::ensure_owner;
use crate::data::announcement_repository::AnnouncementRepository;
use crate::data::favorite_repository::{FavoriteRepository, NewFavorite};
use crate::domain::error::DomainError;
use crate::domain::favorite::Favorite;

pub(crate) struct FavoriteService<F: FavoriteRepository, A: AnnouncementRepository> {
    favorites: F,
    announcements: A,
}

impl<F: FavoriteRepository, A: AnnouncementRepository> FavoriteService<F, A> {
    pub(crate) fn new(favorites: F, announcements: A) -> Self {
        Self {
            favorites,
            announcements,
        }
    }

    pub(crate) async fn add_favorite(
        &self,
        actor_user_id: i64,
        announcement_id: i64,
    ) -> Result<Favorite, DomainError> {
        if self
            .announcements
            .get_announcement(announcement_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("announcement", announcement_id));
        }

        let favorite = self
            .favorites
            .add_favorite(NewFavorite {
                announcement_id,
                user_id: actor_user_id,
            })
            .await?;

        info!(
            favorite_id = favorite.id,
            announcement_id,
            user_id = actor_user_id,
            "favorite added"
        );
        Ok(favorite)
    }

    pub(crate) async fn list_favorites(
        &self,
        actor_user_id: i64,
    ) -> Result<Vec<Favorite>, DomainError> {
        self.favorites.list_by_user(actor_user_id).await
    }

    pub(crate) async fn delete_favorite(
        &self,
        actor_user_id: i64,
        favorite_id: i64,
    ) -> Result<(), DomainError> {
        let current = self
            .favorites
            .find_by_id(favorite_id)
            .await?
            .ok_or_else(|| DomainError::not_found("favorite", favorite_id))?;
        ensure_owner(current.user_id, actor_user_id)?;

        if !self.favorites.delete_favorite(favorite_id).await? {
            return Err(DomainError::not_found("favorite", favorite_id));
        }

        info!(favorite_id, user_id = actor_user_id, "favorite removed");
        Ok(())
    }
}
