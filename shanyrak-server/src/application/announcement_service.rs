use tracing::info;

use super::policy::ensure_owner;
use crate::data::announcement_repository::{
    AnnouncementPatch, AnnouncementRepository, NewAnnouncement, Pagination,
};
use crate::domain::announcement::{Announcement, AnnouncementRequest, SearchFilter};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct SearchResult {
    pub(crate) announcements: Vec<Announcement>,
    pub(crate) total: i64,
}

pub(crate) struct AnnouncementService<R: AnnouncementRepository> {
    repo: R,
}

impl<R: AnnouncementRepository> AnnouncementService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_announcement(
        &self,
        owner_id: i64,
        req: AnnouncementRequest,
    ) -> Result<Announcement, DomainError> {
        let req = req.validate()?;

        let new_announcement = NewAnnouncement {
            kind: req.kind,
            price: req.price,
            address: req.address,
            area: req.area,
            rooms_count: req.rooms_count,
            description: req.description,
            user_id: owner_id,
        };
        let announcement = self.repo.create_announcement(new_announcement).await?;

        info!(
            announcement_id = announcement.id,
            user_id = owner_id,
            "announcement created"
        );
        Ok(announcement)
    }

    pub(crate) async fn get_announcement(&self, id: i64) -> Result<Announcement, DomainError> {
        self.repo
            .get_announcement(id)
            .await?
            .ok_or_else(|| DomainError::not_found("announcement", id))
    }

    pub(crate) async fn update_announcement(
        &self,
        actor_user_id: i64,
        id: i64,
        req: AnnouncementRequest,
    ) -> Result<Announcement, DomainError> {
        let req = req.validate()?;
        let current = self.get_announcement(id).await?;
        ensure_owner(current.user_id, actor_user_id)?;

        let patch = AnnouncementPatch {
            kind: req.kind,
            price: req.price,
            address: req.address,
            area: req.area,
            rooms_count: req.rooms_count,
            description: req.description,
        };
        self.repo
            .update_announcement(id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("announcement", id))
    }

    pub(crate) async fn delete_announcement(
        &self,
        actor_user_id: i64,
        id: i64,
    ) -> Result<(), DomainError> {
        let current = self.get_announcement(id).await?;
        ensure_owner(current.user_id, actor_user_id)?;

        if !self.repo.delete_announcement(id).await? {
            return Err(DomainError::not_found("announcement", id));
        }

        info!(announcement_id = id, user_id = actor_user_id, "announcement deleted");
        Ok(())
    }

    pub(crate) async fn search(
        &self,
        filter: SearchFilter,
        pagination: Pagination,
    ) -> Result<SearchResult, DomainError> {
        if pagination.limit == 0 {
            return Err(DomainError::Validation {
                field: "limit",
                message: "must be > 0",
            });
        }
        if pagination.offset == 0 {
            return Err(DomainError::Validation {
                field: "offset",
                message: "must be >= 1",
            });
        }
        let filter = filter.validate()?;

        let announcements = self.repo.search(&filter, pagination).await?;
        let total = self.repo.count(&filter).await?;

        Ok(SearchResult {
            announcements,
            total,
        })
    }

    pub(crate) async fn comment_count(&self, id: i64) -> Result<i64, DomainError> {
        self.get_announcement(id).await?;
        self.repo.comment_count(id).await
    }
}
