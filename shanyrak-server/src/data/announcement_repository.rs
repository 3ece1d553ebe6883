use async_trait::async_trait;

use crate::domain::announcement::{Announcement, AnnouncementType, SearchFilter};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewAnnouncement {
    pub(crate) kind: AnnouncementType,
    pub(crate) price: f64,
    pub(crate) address: String,
    pub(crate) area: f64,
    pub(crate) rooms_count: i32,
    pub(crate) description: String,
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct AnnouncementPatch {
    pub(crate) kind: AnnouncementType,
    pub(crate) price: f64,
    pub(crate) address: String,
    pub(crate) area: f64,
    pub(crate) rooms_count: i32,
    pub(crate) description: String,
}

/// 1-indexed page number (`offset`) in units of `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) limit: u32,
    pub(crate) offset: u32,
}

impl Pagination {
    pub(crate) fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    pub(crate) fn sql_offset(&self) -> i64 {
        i64::from(self.offset.saturating_sub(1)) * i64::from(self.limit)
    }
}

#[async_trait]
pub(crate) trait AnnouncementRepository: Send + Sync {
    async fn create_announcement(&self, input: NewAnnouncement)
    -> Result<Announcement, DomainError>;
    async fn get_announcement(&self, id: i64) -> Result<Option<Announcement>, DomainError>;
    async fn update_announcement(
        &self,
        id: i64,
        patch: AnnouncementPatch,
    ) -> Result<Option<Announcement>, DomainError>;
    async fn delete_announcement(&self, id: i64) -> Result<bool, DomainError>;
    async fn search(
        &self,
        filter: &SearchFilter,
        pagination: Pagination,
    ) -> Result<Vec<Announcement>, DomainError>;
    async fn count(&self, filter: &SearchFilter) -> Result<i64, DomainError>;
    async fn comment_count(&self, id: i64) -> Result<i64, DomainError>;
}
