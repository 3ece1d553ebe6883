//! In-memory repositories for service tests. They share one `Tables` value so
//! comment writes can adjust the announcement counter like the SQL does.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::data::announcement_repository::{
    AnnouncementPatch, AnnouncementRepository, NewAnnouncement, Pagination,
};
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::favorite_repository::{FavoriteRepository, NewFavorite};
use crate::domain::announcement::{Announcement, AnnouncementType, SearchFilter};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::favorite::Favorite;

#[derive(Default)]
pub(crate) struct Tables {
    next_id: i64,
    pub(crate) announcements: Vec<Announcement>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) favorites: Vec<Favorite>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn announcement_mut(&mut self, id: i64) -> Option<&mut Announcement> {
        self.announcements.iter_mut().find(|a| a.id == id)
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeDb {
    tables: Arc<Mutex<Tables>>,
}

impl FakeDb {
    pub(crate) fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("tables mutex poisoned")
    }

    pub(crate) fn seed_announcement(
        &self,
        user_id: i64,
        kind: AnnouncementType,
        price: f64,
    ) -> Announcement {
        let mut tables = self.tables();
        let announcement = Announcement {
            id: tables.next_id(),
            kind,
            price,
            address: "Abay ave 10".to_string(),
            area: 54.5,
            rooms_count: 2,
            description: "Sunny flat".to_string(),
            created_at: Utc::now(),
            user_id,
            total_comments: 0,
        };
        tables.announcements.push(announcement.clone());
        announcement
    }

    pub(crate) fn seed_favorite(&self, user_id: i64, announcement_id: i64) -> Favorite {
        let mut tables = self.tables();
        let favorite = Favorite {
            id: tables.next_id(),
            user_id,
            announcement_id,
        };
        tables.favorites.push(favorite.clone());
        favorite
    }
}

fn matches_filter(a: &Announcement, filter: &SearchFilter) -> bool {
    filter.kind.is_none_or(|kind| a.kind == kind)
        && filter.rooms_count.is_none_or(|rooms| a.rooms_count == rooms)
        && filter.price_from.is_none_or(|from| a.price >= from)
        && filter.price_until.is_none_or(|until| a.price <= until)
}

#[async_trait]
impl AnnouncementRepository for FakeDb {
    async fn create_announcement(
        &self,
        input: NewAnnouncement,
    ) -> Result<Announcement, DomainError> {
        let mut tables = self.tables();
        let announcement = Announcement {
            id: tables.next_id(),
            kind: input.kind,
            price: input.price,
            address: input.address,
            area: input.area,
            rooms_count: input.rooms_count,
            description: input.description,
            created_at: Utc::now(),
            user_id: input.user_id,
            total_comments: 0,
        };
        tables.announcements.push(announcement.clone());
        Ok(announcement)
    }

    async fn get_announcement(&self, id: i64) -> Result<Option<Announcement>, DomainError> {
        Ok(self
            .tables()
            .announcements
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn update_announcement(
        &self,
        id: i64,
        patch: AnnouncementPatch,
    ) -> Result<Option<Announcement>, DomainError> {
        let mut tables = self.tables();
        Ok(tables.announcement_mut(id).map(|a| {
            a.kind = patch.kind;
            a.price = patch.price;
            a.address = patch.address;
            a.area = patch.area;
            a.rooms_count = patch.rooms_count;
            a.description = patch.description;
            a.clone()
        }))
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables();
        let before = tables.announcements.len();
        tables.announcements.retain(|a| a.id != id);
        tables.comments.retain(|c| c.announcement_id != id);
        tables.favorites.retain(|f| f.announcement_id != id);
        Ok(tables.announcements.len() < before)
    }

    async fn search(
        &self,
        filter: &SearchFilter,
        pagination: Pagination,
    ) -> Result<Vec<Announcement>, DomainError> {
        let tables = self.tables();
        Ok(tables
            .announcements
            .iter()
            .rev()
            .filter(|a| matches_filter(a, filter))
            .skip(pagination.sql_offset() as usize)
            .take(pagination.sql_limit() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &SearchFilter) -> Result<i64, DomainError> {
        let tables = self.tables();
        Ok(tables
            .announcements
            .iter()
            .filter(|a| matches_filter(a, filter))
            .count() as i64)
    }

    async fn comment_count(&self, id: i64) -> Result<i64, DomainError> {
        let tables = self.tables();
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.announcement_id == id)
            .count() as i64)
    }
}

#[async_trait]
impl CommentRepository for FakeDb {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let announcement = tables
            .announcement_mut(input.announcement_id)
            .ok_or_else(|| DomainError::not_found("announcement", input.announcement_id))?;
        announcement.total_comments += 1;

        let comment = Comment {
            id,
            content: input.content,
            user_id: input.user_id,
            announcement_id: input.announcement_id,
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_by_announcement(
        &self,
        announcement_id: i64,
    ) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .tables()
            .comments
            .iter()
            .filter(|c| c.announcement_id == announcement_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        announcement_id: i64,
        comment_id: i64,
    ) -> Result<Option<Comment>, DomainError> {
        Ok(self
            .tables()
            .comments
            .iter()
            .find(|c| c.id == comment_id && c.announcement_id == announcement_id)
            .cloned())
    }

    async fn update_comment(
        &self,
        announcement_id: i64,
        comment_id: i64,
        user_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError> {
        let mut tables = self.tables();
        Ok(tables
            .comments
            .iter_mut()
            .find(|c| {
                c.id == comment_id && c.announcement_id == announcement_id && c.user_id == user_id
            })
            .map(|c| {
                c.content = content;
                c.clone()
            }))
    }

    async fn delete_comment(
        &self,
        announcement_id: i64,
        comment_id: i64,
        user_id: i64,
    ) -> Result<bool, DomainError> {
        let mut tables = self.tables();
        let before = tables.comments.len();
        tables.comments.retain(|c| {
            !(c.id == comment_id && c.announcement_id == announcement_id && c.user_id == user_id)
        });
        let deleted = tables.comments.len() < before;
        if deleted && let Some(announcement) = tables.announcement_mut(announcement_id) {
            announcement.total_comments -= 1;
        }
        Ok(deleted)
    }
}

#[async_trait]
impl FavoriteRepository for FakeDb {
    async fn add_favorite(&self, input: NewFavorite) -> Result<Favorite, DomainError> {
        let mut tables = self.tables();
        if tables.announcement_mut(input.announcement_id).is_none() {
            return Err(DomainError::not_found("announcement", input.announcement_id));
        }
        let favorite = Favorite {
            id: tables.next_id(),
            user_id: input.user_id,
            announcement_id: input.announcement_id,
        };
        tables.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Favorite>, DomainError> {
        Ok(self
            .tables()
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, favorite_id: i64) -> Result<Option<Favorite>, DomainError> {
        Ok(self
            .tables()
            .favorites
            .iter()
            .find(|f| f.id == favorite_id)
            .cloned())
    }

    async fn delete_favorite(&self, favorite_id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables();
        let before = tables.favorites.len();
        tables.favorites.retain(|f| f.id != favorite_id);
        Ok(tables.favorites.len() < before)
    }
}
