use tracing::info;

use super::policy::ensure_owner;
use crate::data::announcement_repository::AnnouncementRepository;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::{Comment, CommentRequest};
use crate::domain::error::DomainError;

pub(crate) struct CommentService<C: CommentRepository, A: AnnouncementRepository> {
    comments: C,
    announcements: A,
}

impl<C: CommentRepository, A: AnnouncementRepository> CommentService<C, A> {
    pub(crate) fn new(comments: C, announcements: A) -> Self {
        Self {
            comments,
            announcements,
        }
    }

    pub(crate) async fn create_comment(
        &self,
        actor_user_id: i64,
        announcement_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        self.ensure_announcement_exists(announcement_id).await?;

        let comment = self
            .comments
            .create_comment(NewComment {
                announcement_id,
                user_id: actor_user_id,
                content: req.content,
            })
            .await?;

        info!(
            comment_id = comment.id,
            announcement_id,
            user_id = actor_user_id,
            "comment created"
        );
        Ok(comment)
    }

    pub(crate) async fn list_comments(
        &self,
        announcement_id: i64,
    ) -> Result<Vec<Comment>, DomainError> {
        self.ensure_announcement_exists(announcement_id).await?;
        self.comments.list_by_announcement(announcement_id).await
    }

    pub(crate) async fn update_comment(
        &self,
        actor_user_id: i64,
        announcement_id: i64,
        comment_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        let current = self.get_comment(announcement_id, comment_id).await?;
        ensure_owner(current.user_id, actor_user_id)?;

        self.comments
            .update_comment(announcement_id, comment_id, actor_user_id, req.content)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    pub(crate) async fn delete_comment(
        &self,
        actor_user_id: i64,
        announcement_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        let current = self.get_comment(announcement_id, comment_id).await?;
        ensure_owner(current.user_id, actor_user_id)?;

        let deleted = self
            .comments
            .delete_comment(announcement_id, comment_id, actor_user_id)
            .await?;
        if !deleted {
            return Err(DomainError::not_found("comment", comment_id));
        }

        info!(comment_id, announcement_id, "comment deleted");
        Ok(())
    }

    async fn get_comment(
        &self,
        announcement_id: i64,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(announcement_id, comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    async fn ensure_announcement_exists(&self, announcement_id: i64) -> Result<(), DomainError> {
        match self.announcements.get_announcement(announcement_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("announcement", announcement_id)),
        }
    }
}
