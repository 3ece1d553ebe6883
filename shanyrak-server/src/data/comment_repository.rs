use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) announcement_id: i64,
    pub(crate) user_id: i64,
    pub(crate) content: String,
}

/// Implementations keep `announcements.total_comments` equal to the number of
/// comment rows: create and delete adjust the counter in the same transaction.
#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;
    async fn list_by_announcement(&self, announcement_id: i64)
    -> Result<Vec<Comment>, DomainError>;
    async fn find_by_id(
        &self,
        announcement_id: i64,
        comment_id: i64,
    ) -> Result<Option<Comment>, DomainError>;
    async fn update_comment(
        &self,
        announcement_id: i64,
        comment_id: i64,
        user_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError>;
    async fn delete_comment(
        &self,
        announcement_id: i64,
        comment_id: i64,
        user_id: i64,
    ) -> Result<bool, DomainError>;
}
