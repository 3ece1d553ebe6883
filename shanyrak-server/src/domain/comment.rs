use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{normalize_required, validate_positive_i64};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) user_id: i64,
    pub(crate) announcement_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentRequest {
    pub(crate) content: String,
}

impl CommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_content(&self.content)?,
        })
    }
}

impl Comment {
    pub(crate) fn new(
        id: i64,
        content: impl Into<String>,
        user_id: i64,
        announcement_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("user_id", user_id)?;
        validate_positive_i64("announcement_id", announcement_id)?;

        Ok(Self {
            id,
            content: normalize_content(&content.into())?,
            user_id,
            announcement_id,
            created_at,
        })
    }
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    normalize_required("content", content, 2000, "must be 1..2000 chars")
}
