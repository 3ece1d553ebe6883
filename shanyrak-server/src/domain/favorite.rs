use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::validate_positive_i64;

/// A user's bookmark of an announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Favorite {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) announcement_id: i64,
}

impl Favorite {
    pub(crate) fn new(id: i64, user_id: i64, announcement_id: i64) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("user_id", user_id)?;
        validate_positive_i64("announcement_id", announcement_id)?;

        Ok(Self {
            id,
            user_id,
            announcement_id,
        })
    }
}
