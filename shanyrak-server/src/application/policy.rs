use crate::domain::error::DomainError;

/// Only the user who created a row may mutate it.
pub(super) fn ensure_owner(owner_id: i64, actor_user_id: i64) -> Result<(), DomainError> {
    if owner_id != actor_user_id {
        return Err(DomainError::Forbidden);
    }
    Ok(())
}
