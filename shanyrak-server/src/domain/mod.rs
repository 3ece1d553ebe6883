pub(crate) mod announcement;
pub(crate) mod comment;
pub(crate) mod error;
pub(crate) mod favorite;
pub(crate) mod user;
mod validation;
