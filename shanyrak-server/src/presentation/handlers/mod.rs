pub(crate) mod announcements;
pub(crate) mod auth;
pub(crate) mod comments;
pub(crate) mod favorites;
