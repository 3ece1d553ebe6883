pub(crate) mod announcement_service;
pub(crate) mod auth_service;
pub(crate) mod comment_service;
pub(crate) mod favorite_service;
mod policy;

#[cfg(test)]
mod fakes;
