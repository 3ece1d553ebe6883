pub(crate) mod announcement_repository;
pub(crate) mod comment_repository;
pub(crate) mod favorite_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;
