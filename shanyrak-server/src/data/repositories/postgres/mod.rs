pub(crate) mod announcement_repository;
pub(crate) mod comment_repository;
pub(crate) mod favorite_repository;
pub(crate) mod user_repository;

#[cfg(test)]
pub(crate) mod test_support;
