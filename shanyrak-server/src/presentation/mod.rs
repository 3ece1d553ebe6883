use sqlx::PgPool;
use std::sync::Arc;

use crate::application::announcement_service::AnnouncementService;
use crate::application::auth_service::AuthService;
use crate::application::comment_service::CommentService;
use crate::application::favorite_service::FavoriteService;
use crate::data::repositories::postgres::announcement_repository::PostgresAnnouncementRepository;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::favorite_repository::PostgresFavoriteRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type PgAuthService = AuthService<PostgresUserRepository>;
pub(crate) type PgAnnouncementService = AnnouncementService<PostgresAnnouncementRepository>;
pub(crate) type PgCommentService =
    CommentService<PostgresCommentRepository, PostgresAnnouncementRepository>;
pub(crate) type PgFavoriteService =
    FavoriteService<PostgresFavoriteRepository, PostgresAnnouncementRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) auth_service: Arc<PgAuthService>,
    pub(crate) announcement_service: Arc<PgAnnouncementService>,
    pub(crate) comment_service: Arc<PgCommentService>,
    pub(crate) favorite_service: Arc<PgFavoriteService>,
}

impl AppState {
    /// Wires every service onto the same pool.
    pub(crate) fn new(pool: PgPool, jwt: JwtService) -> Self {
        let users = PostgresUserRepository::new(pool.clone());
        let announcements = PostgresAnnouncementRepository::new(pool.clone());
        let comments = PostgresCommentRepository::new(pool.clone());
        let favorites = PostgresFavoriteRepository::new(pool.clone());

        Self {
            auth_service: Arc::new(AuthService::new(users, jwt)),
            announcement_service: Arc::new(AnnouncementService::new(announcements.clone())),
            comment_service: Arc::new(CommentService::new(comments, announcements.clone())),
            favorite_service: Arc::new(FavoriteService::new(favorites, announcements)),
            pool,
        }
    }
}
