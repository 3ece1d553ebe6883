use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::announcements::{
    AnnouncementDto, AnnouncementTypeDto, CreateAnnouncementDto, SearchQuery, SearchResponseDto,
    UpdateAnnouncementDto,
};
use crate::presentation::handlers::auth::{
    LoginForm, RegisterDto, TokenResponseDto, UpdateProfileDto, UserDto,
};
use crate::presentation::handlers::comments::{CommentBodyDto, CommentCountDto, CommentDto};
use crate::presentation::handlers::favorites::FavoriteDto;
use crate::presentation::http_handlers::HealthDto;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http_handlers::healthz,
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::me,
        crate::presentation::handlers::auth::update_me,
        crate::presentation::handlers::auth::list_users,
        crate::presentation::handlers::announcements::search_announcements,
        crate::presentation::handlers::announcements::create_announcement,
        crate::presentation::handlers::announcements::get_announcement,
        crate::presentation::handlers::announcements::update_announcement,
        crate::presentation::handlers::announcements::delete_announcement,
        crate::presentation::handlers::comments::create_comment,
        crate::presentation::handlers::comments::list_comments,
        crate::presentation::handlers::comments::count_comments,
        crate::presentation::handlers::comments::update_comment,
        crate::presentation::handlers::comments::delete_comment,
        crate::presentation::handlers::favorites::add_favorite,
        crate::presentation::handlers::favorites::list_favorites,
        crate::presentation::handlers::favorites::delete_favorite
    ),
    components(
        schemas(
            HealthDto,
            RegisterDto,
            LoginForm,
            UpdateProfileDto,
            TokenResponseDto,
            UserDto,
            AnnouncementTypeDto,
            CreateAnnouncementDto,
            UpdateAnnouncementDto,
            SearchQuery,
            AnnouncementDto,
            SearchResponseDto,
            CommentBodyDto,
            CommentDto,
            CommentCountDto,
            FavoriteDto
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "auth", description = "Registration, login and profile"),
        (name = "shanyraks", description = "Property announcements"),
        (name = "comments", description = "Announcement comments"),
        (name = "favorites", description = "Bookmarked announcements")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
