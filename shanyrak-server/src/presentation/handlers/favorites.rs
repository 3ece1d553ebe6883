use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::favorite::Favorite;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FavoriteDto {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) announcement_id: i64,
}

impl From<Favorite> for FavoriteDto {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id,
            user_id: favorite.user_id,
            announcement_id: favorite.announcement_id,
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/users/favorites/shanyraks/{id}",
    tag = "favorites",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Announcement id")
    ),
    responses(
        (status = 201, description = "Added to favorites", body = FavoriteDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Announcement not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(announcement_id): Path<i64>,
) -> AppResult<(StatusCode, Json<FavoriteDto>)> {
    let result = state
        .favorite_service
        .add_favorite(auth.user_id, announcement_id)
        .await?;
    Ok((StatusCode::CREATED, Json(FavoriteDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/auth/users/favorites/shanyraks",
    tag = "favorites",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Favorites of the current user", body = [FavoriteDto]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<(StatusCode, Json<Vec<FavoriteDto>>)> {
    let favorites = state.favorite_service.list_favorites(auth.user_id).await?;
    Ok((
        StatusCode::OK,
        Json(favorites.into_iter().map(FavoriteDto::from).collect()),
    ))
}

#[utoipa::path(
    delete,
    path = "/auth/users/favorites/shanyraks/{id}",
    tag = "favorites",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Favorite id")
    ),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Favorite not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_favorite(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(favorite_id): Path<i64>,
) -> AppResult<StatusCode> {
    state
        .favorite_service
        .delete_favorite(auth.user_id, favorite_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
