use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::comment::{Comment, CommentRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CommentBodyDto {
    #[validate(length(min = 1, max = 2000))]
    pub(crate) content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) user_id: i64,
    pub(crate) announcement_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentCountDto {
    pub(crate) announcement_id: i64,
    pub(crate) count: i64,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            user_id: comment.user_id,
            announcement_id: comment.announcement_id,
            created_at: comment.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/shanyraks/{id}/comments",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Announcement id")
    ),
    request_body = CommentBodyDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Announcement not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(announcement_id): Path<i64>,
    Json(dto): Json<CommentBodyDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;
    let req = CommentRequest {
        content: dto.content,
    };

    let result = state
        .comment_service
        .create_comment(auth.user_id, announcement_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/shanyraks/{id}/comments",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Announcement id")
    ),
    responses(
        (status = 200, description = "Comments of the announcement", body = [CommentDto]),
        (status = 404, description = "Announcement not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_comments(
    State(state): State<AppState>,
    Path(announcement_id): Path<i64>,
) -> AppResult<(StatusCode, Json<Vec<CommentDto>>)> {
    let comments = state.comment_service.list_comments(announcement_id).await?;

    Ok((
        StatusCode::OK,
        Json(comments.into_iter().map(CommentDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/shanyraks/{id}/comments/count",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Announcement id")
    ),
    responses(
        (status = 200, description = "Number of stored comments", body = CommentCountDto),
        (status = 404, description = "Announcement not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn count_comments(
    State(state): State<AppState>,
    Path(announcement_id): Path<i64>,
) -> AppResult<(StatusCode, Json<CommentCountDto>)> {
    let count = state
        .announcement_service
        .comment_count(announcement_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CommentCountDto {
            announcement_id,
            count,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/shanyraks/{id}/comments/{comment_id}",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Announcement id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentBodyDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((announcement_id, comment_id)): Path<(i64, i64)>,
    Json(dto): Json<CommentBodyDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;
    let req = CommentRequest {
        content: dto.content,
    };

    let result = state
        .comment_service
        .update_comment(auth.user_id, announcement_id, comment_id, req)
        .await?;
    Ok((StatusCode::OK, Json(CommentDto::from(result))))
}

#[utoipa::path(
    delete,
    path = "/shanyraks/{id}/comments/{comment_id}",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Announcement id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((announcement_id, comment_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    state
        .comment_service
        .delete_comment(auth.user_id, announcement_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
