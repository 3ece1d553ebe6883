use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::announcement_service::SearchResult;
use crate::data::announcement_repository::Pagination;
use crate::domain::announcement::{
    Announcement, AnnouncementRequest, AnnouncementType, SearchFilter,
};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

const DEFAULT_SEARCH_LIMIT: u32 = 5;
const DEFAULT_SEARCH_OFFSET: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AnnouncementTypeDto {
    Sell,
    Rent,
}

impl From<AnnouncementTypeDto> for AnnouncementType {
    fn from(dto: AnnouncementTypeDto) -> Self {
        match dto {
            AnnouncementTypeDto::Sell => AnnouncementType::Sell,
            AnnouncementTypeDto::Rent => AnnouncementType::Rent,
        }
    }
}

impl From<AnnouncementType> for AnnouncementTypeDto {
    fn from(kind: AnnouncementType) -> Self {
        match kind {
            AnnouncementType::Sell => AnnouncementTypeDto::Sell,
            AnnouncementType::Rent => AnnouncementTypeDto::Rent,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateAnnouncementDto {
    #[serde(rename = "type")]
    pub(crate) kind: AnnouncementTypeDto,
    #[validate(range(min = 0.0))]
    pub(crate) price: f64,
    #[validate(length(min = 1, max = 255))]
    pub(crate) address: String,
    #[validate(range(exclusive_min = 0.0))]
    pub(crate) area: f64,
    #[validate(range(min = 1))]
    pub(crate) rooms_count: i32,
    #[validate(length(max = 5000))]
    pub(crate) description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateAnnouncementDto {
    #[serde(rename = "type")]
    pub(crate) kind: AnnouncementTypeDto,
    #[validate(range(min = 0.0))]
    pub(crate) price: f64,
    #[validate(length(min = 1, max = 255))]
    pub(crate) address: String,
    #[validate(range(exclusive_min = 0.0))]
    pub(crate) area: f64,
    #[validate(range(min = 1))]
    pub(crate) rooms_count: i32,
    #[validate(length(max = 5000))]
    pub(crate) description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SearchQuery {
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
    /// 1-based page number, in units of `limit`.
    #[validate(range(min = 1))]
    pub(crate) offset: Option<u32>,
    #[serde(rename = "type")]
    pub(crate) kind: Option<AnnouncementTypeDto>,
    #[validate(range(min = 1))]
    pub(crate) rooms_count: Option<i32>,
    #[validate(range(min = 0.0))]
    pub(crate) price_from: Option<f64>,
    #[validate(range(min = 0.0))]
    pub(crate) price_until: Option<f64>,
}

impl SearchQuery {
    fn into_parts(self) -> (SearchFilter, Pagination) {
        let pagination = Pagination {
            limit: self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            offset: self.offset.unwrap_or(DEFAULT_SEARCH_OFFSET),
        };
        let filter = SearchFilter {
            kind: self.kind.map(AnnouncementType::from),
            rooms_count: self.rooms_count,
            price_from: self.price_from,
            price_until: self.price_until,
        };
        (filter, pagination)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AnnouncementDto {
    pub(crate) id: i64,
    #[serde(rename = "type")]
    pub(crate) kind: AnnouncementTypeDto,
    pub(crate) price: f64,
    pub(crate) address: String,
    pub(crate) area: f64,
    pub(crate) rooms_count: i32,
    pub(crate) description: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) user_id: i64,
    pub(crate) total_comments: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SearchResponseDto {
    pub(crate) total: i64,
    pub(crate) announcements: Vec<AnnouncementDto>,
}

impl From<Announcement> for AnnouncementDto {
    fn from(announcement: Announcement) -> Self {
        Self {
            id: announcement.id,
            kind: announcement.kind.into(),
            price: announcement.price,
            address: announcement.address,
            area: announcement.area,
            rooms_count: announcement.rooms_count,
            description: announcement.description,
            created_at: announcement.created_at,
            user_id: announcement.user_id,
            total_comments: announcement.total_comments,
        }
    }
}

impl From<SearchResult> for SearchResponseDto {
    fn from(result: SearchResult) -> Self {
        Self {
            total: result.total,
            announcements: result
                .announcements
                .into_iter()
                .map(AnnouncementDto::from)
                .collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/shanyraks/search",
    tag = "shanyraks",
    params(
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100), default 5"),
        ("offset" = Option<u32>, Query, description = "Page number (>= 1), default 1"),
        ("type" = Option<AnnouncementTypeDto>, Query, description = "sell or rent"),
        ("rooms_count" = Option<i32>, Query, description = "Exact number of rooms"),
        ("price_from" = Option<f64>, Query, description = "Lower price bound, inclusive"),
        ("price_until" = Option<f64>, Query, description = "Upper price bound, inclusive")
    ),
    responses(
        (status = 200, description = "Matching announcements", body = SearchResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn search_announcements(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<(StatusCode, Json<SearchResponseDto>)> {
    query.validate()?;
    let (filter, pagination) = query.into_parts();

    let result = state
        .announcement_service
        .search(filter, pagination)
        .await?;

    Ok((StatusCode::OK, Json(SearchResponseDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/shanyraks/",
    tag = "shanyraks",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateAnnouncementDto,
    responses(
        (status = 201, description = "Announcement created", body = AnnouncementDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_announcement(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreateAnnouncementDto>,
) -> AppResult<(StatusCode, Json<AnnouncementDto>)> {
    dto.validate()?;
    let req = AnnouncementRequest {
        kind: dto.kind.into(),
        price: dto.price,
        address: dto.address,
        area: dto.area,
        rooms_count: dto.rooms_count,
        description: dto.description,
    };

    let result = state
        .announcement_service
        .create_announcement(auth.user_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(AnnouncementDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/shanyraks/{id}",
    tag = "shanyraks",
    params(
        ("id" = i64, Path, description = "Announcement id")
    ),
    responses(
        (status = 200, description = "Announcement found", body = AnnouncementDto),
        (status = 404, description = "Announcement not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<AnnouncementDto>)> {
    let result = state.announcement_service.get_announcement(id).await?;

    Ok((StatusCode::OK, Json(AnnouncementDto::from(result))))
}

#[utoipa::path(
    patch,
    path = "/shanyraks/{id}",
    tag = "shanyraks",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Announcement id")
    ),
    request_body = UpdateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement updated", body = AnnouncementDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Announcement not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_announcement(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateAnnouncementDto>,
) -> AppResult<(StatusCode, Json<AnnouncementDto>)> {
    dto.validate()?;
    let req = AnnouncementRequest {
        kind: dto.kind.into(),
        price: dto.price,
        address: dto.address,
        area: dto.area,
        rooms_count: dto.rooms_count,
        description: dto.description,
    };

    let result = state
        .announcement_service
        .update_announcement(auth.user_id, id, req)
        .await?;
    Ok((StatusCode::OK, Json(AnnouncementDto::from(result))))
}

#[utoipa::path(
    delete,
    path = "/shanyraks/{id}",
    tag = "shanyraks",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Announcement id")
    ),
    responses(
        (status = 204, description = "Announcement deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Announcement not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_announcement(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state
        .announcement_service
        .delete_announcement(auth.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
