use axum::Router;

use super::AppState;

pub(crate) mod announcements;
pub(crate) mod auth;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::router(state.clone()))
        .merge(announcements::router(state))
}
