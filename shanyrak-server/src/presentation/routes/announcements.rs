use axum::Router;
use axum::middleware;
use axum::routing::{get, patch, post};

use crate::presentation::AppState;
use crate::presentation::handlers::announcements::{
    create_announcement, delete_announcement, get_announcement, search_announcements,
    update_announcement,
};
use crate::presentation::handlers::comments::{
    count_comments, create_comment, delete_comment, list_comments, update_comment,
};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/shanyraks/search", get(search_announcements))
        .route("/shanyraks/{id}", get(get_announcement))
        .route("/shanyraks/{id}/comments", get(list_comments))
        .route("/shanyraks/{id}/comments/count", get(count_comments));

    let protected = Router::new()
        .route("/shanyraks/", post(create_announcement))
        .route(
            "/shanyraks/{id}",
            patch(update_announcement).delete(delete_announcement),
        )
        .route("/shanyraks/{id}/comments", post(create_comment))
        .route(
            "/shanyraks/{id}/comments/{comment_id}",
            patch(update_comment).delete(delete_comment),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    public.merge(protected)
}
