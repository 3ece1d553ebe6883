use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{list_users, login, me, register, update_me};
use crate::presentation::handlers::favorites::{add_favorite, delete_favorite, list_favorites};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/users/", post(register))
        .route("/auth/users/login", post(login));

    let protected = Router::new()
        .route("/auth/users/", get(list_users))
        .route("/auth/users/me", get(me).patch(update_me))
        .route("/auth/users/favorites/shanyraks", get(list_favorites))
        .route(
            "/auth/users/favorites/shanyraks/{id}",
            post(add_favorite).delete(delete_favorite),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    public.merge(protected)
}
