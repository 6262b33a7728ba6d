use axum::{middleware, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::shared::AppState;

/// Builds the application router: every route lives under `/api`
pub fn build_router(state: AppState) -> Router {
    // Auth
    let protected = Router::new()
        .route("/change-password", post(auth::change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .merge(protected);

    // Services (protected), not wired yet:
    // let services = Router::new()
    //     .route("/", get(services::list_services))
    //     .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    let api = Router::new().nest("/auth", auth_routes);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
