use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Cross-origin policy: any origin, any method, any header, credentials allowed.
///
/// A literal `*` is not permitted alongside credentials, so each of the three
/// is mirrored from the request instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/trending", get(handlers::trending::get_trending))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}
