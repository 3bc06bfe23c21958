//! Axum router: maps all URL paths to handlers.

use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::auth::require_admin;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    index::{index, category_terms},
    terms::{all_terms, term_detail, add_related_terms},
    recommendations::{recommendations_list, recommendation_detail},
    api::{api_terms, api_term_detail, api_categories, api_category_detail},
    system::health,
};

/// Extension for registering a path under both `/x` and `/x/`.
trait RouteSlashed {
    fn route_slashed(self, path: &str, method_router: MethodRouter<SharedState>) -> Self;
}

impl RouteSlashed for Router<SharedState> {
    fn route_slashed(self, path: &str, method_router: MethodRouter<SharedState>) -> Self {
        self.route(path, method_router.clone())
            .route(&format!("{path}/"), method_router)
    }
}

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let media_root = state.config.server.media_root.clone();
    let shared: SharedState = Arc::new(state);

    // Everything here answers 403 without a valid admin bearer token
    let admin = Router::<SharedState>::new()
        .route_slashed("/api/terms",           get(api_terms))
        .route_slashed("/api/terms/{id}",      get(api_term_detail))
        .route_slashed("/api/categories",      get(api_categories))
        .route_slashed("/api/categories/{id}", get(api_category_detail))
        .route_slashed("/terms/{id}/related",  post(add_related_terms))
        .route_layer(middleware::from_fn_with_state(shared.clone(), require_admin));

    Router::<SharedState>::new()
        // Pages
        .route("/", get(index))
        .route_slashed("/terms",                       get(all_terms))
        .route_slashed("/terms/{id}",                  get(term_detail))
        .route_slashed("/category/{id}/terms",         get(category_terms))
        .route_slashed("/recommendations_list",        get(recommendations_list))
        .route_slashed("/recommendation_detail/{id}",  get(recommendation_detail))
        .route("/health", get(health))

        .merge(admin)

        // Uploaded images
        .nest_service("/media", ServeDir::new(media_root))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
