//! Axum router configuration
//!
//! ```text
//! /
//! ├── /articles   - GET latest, POST create (access key checked)
//! └── /health     - Liveness check
//! ```
//!
//! CORS is applied outermost so preflight requests are answered before
//! the access key check.

use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::handlers::{create_article, health, latest_article, method_not_allowed};
use crate::middleware::{cors, require_access_key};
use crate::state::AppState;

/// Build the complete router
pub fn build_router(state: AppState) -> Router {
    let articles = Router::new()
        .route(
            "/articles",
            get(latest_article)
                .post(create_article)
                .fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_key,
        ));

    Router::new()
        .merge(articles)
        .route("/health", get(health))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}
