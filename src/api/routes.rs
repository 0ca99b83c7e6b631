use axum::{
    routing::{any, get},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::state::AppState;

use super::handlers;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::form))
        .route("/shorten", get(handlers::shorten).post(handlers::shorten))
        .route("/short/", get(handlers::missing_key))
        .route("/short/{*short_key}", get(handlers::redirect))
        .fallback(handlers::form)
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(
                        DefaultOnResponse::new()
                            .latency_unit(LatencyUnit::Millis)
                            .level(Level::DEBUG),
                    )
                    .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
            ),
        )
        .with_state(state)
}
