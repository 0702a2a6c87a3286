use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::person::repository::PersonRepository;

pub mod persons;

pub use persons::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router over the repository chosen at startup.
pub fn build_router<R: PersonRepository + 'static>(state: AppState<R>, cors: CorsLayer) -> Router {
    let persons = Router::new()
        .route("/persons", get(persons::list_persons::<R>).post(persons::create_person::<R>))
        .route("/persons/:id", get(persons::get_person::<R>))
        .route("/persons/color/:color", get(persons::list_persons_by_color::<R>))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(persons)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
