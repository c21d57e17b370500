use axum::{
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;

use models::{Game, Match, Player, Team, Tournament};
use routes::{AppState, health, records, schema};

/// Every route of the service, with CORS and request tracing applied.
pub fn app(state: AppState) -> Router {
    // Any origin, method and header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and diagnostics
        .route("/", get(health::root))
        .route("/test", get(health::test_database))
        .route("/schema", get(schema::get_schema))

        // Record endpoints
        .route(
            "/games",
            get(records::list_documents::<Game>).post(records::create_document::<Game>),
        )
        .route(
            "/players",
            get(records::list_documents::<Player>).post(records::create_document::<Player>),
        )
        .route(
            "/teams",
            get(records::list_documents::<Team>).post(records::create_document::<Team>),
        )
        .route(
            "/tournaments",
            get(records::list_documents::<Tournament>)
                .post(records::create_document::<Tournament>),
        )
        .route(
            "/matches",
            get(records::list_documents::<Match>).post(records::create_document::<Match>),
        )

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
