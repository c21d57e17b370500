use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::config;
use crate::routes::AppState;

const MAX_ERROR_CHARS: usize = 50;
const MAX_COLLECTIONS: usize = 10;

#[derive(Serialize)]
pub struct RootResponse {
    service: &'static str,
    status: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        service: "Esports API",
        status: "ok",
    })
}

#[derive(Debug, Serialize)]
pub struct DiagnosticResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

// GET /test - Store connectivity report. Never fails; errors land in `database`.
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticResponse> {
    let mut response = DiagnosticResponse {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_or_not("DATABASE_URL"),
        database_name: set_or_not("DATABASE_NAME"),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Some(db) = &state.db else {
        response.database = "⚠️  Available but not initialized".to_string();
        return Json(response);
    };

    if let Err(e) = db.ping().await {
        tracing::warn!("Database ping failed: {}", e);
        response.database = format!("❌ Error: {}", truncate(&e.to_string()));
        return Json(response);
    }

    response.database = "✅ Connected & Working".to_string();
    response.connection_status = "Connected".to_string();

    match db.list_collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_COLLECTIONS);
            response.collections = names;
        }
        Err(e) => {
            tracing::warn!("Listing collections failed: {}", e);
            response.database = format!("⚠️  Connected but Error: {}", truncate(&e.to_string()));
        }
    }

    Json(response)
}

fn set_or_not(key: &str) -> String {
    let status = if config::is_set(key) { "✅ Set" } else { "❌ Not Set" };
    status.to_string()
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
