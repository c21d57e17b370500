use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::{FieldError, Record};
use crate::routes::AppState;

// Query parameters for listing documents
#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    50
}

#[derive(Serialize)]
pub struct ListResponse {
    pub items: Vec<Value>,
}

#[derive(Serialize)]
pub struct InsertResponse {
    pub inserted_id: String,
}

// GET /games, /players, ... - List stored documents of one kind
pub async fn list_documents<R: Record>(
    State(state): State<AppState>,
    params: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(params) = params
        .map_err(|e| ApiError::Validation(vec![FieldError::new("limit", e.body_text())]))?;

    let items = state
        .store()?
        .get_documents(R::KIND, &Map::new(), params.limit)
        .await?;

    Ok(Json(ListResponse { items }))
}

// POST /games, /players, ... - Insert one validated record
pub async fn create_document<R: Record>(
    State(state): State<AppState>,
    ValidJson(record): ValidJson<R>,
) -> Result<Json<InsertResponse>, ApiError> {
    let inserted_id = state.store()?.create_document(R::KIND, &record).await?;

    tracing::info!(collection = R::KIND, id = %inserted_id, "record created");
    Ok(Json(InsertResponse { inserted_id }))
}
