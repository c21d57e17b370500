use axum::response::Json;
use serde::Serialize;

use crate::models::{SchemaExport, export_schemas};

#[derive(Serialize)]
pub struct SchemaResponse {
    pub schemas: Vec<SchemaExport>,
}

// GET /schema - Field names and types of every record kind
pub async fn get_schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        schemas: export_schemas(),
    })
}
