use std::sync::LazyLock;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{FieldError, Record};

static MISSING_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^missing field `([^`]+)`").expect("pattern is valid"));

/// JSON body extractor for record shapes. Deserialization failures and
/// bound violations both reject with a 422 listing the offending fields.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Record,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;

        let record: T = parse(&bytes).map_err(|e| ApiError::Validation(vec![e]))?;

        let errors = record.validate();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        Ok(ValidJson(record))
    }
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FieldError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| describe(&e))?;
    deserializer
        .end()
        .map_err(|e| FieldError::new("body", e.to_string()))?;
    Ok(value)
}

fn describe(err: &serde_path_to_error::Error<serde_json::Error>) -> FieldError {
    let message = err.inner().to_string();
    let path = err.path().to_string();
    let parent = (path != ".").then_some(path);

    match (MISSING_FIELD.captures(&message), parent) {
        (Some(caps), Some(parent)) => {
            FieldError::new(format!("{parent}.{}", &caps[1]), "field required")
        }
        (Some(caps), None) => FieldError::new(&caps[1], "field required"),
        (None, Some(field)) => FieldError::new(field, message),
        (None, None) => FieldError::new("body", message),
    }
}
