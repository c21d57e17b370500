use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// A single rejected field in a request body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub(crate) fn check_min<T>(field: &str, value: T, min: T) -> Option<FieldError>
where
    T: PartialOrd + Display,
{
    (value < min).then(|| FieldError::new(field, format!("must be greater than or equal to {min}")))
}

pub(crate) fn check_max<T>(field: &str, value: T, max: T) -> Option<FieldError>
where
    T: PartialOrd + Display,
{
    (value > max).then(|| FieldError::new(field, format!("must be less than or equal to {max}")))
}

pub(crate) fn check_email(field: &str, value: &str) -> Option<FieldError> {
    (!EMAIL.is_match(value)).then(|| FieldError::new(field, "not a valid email address"))
}
