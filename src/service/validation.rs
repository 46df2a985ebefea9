//! Request validation: field presence only.

use crate::error::AppError;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Every listed field must be present and non-null. Empty strings pass.
    pub fn require(body: &Map<String, Value>, fields: &[&str]) -> Result<(), AppError> {
        for field in fields {
            match body.get(*field) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!("{} is required", field)));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
