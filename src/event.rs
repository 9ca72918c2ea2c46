use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

pub const INSTANCE_ID_FIELD: &str = "instance_id";

/// What the function hands back to the Lambda runtime on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl PowerResponse {
    pub fn ok(body: String) -> Self {
        PowerResponse {
            status_code: 200,
            body,
        }
    }
}

/// Reads `instance_id` from the event. The value is returned as-is; EC2 decides
/// whether it is a real instance.
pub fn instance_id(payload: &Value) -> Result<String, AppError> {
    match payload.get(INSTANCE_ID_FIELD) {
        None => Err(AppError::MissingInstanceId),
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) => Err(AppError::InvalidInstanceId(other.clone())),
    }
}
