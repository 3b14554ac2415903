/**
 * Request Body Field Extraction
 *
 * Helpers for pulling required and optional fields out of a JSON request
 * body. Handlers take the body as `Result<Json<Value>, JsonRejection>` and
 * run it through these helpers so that a non-JSON body and a missing key
 * each map to the exact 400 envelope clients expect, rather than axum's
 * default rejection.
 */

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;

/// Unwrap the extracted JSON body, mapping any rejection to `NotJson`
///
/// Bodies that parse but are not objects (e.g. a bare string) are also
/// treated as not-JSON, since no key lookup can succeed on them.
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(value)) if value.is_object() => Ok(value),
        _ => Err(ApiError::NotJson),
    }
}

/// Extract a required string field
pub fn require_str(body: &Value, key: &'static str) -> Result<String, ApiError> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ApiError::MissingKey(key))
}

/// Extract a required numeric field as f64
///
/// Numeric strings are accepted too. A present key of any other type is an
/// `InvalidKey` error, kept distinct from `MissingKey` so the response
/// names what is actually wrong.
pub fn require_f64(body: &Value, key: &'static str) -> Result<f64, ApiError> {
    let value = body.get(key).ok_or(ApiError::MissingKey(key))?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse::<f64>().ok()))
        .ok_or(ApiError::InvalidKey(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_str_present() {
        let body = json!({"username": "alice"});
        assert_eq!(require_str(&body, "username").unwrap(), "alice");
    }

    #[test]
    fn test_require_str_missing() {
        let body = json!({});
        let err = require_str(&body, "username").unwrap_err();
        assert_eq!(err.to_string(), "Missing key 'username'");
    }

    #[test]
    fn test_require_f64_accepts_number_and_string() {
        assert_eq!(
            require_f64(&json!({"start_time": 1000}), "start_time").unwrap(),
            1000.0
        );
        assert_eq!(
            require_f64(&json!({"start_time": "1000.5"}), "start_time").unwrap(),
            1000.5
        );
    }

    #[test]
    fn test_require_f64_missing() {
        let err = require_f64(&json!({}), "start_time").unwrap_err();
        assert_eq!(err.to_string(), "Missing key 'start_time'");
    }

    #[test]
    fn test_require_f64_present_but_non_numeric() {
        for body in [
            json!({"start_time": "not a number"}),
            json!({"start_time": [1000]}),
            json!({"start_time": null}),
        ] {
            let err = require_f64(&body, "start_time").unwrap_err();
            assert_eq!(err.to_string(), "Invalid value for key 'start_time'");
        }
    }

    #[test]
    fn test_non_object_body_is_not_json() {
        let payload = Ok(Json(json!("just a string")));
        assert!(matches!(json_body(payload), Err(ApiError::NotJson)));
    }
}
