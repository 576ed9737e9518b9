// src/api/error.rs
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// The two failure classes of the HR API. `Transport` means no usable
/// response arrived at all; `Rejected` is a non-2xx response whose body may
/// carry a structured `detail` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request rejected with status {status}")]
    Rejected {
        status: StatusCode,
        /// Human-readable message extracted from the error body, if the body
        /// had one of the known `detail` shapes.
        detail: Option<String>,
    },
}

impl ApiError {
    /// Message extracted from the rejection body, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            ApiError::Transport(_) => None,
        }
    }
}

/// Extract a user-facing message from an error body. The API answers either
/// with `{"detail": "..."}` or, for validation errors, with
/// `{"detail": [{"msg": "..."}, ...]}` whose messages get joined with ", ".
/// Any other shape yields nothing and the caller picks its own fallback.
pub fn parse_detail(body: &Value) -> Option<String> {
    match body.get("detail") {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Array(entries)) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join(", "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_detail_passes_through() {
        let body = json!({"detail": "Invalid credentials"});
        assert_eq!(parse_detail(&body).as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_validation_messages_are_joined() {
        let body = json!({"detail": [{"msg": "field required"}, {"msg": "too short"}]});
        assert_eq!(
            parse_detail(&body).as_deref(),
            Some("field required, too short")
        );
    }

    #[test]
    fn test_unknown_shapes_yield_nothing() {
        assert_eq!(parse_detail(&json!({})), None);
        assert_eq!(parse_detail(&json!({"detail": 42})), None);
        assert_eq!(parse_detail(&json!({"detail": []})), None);
        assert_eq!(parse_detail(&json!({"detail": [{"loc": "body"}]})), None);
        assert_eq!(parse_detail(&Value::Null), None);
    }
}
