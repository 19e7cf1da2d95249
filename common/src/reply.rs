//! Server reply envelope
//!
//! Mutating endpoints answer `{"success": bool, "message"?: str, "error"?: str}`.
//! The envelope is parsed into [`ServerReply`] before anything branches on
//! it; a payload without a boolean `success` is rejected.

use crate::error::{Error, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerReply {
    Success { message: Option<String> },
    Failure { error: Option<String> },
}

impl ServerReply {
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            return Err(Error::MalformedResponse("expected a JSON object".to_string()));
        };
        let success = map
            .get("success")
            .and_then(Value::as_bool)
            .ok_or_else(|| Error::MalformedResponse("missing boolean `success`".to_string()))?;

        if success {
            Ok(ServerReply::Success {
                message: non_empty_str(map.get("message")),
            })
        } else {
            Ok(ServerReply::Failure {
                error: non_empty_str(map.get("error")).or_else(|| non_empty_str(map.get("message"))),
            })
        }
    }

    /// Success message, or `Error::Server` carrying the server's error text
    /// (or `fallback` when it sent none)
    pub fn into_result(self, fallback: &str) -> Result<Option<String>> {
        match self {
            ServerReply::Success { message } => Ok(message),
            ServerReply::Failure { error } => {
                Err(Error::Server(error.unwrap_or_else(|| fallback.to_string())))
            }
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_message() {
        let reply = ServerReply::from_json(r#"{"success": true, "message": "OK"}"#).unwrap();
        assert_eq!(reply, ServerReply::Success { message: Some("OK".to_string()) });
    }

    #[test]
    fn test_failure_with_error() {
        let reply = ServerReply::from_json(r#"{"success": false, "error": "Ogiltigt"}"#).unwrap();
        let err = reply.into_result("Okänt fel").unwrap_err();
        assert!(matches!(err, Error::Server(ref m) if m == "Ogiltigt"));
    }

    #[test]
    fn test_failure_without_error_uses_fallback() {
        let reply = ServerReply::from_json(r#"{"success": false, "error": ""}"#).unwrap();
        let err = reply.into_result("Okänt fel").unwrap_err();
        assert!(matches!(err, Error::Server(ref m) if m == "Okänt fel"));
    }

    #[test]
    fn test_missing_success_is_malformed() {
        let err = ServerReply::from_json(r#"{"message": "Measurement deleted successfully."}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_string_success_is_malformed() {
        assert!(ServerReply::from_json(r#"{"success": "true"}"#).is_err());
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(ServerReply::from_json("[1, 2]").is_err());
        assert!(ServerReply::from_json("<html>").is_err());
    }
}
