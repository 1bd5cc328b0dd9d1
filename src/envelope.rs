//! The uniform JSON body every endpoint answers with.

use serde::Serialize;
use serde_json::Value;

/// `{ "success": bool, "message"?: string, "data"?: any }`
///
/// Absent fields are omitted from the output, and keys always serialise in
/// the order `success`, `message`, `data`.
///
/// ```rust
/// use devcamper::Envelope;
///
/// let body = serde_json::to_string(&Envelope::success("Show bootcamp 42")).unwrap();
/// assert_eq!(body, r#"{"success":true,"message":"Show bootcamp 42"}"#);
///
/// let body = serde_json::to_string(&Envelope::failure()).unwrap();
/// assert_eq!(body, r#"{"success":false}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), data: None }
    }

    /// A bare `{"success":false}`.
    pub fn failure() -> Self {
        Self { success: false, message: None, data: None }
    }

    pub fn failure_with(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), data: None }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn data_follows_message() {
        let env = Envelope::success("ok").with_data(json!({"count": 0}));
        assert_eq!(
            serde_json::to_string(&env).unwrap(),
            r#"{"success":true,"message":"ok","data":{"count":0}}"#
        );
    }

    #[test]
    fn failure_with_message() {
        assert_eq!(
            serde_json::to_value(Envelope::failure_with("nope")).unwrap(),
            json!({"success": false, "message": "nope"})
        );
    }
}
