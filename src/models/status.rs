use serde::{Deserialize, Serialize};

/// Response from `GET /api/ollama/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OllamaStatus {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub has_vision_model: Option<bool>,
    /// Probe failure reported by the backend
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_with_vision() {
        let status: OllamaStatus =
            serde_json::from_str(r#"{"running": true, "has_vision_model": false}"#).unwrap();
        assert!(status.running);
        assert_eq!(status.has_vision_model, Some(false));
        assert!(status.error.is_none());
    }

    #[test]
    fn test_not_running_with_error() {
        let status: OllamaStatus =
            serde_json::from_str(r#"{"running": false, "error": "connection refused"}"#).unwrap();
        assert!(!status.running);
        assert_eq!(status.error.as_deref(), Some("connection refused"));
    }
}
