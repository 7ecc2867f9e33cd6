use serde::{Deserialize, Serialize};

/// Response from the Messages API after queueing an outbound SMS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    pub status: String,
    pub to: String,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}
