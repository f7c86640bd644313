use serde::{Deserialize, Serialize};

use crate::models::Node;

// --- API service request/response types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EditNodeRequest<'a> {
    pub node_name: &'a str,
    pub new_node: &'a Node,
}

/// Generic acknowledgement returned by write endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAck {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Error reported by the controller API service
#[derive(Debug)]
pub struct UpstreamError {
    pub endpoint: String,
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "API service {} error {}: {}", self.endpoint, status, self.message),
            None => write!(f, "API service {} error: {}", self.endpoint, self.message),
        }
    }
}

impl std::error::Error for UpstreamError {}
