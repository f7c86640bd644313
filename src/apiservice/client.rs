use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::models::{Node, Topology};

use super::types::*;
use super::NetworkApi;

/// HTTP client for the controller API service
pub struct ApiServiceClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiServiceClient {
    pub fn new(url: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            client,
        })
    }

    fn api_url(&self, network_name: &str, endpoint: &str) -> String {
        format!("{}/{}/api/{}", self.base_url, network_name, endpoint)
    }

    /// Helper to POST a JSON body to an endpoint and decode the response
    async fn post<T, B>(&self, network_name: &str, endpoint: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let mut req = self
            .client
            .post(self.api_url(network_name, endpoint))
            .header("Accept", "application/json")
            .json(body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| UpstreamError {
            endpoint: endpoint.to_string(),
            status: None,
            message: e.to_string(),
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError {
                endpoint: endpoint.to_string(),
                status: Some(status.as_u16()),
                message: body,
            }
            .into());
        }

        resp.json()
            .await
            .with_context(|| format!("Invalid {} response from API service", endpoint))
    }
}

#[async_trait]
impl NetworkApi for ApiServiceClient {
    async fn get_topology(&self, network_name: &str) -> Result<Topology> {
        self.post(network_name, "getTopology", &serde_json::json!({})).await
    }

    async fn edit_node(&self, network_name: &str, node_name: &str, new_node: &Node) -> Result<()> {
        let ack: ApiAck = self
            .post(network_name, "editNode", &EditNodeRequest { node_name, new_node })
            .await?;

        if !ack.success {
            return Err(UpstreamError {
                endpoint: "editNode".to_string(),
                status: None,
                message: ack.message.unwrap_or_else(|| format!("Failed to edit node {}", node_name)),
            }
            .into());
        }
        Ok(())
    }
}
