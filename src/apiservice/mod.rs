pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Node, Topology};

pub use client::ApiServiceClient;
pub use types::UpstreamError;

/// Operations this service needs from a network's controller API service
#[async_trait]
pub trait NetworkApi: Send + Sync {
    /// Fetch the current topology of a network
    async fn get_topology(&self, network_name: &str) -> Result<Topology>;

    /// Replace a node record (used to persist a new antenna azimuth)
    async fn edit_node(&self, network_name: &str, node_name: &str, new_node: &Node) -> Result<()>;
}
