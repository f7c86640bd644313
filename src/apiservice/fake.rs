//! In-memory `NetworkApi` that records editNode calls.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use crate::models::{Node, Topology};

use super::types::UpstreamError;
use super::NetworkApi;

#[derive(Default)]
pub struct FakeApi {
    topology: Topology,
    failing_nodes: HashSet<String>,
    delay: Option<Duration>,
    edits: Mutex<Vec<(String, Node)>>,
}

impl FakeApi {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            ..Default::default()
        }
    }

    /// Make editNode fail for `node_name`
    pub fn failing_on(mut self, node_name: &str) -> Self {
        self.failing_nodes.insert(node_name.to_string());
        self
    }

    /// Delay successful editNode calls, as a slow controller would
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Recorded (node name, new record) pairs, sorted by node name
    pub fn edits(&self) -> Vec<(String, Node)> {
        let mut edits = self.edits.lock().unwrap().clone();
        edits.sort_by(|a, b| a.0.cmp(&b.0));
        edits
    }

    pub fn edited_names(&self) -> Vec<String> {
        self.edits().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl NetworkApi for FakeApi {
    async fn get_topology(&self, _network_name: &str) -> Result<Topology> {
        Ok(self.topology.clone())
    }

    async fn edit_node(&self, _network_name: &str, node_name: &str, new_node: &Node) -> Result<()> {
        if self.failing_nodes.contains(node_name) {
            return Err(UpstreamError {
                endpoint: "editNode".to_string(),
                status: Some(500),
                message: format!("cannot edit {}", node_name),
            }
            .into());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.edits
            .lock()
            .unwrap()
            .push((node_name.to_string(), new_node.clone()));
        Ok(())
    }
}
