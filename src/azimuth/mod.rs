//! Azimuth reconciliation after topology edits.
//!
//! Each operation builds a hypothetical index for the edit, re-estimates the
//! azimuth of the affected nodes against it and sends one editNode request
//! per node whose stored azimuth is off by more than the tolerance. The live
//! index is never modified; the caller refreshes it from the controller once
//! the edit is confirmed.

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;

use crate::apiservice::NetworkApi;
use crate::models::{AzimuthUpdate, DeleteSite, Link, MoveSite, Node};
use crate::topology::{estimate_node_azimuth, NotFoundError, TopologyMaps};

/// Azimuth changes at or below this many degrees are not persisted
pub const AZIMUTH_EPSILON: f64 = 0.2;

pub struct AzimuthManager<'a> {
    network_name: String,
    api: Arc<dyn NetworkApi>,
    maps: &'a TopologyMaps,
    epsilon: f64,
    fallback_azimuth: Option<f64>,
}

impl<'a> AzimuthManager<'a> {
    pub fn new(network_name: impl Into<String>, api: Arc<dyn NetworkApi>, maps: &'a TopologyMaps) -> Self {
        Self {
            network_name: network_name.into(),
            api,
            maps,
            epsilon: AZIMUTH_EPSILON,
            fallback_azimuth: None,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Azimuth to use for nodes left without wireless peers.
    /// `None` (the default) leaves such nodes untouched.
    pub fn with_fallback_azimuth(mut self, fallback: Option<f64>) -> Self {
        self.fallback_azimuth = fallback;
        self
    }

    /// Recompute both endpoints as if `link` had been created
    pub async fn add_link(&self, link: &Link) -> Result<Vec<AzimuthUpdate>> {
        let link = self.maps.resolve_link(link)?.reordered();
        let hypothetical = self.maps.with_link(&link);
        self.recompute_node_azimuths(self.endpoints(&link), &hypothetical)
            .await
    }

    /// Recompute both endpoints of a deleted link
    pub async fn delete_link(&self, link: &Link) -> Result<Vec<AzimuthUpdate>> {
        let link = self.maps.resolve_link(link)?;
        let hypothetical = self.maps.without_link(&link);
        self.recompute_node_azimuths(self.endpoints(&link), &hypothetical)
            .await
    }

    /// When a site is moved, recompute every node on the site and every node
    /// it has a wireless link with.
    ///
    /// Works before or after the controller applied the edit: if the old
    /// name is gone, the site is looked up under its new name.
    pub async fn move_site(&self, req: &MoveSite) -> Result<Vec<AzimuthUpdate>> {
        let site_name = if self.maps.site_to_nodes.contains_key(&req.site_name) {
            &req.site_name
        } else {
            &req.new_site.name
        };
        let members = self
            .maps
            .site_to_nodes
            .get(site_name)
            .ok_or_else(|| NotFoundError::new("site", &req.site_name))?;
        let hypothetical = self.maps.with_moved_site(site_name, &req.new_site);

        let mut affected: Vec<Node> = members
            .iter()
            .filter_map(|name| hypothetical.node_map.get(name))
            .cloned()
            .collect();
        for name in members {
            affected.extend(hypothetical.wireless_peers(name).into_iter().cloned());
        }

        self.recompute_node_azimuths(dedup_by_name(affected), &hypothetical)
            .await
    }

    /// Recompute the wireless peers of a deleted site's nodes.
    /// The site's own nodes are being removed and are never updated.
    ///
    /// Must run before the controller deletes the site: afterwards the
    /// site and its links are gone and the call fails with `NotFoundError`.
    pub async fn delete_site(&self, req: &DeleteSite) -> Result<Vec<AzimuthUpdate>> {
        let members = self
            .maps
            .site_to_nodes
            .get(&req.site_name)
            .ok_or_else(|| NotFoundError::new("site", &req.site_name))?;
        let hypothetical = self.maps.without_site(&req.site_name);

        let affected: Vec<Node> = members
            .iter()
            .flat_map(|name| self.maps.wireless_peers(name))
            .filter(|peer| !members.contains(&peer.name))
            .cloned()
            .collect();

        self.recompute_node_azimuths(dedup_by_name(affected), &hypothetical)
            .await
    }

    fn endpoints(&self, link: &Link) -> Vec<Node> {
        let names = [&link.a_node_name, &link.z_node_name];
        dedup_by_name(
            names
                .into_iter()
                .filter_map(|name| self.maps.node_map.get(name))
                .cloned()
                .collect(),
        )
    }

    /// Send editNode for every node whose estimated azimuth moved by more than
    /// the tolerance. Requests run concurrently; the first failure is
    /// returned while the remaining requests keep running.
    async fn recompute_node_azimuths(&self, nodes: Vec<Node>, maps: &TopologyMaps) -> Result<Vec<AzimuthUpdate>> {
        let mut planned: Vec<(Node, f64)> = Vec::new();
        for node in nodes {
            let Some(new_azimuth) = estimate_node_azimuth(&node, maps).or(self.fallback_azimuth) else {
                tracing::debug!("No azimuth estimate for {}, skipping", node.name);
                continue;
            };
            if (node.ant_azimuth - new_azimuth).abs() <= self.epsilon {
                tracing::debug!("Azimuth of {} unchanged ({:.2})", node.name, node.ant_azimuth);
                continue;
            }
            tracing::info!(
                "Updating azimuth of {}/{}: {:.2} -> {:.2}",
                self.network_name,
                node.name,
                node.ant_azimuth,
                new_azimuth
            );
            planned.push((node, new_azimuth));
        }

        let mut pending: FuturesUnordered<_> = planned
            .iter()
            .map(|(node, new_azimuth)| {
                let api = Arc::clone(&self.api);
                let network_name = self.network_name.clone();
                let new_node = Node {
                    ant_azimuth: *new_azimuth,
                    ..node.clone()
                };
                tokio::spawn(async move { api.edit_node(&network_name, &new_node.name, &new_node).await })
            })
            .collect();

        while let Some(joined) = pending.next().await {
            joined.context("Node update task failed")??;
        }

        Ok(planned
            .into_iter()
            .map(|(node, new_azimuth)| AzimuthUpdate {
                node_name: node.name,
                previous_azimuth: node.ant_azimuth,
                new_azimuth,
            })
            .collect())
    }
}

/// Drop repeated nodes, keeping the first occurrence
fn dedup_by_name(nodes: Vec<Node>) -> Vec<Node> {
    let mut seen = HashSet::new();
    nodes
        .into_iter()
        .filter(|node| seen.insert(node.name.clone()))
        .collect()
}
