//! Topology index: name-keyed lookup maps built from a controller topology.
//!
//! The index is rebuilt from scratch whenever the topology changes. What-if
//! variants (`with_link`, `without_link`, ...) return a patched copy and
//! never touch the original, so one live index can be shared by any number
//! of concurrent reconciliations.

pub mod estimate;
pub mod geo;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;

use crate::models::{make_link_name, Link, Node, Site, Topology};
use crate::utils::normalize_mac;

pub use estimate::{compute_new_link_bearings, estimate_node_azimuth};

/// Typed error for "topology element not found" so the API layer can map it
/// to a 404 without string matching.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Lookup maps over a topology.
///
/// Every key is unique: node, link and site names are unique within a
/// network, and a MAC maps to exactly one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyMaps {
    pub node_map: BTreeMap<String, Node>,
    pub link_map: BTreeMap<String, Link>,
    pub site_map: BTreeMap<String, Site>,
    pub node_to_links: BTreeMap<String, BTreeSet<String>>,
    pub site_to_nodes: BTreeMap<String, BTreeSet<String>>,
    pub mac_to_node: BTreeMap<String, String>,
}

impl TopologyMaps {
    /// Build the index. Links with unknown endpoints and nodes with unknown
    /// sites are left out of the relationship maps instead of failing.
    pub fn build(topology: &Topology) -> Self {
        let mut maps = Self::default();

        for site in &topology.sites {
            maps.site_map.insert(site.name.clone(), site.clone());
            maps.site_to_nodes.insert(site.name.clone(), BTreeSet::new());
        }

        for node in &topology.nodes {
            match maps.site_to_nodes.get_mut(&node.site_name) {
                Some(members) => {
                    members.insert(node.name.clone());
                }
                None => tracing::warn!("Node {} is on unknown site {}", node.name, node.site_name),
            }
            maps.node_to_links.insert(node.name.clone(), BTreeSet::new());
            for mac in std::iter::once(&node.mac_addr).chain(node.wlan_mac_addrs.iter()) {
                if !mac.is_empty() {
                    maps.mac_to_node.insert(normalize_mac(mac), node.name.clone());
                }
            }
            maps.node_map.insert(node.name.clone(), node.clone());
        }

        for link in &topology.links {
            for endpoint in [&link.a_node_name, &link.z_node_name] {
                match maps.node_to_links.get_mut(endpoint) {
                    Some(links) => {
                        links.insert(link.name.clone());
                    }
                    None => tracing::warn!("Link {} references unknown node {}", link.name, endpoint),
                }
            }
            maps.link_map.insert(link.name.clone(), link.clone());
        }

        maps
    }

    /// Names of the wireless links attached to a node
    pub fn wireless_link_names(&self, node_name: &str) -> Vec<&str> {
        self.node_to_links
            .get(node_name)
            .into_iter()
            .flatten()
            .filter(|name| self.link_map.get(*name).is_some_and(Link::is_wireless))
            .map(String::as_str)
            .collect()
    }

    /// Nodes on the other side of this node's wireless links
    pub fn wireless_peers(&self, node_name: &str) -> Vec<&Node> {
        let mut peers = Vec::new();
        for link_name in self.wireless_link_names(node_name) {
            let Some(link) = self.link_map.get(link_name) else {
                continue;
            };
            let peer_name = link.peer_of(node_name);
            match self.node_map.get(peer_name) {
                Some(peer) => peers.push(peer),
                None => tracing::warn!("Peer not found: {}", peer_name),
            }
        }
        peers
    }

    pub fn node_by_mac(&self, mac: &str) -> Option<&Node> {
        self.mac_to_node
            .get(&normalize_mac(mac))
            .and_then(|name| self.node_map.get(name))
    }

    /// Fill in missing endpoint names from the MAC index and make sure both
    /// endpoints are known. An unnamed link gets its canonical name.
    pub fn resolve_link(&self, link: &Link) -> Result<Link> {
        let mut resolved = link.clone();
        for (name, mac) in [
            (&mut resolved.a_node_name, &link.a_node_mac),
            (&mut resolved.z_node_name, &link.z_node_mac),
        ] {
            if name.is_empty() && !mac.is_empty() {
                let node = self
                    .node_by_mac(mac)
                    .ok_or_else(|| NotFoundError::new("node with mac", mac))?;
                *name = node.name.clone();
            }
            if !self.node_map.contains_key(name.as_str()) {
                return Err(NotFoundError::new("node", name.as_str()).into());
            }
        }
        if resolved.name.is_empty() {
            resolved.name = make_link_name(&resolved.a_node_name, &resolved.z_node_name);
        }
        Ok(resolved)
    }

    /// Copy of the index with `link` added under its canonical name
    pub fn with_link(&self, link: &Link) -> Self {
        let mut maps = self.clone();
        let mut link = link.clone();
        link.name = make_link_name(&link.a_node_name, &link.z_node_name);
        maps.insert_link(link);
        maps
    }

    /// Copy of the index with `link` removed from both endpoints
    pub fn without_link(&self, link: &Link) -> Self {
        let mut maps = self.clone();
        maps.remove_link(link);
        maps
    }

    /// Copy of the index with site `old_name` replaced by `new_site`.
    /// Member nodes follow the site if it is renamed.
    pub fn with_moved_site(&self, old_name: &str, new_site: &Site) -> Self {
        let mut maps = self.clone();
        let members = self.site_to_nodes.get(old_name).cloned().unwrap_or_default();

        if new_site.name != old_name {
            maps.site_map.remove(old_name);
            maps.site_to_nodes.remove(old_name);
        }
        for name in &members {
            if let Some(node) = maps.node_map.get_mut(name) {
                node.site_name = new_site.name.clone();
            }
        }
        maps.site_map.insert(new_site.name.clone(), new_site.clone());
        maps.site_to_nodes.insert(new_site.name.clone(), members);
        maps
    }

    /// Copy of the index without the site, its nodes and their wireless links
    pub fn without_site(&self, site_name: &str) -> Self {
        let mut maps = self.clone();
        let members = self.site_to_nodes.get(site_name).cloned().unwrap_or_default();

        for name in &members {
            for link_name in self.wireless_link_names(name) {
                if let Some(link) = self.link_map.get(link_name) {
                    maps.remove_link(link);
                }
            }
        }
        for name in &members {
            maps.node_map.remove(name);
            maps.node_to_links.remove(name);
            maps.mac_to_node.retain(|_, owner| owner != name);
        }
        maps.site_map.remove(site_name);
        maps.site_to_nodes.remove(site_name);
        maps
    }

    fn insert_link(&mut self, link: Link) {
        for endpoint in [&link.a_node_name, &link.z_node_name] {
            self.node_to_links
                .entry(endpoint.clone())
                .or_default()
                .insert(link.name.clone());
        }
        self.link_map.insert(link.name.clone(), link);
    }

    fn remove_link(&mut self, link: &Link) {
        let name = if link.name.is_empty() {
            make_link_name(&link.a_node_name, &link.z_node_name)
        } else {
            link.name.clone()
        };
        self.link_map.remove(&name);
        for endpoint in [&link.a_node_name, &link.z_node_name] {
            if let Some(links) = self.node_to_links.get_mut(endpoint) {
                links.remove(&name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{self, fig0, FIG0};
    use super::*;
    use crate::models::LinkType;

    fn names(nodes: Vec<&Node>) -> Vec<&str> {
        nodes.into_iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_build_indexes_everything() {
        let maps = TopologyMaps::build(&fig0());

        assert_eq!(maps.node_map.len(), 5);
        assert_eq!(maps.site_map.len(), 4);
        assert_eq!(maps.link_map.len(), 4);
        assert_eq!(
            maps.site_to_nodes[FIG0.site1],
            BTreeSet::from([FIG0.node1_0.to_string(), FIG0.node1_1.to_string()])
        );
        assert!(maps.node_to_links[FIG0.node2_0].contains(FIG0.link1));
        assert_eq!(maps.node_by_mac("00:00:00:00:00:20").map(|n| n.name.as_str()), Some(FIG0.node2_0));
    }

    #[test]
    fn test_build_is_idempotent() {
        let topology = fig0();
        assert_eq!(TopologyMaps::build(&topology), TopologyMaps::build(&topology));
    }

    #[test]
    fn test_build_tolerates_dangling_references() {
        let mut topology = fig0();
        topology.links.push(fixtures::link(FIG0.node1_0, "ghost", LinkType::Wireless));
        topology.nodes.push(fixtures::node("orphan", "nowhere", 0.0));

        let maps = TopologyMaps::build(&topology);
        assert!(!maps.node_to_links.contains_key("ghost"));
        assert!(!maps.site_to_nodes.contains_key("nowhere"));
        // the dangling peer is skipped, the real one remains
        assert_eq!(names(maps.wireless_peers(FIG0.node1_0)), vec![FIG0.node4_1]);
    }

    #[test]
    fn test_wireless_peers_skip_ethernet() {
        let maps = TopologyMaps::build(&fig0());
        assert_eq!(names(maps.wireless_peers(FIG0.node1_1)), vec![FIG0.node2_0]);
        assert_eq!(maps.wireless_link_names(FIG0.node1_1), vec![FIG0.link1]);
        assert!(maps.node_to_links[FIG0.node1_0].contains(FIG0.link4));
        assert_eq!(maps.wireless_link_names(FIG0.node1_0), vec![FIG0.link2]);
        assert!(maps.wireless_peers("unknown").is_empty());
    }

    #[test]
    fn test_with_link_does_not_touch_original() {
        let maps = TopologyMaps::build(&fig0());
        let link = fixtures::link(FIG0.node3_0, FIG0.node1_0, LinkType::Wireless);

        let patched = maps.with_link(&link);
        let name = make_link_name(FIG0.node1_0, FIG0.node3_0);
        assert!(patched.link_map.contains_key(&name));
        assert!(patched.node_to_links[FIG0.node1_0].contains(&name));
        assert!(patched.node_to_links[FIG0.node3_0].contains(&name));
        assert!(!maps.link_map.contains_key(&name));
        assert!(!maps.node_to_links[FIG0.node1_0].contains(&name));
    }

    #[test]
    fn test_without_link_then_with_link_round_trips() {
        let maps = TopologyMaps::build(&fig0());
        let link = maps.link_map[FIG0.link1].clone();

        let removed = maps.without_link(&link);
        assert!(!removed.link_map.contains_key(FIG0.link1));
        assert!(removed.wireless_peers(FIG0.node1_1).is_empty());
        assert_eq!(removed.with_link(&link), maps);
    }

    #[test]
    fn test_with_moved_site_renames_members() {
        let maps = TopologyMaps::build(&fig0());
        let new_site = fixtures::site("site1-moved", 4.0, 4.0);

        let moved = maps.with_moved_site(FIG0.site1, &new_site);
        assert!(!moved.site_map.contains_key(FIG0.site1));
        assert!(!moved.site_to_nodes.contains_key(FIG0.site1));
        assert_eq!(moved.node_map[FIG0.node1_0].site_name, "site1-moved");
        assert_eq!(moved.site_to_nodes["site1-moved"].len(), 2);
        assert_eq!(maps.node_map[FIG0.node1_0].site_name, FIG0.site1);
    }

    #[test]
    fn test_without_site_drops_nodes_and_links() {
        let maps = TopologyMaps::build(&fig0());
        let removed = maps.without_site(FIG0.site1);

        assert!(!removed.node_map.contains_key(FIG0.node1_0));
        assert!(!removed.node_map.contains_key(FIG0.node1_1));
        assert!(!removed.link_map.contains_key(FIG0.link1));
        assert!(!removed.link_map.contains_key(FIG0.link2));
        assert!(removed.link_map.contains_key(FIG0.link3));
        // only wireless links are dropped with the site
        assert!(removed.link_map.contains_key(FIG0.link4));
        assert!(removed.node_by_mac("00:00:00:00:00:10").is_none());
        assert_eq!(names(removed.wireless_peers(FIG0.node2_0)), vec![FIG0.node3_0]);
    }

    #[test]
    fn test_site_link_peers() {
        let maps = TopologyMaps::build(&fixtures::fig0_with_site_link());
        assert_eq!(maps.wireless_link_names(FIG0.node1_2), vec![FIG0.link5]);
        assert_eq!(
            names(maps.wireless_peers(FIG0.node1_1)),
            vec![FIG0.node1_2, FIG0.node2_0]
        );
    }

    #[test]
    fn test_resolve_link_by_mac() {
        let maps = TopologyMaps::build(&fig0());
        let mut link = fixtures::link("", "", LinkType::Wireless);
        link.name.clear();
        link.a_node_mac = "00-00-00-00-00-10".to_string();
        link.z_node_mac = "000000000030".to_string();

        let resolved = maps.resolve_link(&link).unwrap();
        assert_eq!(resolved.a_node_name, FIG0.node1_0);
        assert_eq!(resolved.z_node_name, FIG0.node3_0);
        assert_eq!(resolved.name, make_link_name(FIG0.node1_0, FIG0.node3_0));
    }

    #[test]
    fn test_resolve_link_unknown_node() {
        let maps = TopologyMaps::build(&fig0());
        let link = fixtures::link(FIG0.node1_0, "ghost", LinkType::Wireless);

        let err = maps.resolve_link(&link).unwrap_err();
        assert!(err.downcast_ref::<NotFoundError>().is_some());
    }
}
