//! Small reference topology shared by the unit tests.
//!
//! ```text
//!            site3 (1,1)
//!              node3_0
//!                 |
//! site1 (0,0) -- site2 (0,1)
//! node1_0 node1_1  node2_0
//!    |
//! site4 (-1,0)
//!  node4_1
//! ```
//!
//! node1_1-node2_0, node1_0-node4_1 and node2_0-node3_0 are wireless;
//! node1_0-node1_1 is an ethernet link inside site1.
//!
//! `fig0_with_site_link` adds node1_2 on site1 with a wireless link to
//! node1_1, so a site has a wireless peer on itself.

use serde_json::Map;

use crate::models::{make_link_name, Link, LinkType, Location, Node, NodeType, Site, Topology};

use super::{estimate_node_azimuth, TopologyMaps};

pub struct Fig0Names {
    pub site1: &'static str,
    pub site2: &'static str,
    pub site3: &'static str,
    pub site4: &'static str,
    pub node1_0: &'static str,
    pub node1_1: &'static str,
    pub node2_0: &'static str,
    pub node3_0: &'static str,
    pub node4_1: &'static str,
    pub node1_2: &'static str,
    pub link1: &'static str,
    pub link2: &'static str,
    pub link3: &'static str,
    pub link4: &'static str,
    pub link5: &'static str,
}

pub const FIG0: Fig0Names = Fig0Names {
    site1: "site1",
    site2: "site2",
    site3: "site3",
    site4: "site4",
    node1_0: "site1_0",
    node1_1: "site1_1",
    node2_0: "site2_0",
    node3_0: "site3_0",
    node4_1: "site4_1",
    node1_2: "site1_2",
    link1: "link-site1_1-site2_0",
    link2: "link-site1_0-site4_1",
    link3: "link-site2_0-site3_0",
    link4: "link-site1_0-site1_1",
    link5: "link-site1_1-site1_2",
};

pub fn site(name: &str, latitude: f64, longitude: f64) -> Site {
    Site {
        name: name.to_string(),
        location: Location {
            latitude,
            longitude,
            altitude: 1.0,
            accuracy: 1.0,
        },
    }
}

pub fn node(name: &str, site_name: &str, ant_azimuth: f64) -> Node {
    Node {
        name: name.to_string(),
        node_type: NodeType::Dn,
        mac_addr: String::new(),
        wlan_mac_addrs: Vec::new(),
        site_name: site_name.to_string(),
        ant_azimuth,
        ant_elevation: 0.0,
        pop_node: false,
        is_primary: true,
        extra: Map::new(),
    }
}

pub fn link(a: &str, z: &str, link_type: LinkType) -> Link {
    Link {
        name: make_link_name(a, z),
        a_node_name: a.to_string(),
        z_node_name: z.to_string(),
        a_node_mac: String::new(),
        z_node_mac: String::new(),
        link_type,
        is_alive: true,
        linkup_attempts: 0,
        is_backup_cn_link: None,
        extra: Map::new(),
    }
}

fn node_with_mac(name: &str, site_name: &str, mac: &str) -> Node {
    let mut n = node(name, site_name, 0.0);
    n.mac_addr = mac.to_string();
    n
}

/// Reference topology with every azimuth set to 0
pub fn fig0() -> Topology {
    Topology {
        name: "fig0".to_string(),
        sites: vec![
            site(FIG0.site1, 0.0, 0.0),
            site(FIG0.site2, 0.0, 1.0),
            site(FIG0.site3, 1.0, 1.0),
            site(FIG0.site4, -1.0, 0.0),
        ],
        nodes: vec![
            node_with_mac(FIG0.node1_0, FIG0.site1, "00:00:00:00:00:10"),
            node_with_mac(FIG0.node1_1, FIG0.site1, "00:00:00:00:00:11"),
            node_with_mac(FIG0.node2_0, FIG0.site2, "00:00:00:00:00:20"),
            node_with_mac(FIG0.node3_0, FIG0.site3, "00:00:00:00:00:30"),
            node_with_mac(FIG0.node4_1, FIG0.site4, "00:00:00:00:00:41"),
        ],
        links: vec![
            link(FIG0.node1_1, FIG0.node2_0, LinkType::Wireless),
            link(FIG0.node1_0, FIG0.node4_1, LinkType::Wireless),
            link(FIG0.node2_0, FIG0.node3_0, LinkType::Wireless),
            link(FIG0.node1_0, FIG0.node1_1, LinkType::Ethernet),
        ],
    }
}

/// Reference topology plus a wireless link inside site1
pub fn fig0_with_site_link() -> Topology {
    let mut topology = fig0();
    topology
        .nodes
        .push(node_with_mac(FIG0.node1_2, FIG0.site1, "00:00:00:00:00:12"));
    topology
        .links
        .push(link(FIG0.node1_1, FIG0.node1_2, LinkType::Wireless));
    topology
}

/// Set every stored azimuth to its current estimate
pub fn aligned(mut topology: Topology) -> Topology {
    let maps = TopologyMaps::build(&topology);
    for node in &mut topology.nodes {
        node.ant_azimuth = estimate_node_azimuth(node, &maps).unwrap_or(0.0);
    }
    topology
}

/// Reference topology whose stored azimuths already match the estimates
pub fn fig0_aligned() -> Topology {
    aligned(fig0())
}
