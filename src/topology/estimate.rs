use serde::Serialize;

use crate::models::{Link, Node};

use super::geo::{average_angles, bearing, bearing_to_azimuth};
use super::TopologyMaps;

/// Bearings of both endpoints of a proposed link, in [-180, 180]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkBearings {
    pub bearing_a: Option<f64>,
    pub bearing_z: Option<f64>,
}

/// Estimated bearing of a node from its wireless peers' sites.
///
/// Bearings to multiple peers are combined with a circular mean. Returns
/// `None` when the node has no wireless peer with a known site, or when the
/// node's own site is unknown.
pub fn estimate_node_bearing(node: &Node, maps: &TopologyMaps) -> Option<f64> {
    let site = maps.site_map.get(&node.site_name)?;
    let bearings: Vec<f64> = maps
        .wireless_peers(&node.name)
        .into_iter()
        .filter_map(|peer| maps.site_map.get(&peer.site_name))
        .map(|peer_site| bearing(&site.location, &peer_site.location))
        .filter(|b| b.is_finite())
        .collect();
    average_angles(&bearings)
}

/// Estimated antenna azimuth of a node, in [0, 360)
pub fn estimate_node_azimuth(node: &Node, maps: &TopologyMaps) -> Option<f64> {
    estimate_node_bearing(node, maps).map(bearing_to_azimuth)
}

/// Bearings both endpoints would have if `link` already existed
pub fn compute_new_link_bearings(link: &Link, maps: &TopologyMaps) -> LinkBearings {
    let hypothetical = maps.with_link(link);
    let bearing_of = |name: &str| {
        hypothetical
            .node_map
            .get(name)
            .and_then(|node| estimate_node_bearing(node, &hypothetical))
    };
    LinkBearings {
        bearing_a: bearing_of(&link.a_node_name),
        bearing_z: bearing_of(&link.z_node_name),
    }
}
