use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::topology::geo::{bearing_to_azimuth, distance_meters};
use crate::topology::{compute_new_link_bearings, estimate_node_azimuth};
use crate::AppState;

use super::azimuth::{load_maps, validate_link};
use super::ApiError;

/// Preview the bearings a link would give its endpoints before it is created
pub async fn link_bearings(
    State(state): State<Arc<AppState>>,
    Path(network): Path<String>,
    Json(link): Json<Link>,
) -> Result<Json<LinkBearingsResponse>, ApiError> {
    validate_link(&link)?;
    let maps = load_maps(&state, &network).await?;
    let link = maps.resolve_link(&link)?;

    let bearings = compute_new_link_bearings(&link, &maps);
    let location_of = |node_name: &str| {
        maps.node_map
            .get(node_name)
            .and_then(|node| maps.site_map.get(&node.site_name))
            .map(|site| site.location)
    };
    let distance = location_of(&link.a_node_name)
        .zip(location_of(&link.z_node_name))
        .map(|(a, z)| distance_meters(&a, &z));

    Ok(Json(LinkBearingsResponse {
        bearing_a: bearings.bearing_a,
        bearing_z: bearings.bearing_z,
        azimuth_a: bearings.bearing_a.map(bearing_to_azimuth),
        azimuth_z: bearings.bearing_z.map(bearing_to_azimuth),
        distance_meters: distance,
    }))
}

/// Compare a node's stored azimuth with the current estimate
pub async fn node_azimuth(
    State(state): State<Arc<AppState>>,
    Path((network, node_name)): Path<(String, String)>,
) -> Result<Json<NodeAzimuthResponse>, ApiError> {
    let maps = load_maps(&state, &network).await?;
    let node = maps
        .node_map
        .get(&node_name)
        .ok_or_else(|| ApiError::not_found(format!("node not found: {}", node_name)))?;

    Ok(Json(NodeAzimuthResponse {
        node_name: node.name.clone(),
        stored_azimuth: node.ant_azimuth,
        estimated_azimuth: estimate_node_azimuth(node, &maps),
    }))
}
