use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::azimuth::AzimuthManager;
use crate::models::*;
use crate::topology::TopologyMaps;
use crate::utils::is_valid_name;
use crate::AppState;

use super::ApiError;

/// Fetch the live topology and index it
pub(super) async fn load_maps(state: &AppState, network: &str) -> Result<TopologyMaps, ApiError> {
    if !is_valid_name(network) {
        return Err(ApiError::bad_request("invalid network name"));
    }
    let topology = state.api.get_topology(network).await?;
    Ok(TopologyMaps::build(&topology))
}

/// A link must name (or give the MAC of) two distinct endpoints
pub(super) fn validate_link(link: &Link) -> Result<(), ApiError> {
    for (name, mac) in [(&link.a_node_name, &link.a_node_mac), (&link.z_node_name, &link.z_node_mac)] {
        if name.is_empty() && mac.is_empty() {
            return Err(ApiError::bad_request("link endpoints require a node name or mac"));
        }
        if !name.is_empty() && !is_valid_name(name) {
            return Err(ApiError::bad_request(format!("invalid node name: {}", name)));
        }
    }
    if !link.a_node_name.is_empty() && link.a_node_name == link.z_node_name {
        return Err(ApiError::bad_request("link endpoints must be different nodes"));
    }
    Ok(())
}

fn manager<'a>(state: &AppState, network: &str, maps: &'a TopologyMaps) -> AzimuthManager<'a> {
    AzimuthManager::new(network, state.api.clone(), maps)
        .with_epsilon(state.config.azimuth_epsilon)
        .with_fallback_azimuth(state.config.fallback_azimuth)
}

/// Reconcile azimuths for a newly created link
pub async fn add_link(
    State(state): State<Arc<AppState>>,
    Path(network): Path<String>,
    Json(link): Json<Link>,
) -> Result<Json<AzimuthReport>, ApiError> {
    validate_link(&link)?;
    let maps = load_maps(&state, &network).await?;
    let updates = manager(&state, &network, &maps).add_link(&link).await?;
    Ok(Json(AzimuthReport { updates }))
}

/// Reconcile azimuths for a deleted link
pub async fn delete_link(
    State(state): State<Arc<AppState>>,
    Path(network): Path<String>,
    Json(link): Json<Link>,
) -> Result<Json<AzimuthReport>, ApiError> {
    validate_link(&link)?;
    let maps = load_maps(&state, &network).await?;
    let updates = manager(&state, &network, &maps).delete_link(&link).await?;
    Ok(Json(AzimuthReport { updates }))
}

/// Reconcile azimuths for a moved (or renamed) site. Accepts calls made
/// before or after the controller's editSite.
pub async fn move_site(
    State(state): State<Arc<AppState>>,
    Path(network): Path<String>,
    Json(req): Json<MoveSite>,
) -> Result<Json<AzimuthReport>, ApiError> {
    if !is_valid_name(&req.new_site.name) {
        return Err(ApiError::bad_request("invalid site name"));
    }
    let maps = load_maps(&state, &network).await?;
    let updates = manager(&state, &network, &maps).move_site(&req).await?;
    Ok(Json(AzimuthReport { updates }))
}

/// Reconcile azimuths for the peers of a site about to be deleted.
/// Call this before the controller's delSite; once the site is gone the
/// route answers 404.
pub async fn delete_site(
    State(state): State<Arc<AppState>>,
    Path(network): Path<String>,
    Json(req): Json<DeleteSite>,
) -> Result<Json<AzimuthReport>, ApiError> {
    let maps = load_maps(&state, &network).await?;
    let updates = manager(&state, &network, &maps).delete_site(&req).await?;
    Ok(Json(AzimuthReport { updates }))
}
