use serde::{Deserialize, Serialize};

use super::topology::Site;

/// MoveSite describes a site relocation (and possible rename)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSite {
    pub site_name: String,
    pub new_site: Site,
}

/// DeleteSite names a site that is being removed from the topology
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSite {
    pub site_name: String,
}

/// AzimuthUpdate records one editNode request sent by the reconciler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AzimuthUpdate {
    pub node_name: String,
    pub previous_azimuth: f64,
    pub new_azimuth: f64,
}

/// AzimuthReport is returned by every reconciliation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AzimuthReport {
    pub updates: Vec<AzimuthUpdate>,
}

/// LinkBearingsResponse previews the bearings of a link that is not yet created
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkBearingsResponse {
    pub bearing_a: Option<f64>,
    pub bearing_z: Option<f64>,
    pub azimuth_a: Option<f64>,
    pub azimuth_z: Option<f64>,
    pub distance_meters: Option<f64>,
}

/// NodeAzimuthResponse compares a node's stored azimuth with its estimate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAzimuthResponse {
    pub node_name: String,
    pub stored_azimuth: f64,
    pub estimated_azimuth: Option<f64>,
}
