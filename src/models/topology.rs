use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node type codes used by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum NodeType {
    Cn,
    Dn,
}

impl TryFrom<i32> for NodeType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Cn),
            2 => Ok(Self::Dn),
            other => Err(format!("unknown node type: {}", other)),
        }
    }
}

impl From<NodeType> for i32 {
    fn from(t: NodeType) -> Self {
        match t {
            NodeType::Cn => 1,
            NodeType::Dn => 2,
        }
    }
}

/// Link type codes used by the controller.
///
/// Wireless backhaul (3) and wireless access (4) links are grouped under
/// `Wireless`; only `Ethernet` links are ignored for azimuth purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum LinkType {
    Wireless,
    Ethernet,
}

impl TryFrom<i32> for LinkType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 | 3 | 4 => Ok(Self::Wireless),
            2 => Ok(Self::Ethernet),
            other => Err(format!("unknown link type: {}", other)),
        }
    }
}

impl From<LinkType> for i32 {
    fn from(t: LinkType) -> Self {
        match t {
            LinkType::Wireless => 1,
            LinkType::Ethernet => 2,
        }
    }
}

/// Geographic location of a site
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub accuracy: f64,
}

/// Site is a physical location hosting one or more nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    #[serde(default)]
    pub location: Location,
}

/// Node is a single radio in the mesh.
///
/// Fields not used for azimuth work are kept in `extra` so the record can be
/// sent back to the controller unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub node_type: NodeType,
    #[serde(default)]
    pub mac_addr: String,
    #[serde(default)]
    pub wlan_mac_addrs: Vec<String>,
    pub site_name: String,
    #[serde(default)]
    pub ant_azimuth: f64,
    #[serde(default)]
    pub ant_elevation: f64,
    #[serde(default)]
    pub pop_node: bool,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Link between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub a_node_name: String,
    #[serde(default)]
    pub z_node_name: String,
    #[serde(default)]
    pub a_node_mac: String,
    #[serde(default)]
    pub z_node_mac: String,
    pub link_type: LinkType,
    #[serde(default)]
    pub is_alive: bool,
    #[serde(default)]
    pub linkup_attempts: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_backup_cn_link: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Link {
    pub fn is_wireless(&self) -> bool {
        self.link_type == LinkType::Wireless
    }

    /// Name of the node on the other side of this link from `node_name`
    pub fn peer_of(&self, node_name: &str) -> &str {
        if self.a_node_name == node_name {
            &self.z_node_name
        } else {
            &self.a_node_name
        }
    }

    /// Controller-accepted form: endpoints in lexicographic order, canonical name.
    pub fn reordered(&self) -> Link {
        let mut res = self.clone();
        if res.a_node_name > res.z_node_name {
            std::mem::swap(&mut res.a_node_name, &mut res.z_node_name);
            std::mem::swap(&mut res.a_node_mac, &mut res.z_node_mac);
        }
        res.name = make_link_name(&res.a_node_name, &res.z_node_name);
        res
    }
}

/// Topology as returned by the controller's getTopology call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub sites: Vec<Site>,
}

/// Links are named link-<node1>-<node2> with node names sorted.
pub fn make_link_name(a: &str, z: &str) -> String {
    let (first, second) = if a <= z { (a, z) } else { (z, a) };
    format!("link-{}-{}", first, second)
}
