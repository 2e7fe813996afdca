//! Rust types for the cluster and compute-node documents.
//!
//! These are the serde target for the manifests handed to the validator.
//! Field names follow the manifest's camelCase spelling, which is also the
//! spelling used in field paths.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type Tags = BTreeMap<String, String>;

/// Role a subnet must carry for control-plane machines.
pub const ROLE_CONTROL_PLANE: &str = "control-plane";
/// Role a subnet must carry for worker machines.
pub const ROLE_NODE: &str = "node";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

// =============================================================================
// CLUSTER
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: ClusterSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub resource_group: String,
    #[serde(default, rename = "subscriptionID", skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub network_spec: NetworkSpec,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub additional_tags: Tags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    #[serde(default)]
    pub vnet: VnetSpec,
    #[serde(default)]
    pub subnets: Vec<SubnetSpec>,
}

impl NetworkSpec {
    /// A vnet with its own resource group is managed outside the cluster.
    pub fn is_preexisting_vnet(&self) -> bool {
        !self.vnet.resource_group.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VnetSpec {
    /// Empty when the vnet is created and owned by the cluster.
    #[serde(default)]
    pub resource_group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSpec {
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
    #[serde(
        default,
        rename = "internalLBIPAddress",
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_lb_ip_address: Option<String>,
    #[serde(default)]
    pub security_group: SecurityGroup,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingress_rules: Vec<IngressRule>,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub protocol: SecurityGroupProtocol,
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ports: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_ports: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityGroupProtocol {
    #[default]
    #[serde(rename = "*")]
    All,
    Tcp,
    Udp,
}

// =============================================================================
// COMPUTE NODE
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNode {
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: ComputeNodeSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNodeSpec {
    #[serde(default)]
    pub vm_size: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<AvailabilityZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default)]
    pub os_disk: OSDisk,
    #[serde(default)]
    pub ssh_public_key: String,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub additional_tags: Tags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityZone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OSDisk {
    #[serde(default)]
    pub os_type: String,
    #[serde(default, rename = "diskSizeGB")]
    pub disk_size_gb: i32,
    #[serde(default)]
    pub managed_disk: ManagedDisk,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedDisk {
    #[serde(default)]
    pub storage_account_type: String,
}

/// Source of the OS image. Exactly one of the three sources may be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_gallery: Option<SharedGalleryImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<MarketplaceImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedGalleryImage {
    #[serde(default, rename = "subscriptionID")]
    pub subscription_id: String,
    #[serde(default)]
    pub resource_group: String,
    #[serde(default)]
    pub gallery: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceImage {
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub offer: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub version: String,
}
