//! Validation phase.
//!
//! Every validator is a pure function over a borrowed document and returns
//! the complete list of violations; nothing stops at the first failure.

pub mod machine;
pub mod network;
pub mod rules;
pub mod ssh;

pub use machine::{validate_image, validate_os_disk, validate_ssh_key, validate_storage_account_type};
pub use network::{
    validate_ingress_rule, validate_internal_lb_ip_address, validate_name, validate_network_spec,
    validate_resource_group, validate_security_group, validate_subnet_name, validate_subnets,
};
pub use rules::{RulesConfig, ValidationRules};

use crate::error::{ErrorList, InvalidSpec};
use crate::field::FieldPath;
use crate::parse::types::{Cluster, ComputeNode};

pub const CLUSTER_KIND: &str = "Cluster";
pub const COMPUTE_NODE_KIND: &str = "ComputeNode";

/// Validate a cluster; `Err` carries every violation.
pub fn validate_cluster(cluster: &Cluster) -> Result<(), InvalidSpec> {
    validate_cluster_with(cluster, ValidationRules::platform())
}

/// Validate a cluster and return the raw error list.
pub fn validate_cluster_spec(cluster: &Cluster) -> ErrorList {
    validate_cluster_spec_with(cluster, ValidationRules::platform())
}

pub fn validate_cluster_with(cluster: &Cluster, rules: &ValidationRules) -> Result<(), InvalidSpec> {
    let errors = validate_cluster_spec_with(cluster, rules);
    InvalidSpec::from_errors(CLUSTER_KIND, &cluster.metadata.name, errors)
}

pub fn validate_cluster_spec_with(cluster: &Cluster, rules: &ValidationRules) -> ErrorList {
    let path = FieldPath::new("spec").child("networkSpec");
    let errors = validate_network_spec(&cluster.spec.network_spec, &path, rules);
    tracing::debug!(
        cluster = %cluster.metadata.name,
        errors = errors.len(),
        "validated cluster"
    );
    errors
}

/// Validate an update to a cluster. The new object must pass the same
/// checks as on creation.
pub fn validate_cluster_update(_old: &Cluster, new: &Cluster) -> Result<(), InvalidSpec> {
    validate_cluster(new)
}

/// Validate a compute node; `Err` carries every violation.
pub fn validate_compute_node(node: &ComputeNode) -> Result<(), InvalidSpec> {
    validate_compute_node_with(node, ValidationRules::platform())
}

/// Validate a compute node and return the raw error list.
pub fn validate_compute_node_spec(node: &ComputeNode) -> ErrorList {
    validate_compute_node_spec_with(node, ValidationRules::platform())
}

/// Validate an update to a compute node. The new object must pass the same
/// checks as on creation.
pub fn validate_compute_node_update(_old: &ComputeNode, new: &ComputeNode) -> Result<(), InvalidSpec> {
    validate_compute_node(new)
}

pub fn validate_compute_node_with(
    node: &ComputeNode,
    rules: &ValidationRules,
) -> Result<(), InvalidSpec> {
    let errors = validate_compute_node_spec_with(node, rules);
    InvalidSpec::from_errors(COMPUTE_NODE_KIND, &node.metadata.name, errors)
}

pub fn validate_compute_node_spec_with(node: &ComputeNode, rules: &ValidationRules) -> ErrorList {
    let spec_path = FieldPath::new("spec");
    let mut errors = validate_ssh_key(&node.spec.ssh_public_key, &spec_path.child("sshPublicKey"));

    if let Some(image) = &node.spec.image {
        errors.extend(validate_image(image, &spec_path.child("image")));
    }

    errors.extend(validate_os_disk(&node.spec.os_disk, &spec_path.child("osDisk"), rules));

    tracing::debug!(
        node = %node.metadata.name,
        errors = errors.len(),
        "validated compute node"
    );
    errors
}
