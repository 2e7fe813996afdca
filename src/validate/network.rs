//! Network validation: vnet, subnets and their security group rules.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use crate::error::{ErrorList, FieldError};
use crate::field::FieldPath;
use crate::parse::types::{IngressRule, NetworkSpec, SecurityGroup, SubnetSpec};

use super::rules::ValidationRules;

/// Validate a network spec. Returns all errors found.
///
/// The resource group name is only checked for a pre-existing vnet; the
/// subnet rules apply in both modes.
pub fn validate_network_spec(
    network: &NetworkSpec,
    path: &FieldPath,
    rules: &ValidationRules,
) -> ErrorList {
    let mut errors = Vec::new();

    let preexisting = network.is_preexisting_vnet();
    tracing::debug!(field = %path, preexisting, "validating network spec");

    if preexisting {
        let rg_path = path.child("vnet").child("resourceGroup");
        errors.extend(validate_resource_group(&network.vnet.resource_group, &rg_path, rules));
    }

    errors.extend(validate_subnets(&network.subnets, &path.child("subnets"), rules));

    errors
}

/// Validate a resource or subnet name against the platform naming grammar.
pub fn validate_name(name: &str, path: &FieldPath, rules: &ValidationRules) -> Option<FieldError> {
    if rules.is_valid_name(name) {
        return None;
    }
    Some(FieldError::invalid(
        path,
        name,
        format!(
            "name must be 1-{} characters, start and end with a letter or digit, \
             and contain only letters, digits, '-', '.' or '_'",
            rules.name_max_length()
        ),
    ))
}

/// Validate the resource group of a pre-existing vnet.
///
/// An empty name means the vnet is managed and is accepted without a check.
pub fn validate_resource_group(
    resource_group: &str,
    path: &FieldPath,
    rules: &ValidationRules,
) -> Option<FieldError> {
    if resource_group.is_empty() {
        return None;
    }
    validate_name(resource_group, path, rules)
}

pub fn validate_subnet_name(
    name: &str,
    path: &FieldPath,
    rules: &ValidationRules,
) -> Option<FieldError> {
    validate_name(name, path, rules)
}

/// Validate an internal load balancer address: a dotted-quad IPv4 literal.
pub fn validate_internal_lb_ip_address(address: &str, path: &FieldPath) -> Option<FieldError> {
    match address.parse::<Ipv4Addr>() {
        Ok(_) => None,
        Err(_) => Some(FieldError::invalid(
            path,
            address,
            "internal load balancer IP address isn't a valid IPv4 address",
        )),
    }
}

/// Validate the subnet list: per-subnet checks in index order, then name
/// uniqueness, then the required roles.
pub fn validate_subnets(
    subnets: &[SubnetSpec],
    path: &FieldPath,
    rules: &ValidationRules,
) -> ErrorList {
    let mut errors = Vec::new();

    for (i, subnet) in subnets.iter().enumerate() {
        validate_subnet(subnet, &path.index(i), rules, &mut errors);
    }

    duplicate_subnet_names(subnets, path, &mut errors);
    missing_subnet_roles(subnets, path, rules, &mut errors);

    errors
}

fn validate_subnet(
    subnet: &SubnetSpec,
    path: &FieldPath,
    rules: &ValidationRules,
    errors: &mut Vec<FieldError>,
) {
    errors.extend(validate_subnet_name(&subnet.name, &path.child("name"), rules));

    if let Some(address) = subnet.internal_lb_ip_address.as_deref() {
        if !address.is_empty() {
            errors.extend(validate_internal_lb_ip_address(
                address,
                &path.child("internalLBIPAddress"),
            ));
        }
    }

    errors.extend(validate_security_group(
        &subnet.security_group,
        &path.child("securityGroup"),
        rules,
    ));
}

fn duplicate_subnet_names(
    subnets: &[SubnetSpec],
    path: &FieldPath,
    errors: &mut Vec<FieldError>,
) {
    // First-occurrence order keeps the output stable across runs.
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for subnet in subnets {
        let count = counts.entry(subnet.name.as_str()).or_insert(0);
        if *count == 0 {
            order.push(subnet.name.as_str());
        }
        *count += 1;
    }

    for name in order {
        if counts[name] > 1 {
            errors.push(FieldError::duplicate(path, name));
        }
    }
}

fn missing_subnet_roles(
    subnets: &[SubnetSpec],
    path: &FieldPath,
    rules: &ValidationRules,
    errors: &mut Vec<FieldError>,
) {
    for role in rules.required_subnet_roles() {
        if !subnets.iter().any(|s| &s.role == role) {
            errors.push(FieldError::required(
                path,
                format!("required role {} not included in provided subnets", role),
            ));
        }
    }
}

/// Validate every ingress rule of a security group.
pub fn validate_security_group(
    group: &SecurityGroup,
    path: &FieldPath,
    rules: &ValidationRules,
) -> ErrorList {
    let rules_path = path.child("ingressRules");
    group
        .ingress_rules
        .iter()
        .enumerate()
        .filter_map(|(i, rule)| validate_ingress_rule(rule, &rules_path.index(i), rules))
        .collect()
}

/// Validate an ingress rule's priority bounds.
pub fn validate_ingress_rule(
    rule: &IngressRule,
    path: &FieldPath,
    rules: &ValidationRules,
) -> Option<FieldError> {
    let range = rules.ingress_priority();
    if range.contains(&rule.priority) {
        return None;
    }
    Some(FieldError::invalid(
        path,
        rule.priority,
        format!(
            "ingress priority must be between {} and {}",
            range.start(),
            range.end()
        ),
    ))
}
