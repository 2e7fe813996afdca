//! Property tests for validator invariants.

#[allow(dead_code)]
mod helpers;

use clusterlint::FieldPath;
use clusterlint::error::ErrorKind;
use clusterlint::validate::{self, ValidationRules};
use helpers::*;
use proptest::prelude::*;

fn rules() -> &'static ValidationRules {
    ValidationRules::platform()
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]([a-z0-9-]{0,20}[a-z0-9])?"
}

proptest! {
    /// A priority passes exactly when it lies in [100, 4096].
    #[test]
    fn ingress_priority_bounds(priority in any::<i32>()) {
        let err = validate::validate_ingress_rule(
            &ingress_rule("rule", priority),
            &FieldPath::new("rule"),
            rules(),
        );
        prop_assert_eq!(err.is_none(), (100..=4096).contains(&priority));
        if let Some(err) = err {
            prop_assert_eq!(err.kind, ErrorKind::Invalid);
        }
    }

    /// A disk size passes exactly when it lies in (0, 2048].
    #[test]
    fn disk_size_bounds(size in any::<i32>()) {
        let disk = clusterlint::parse::OSDisk { disk_size_gb: size, ..valid_os_disk() };
        let errors = validate::validate_os_disk(&disk, &FieldPath::new("osDisk"), rules());
        prop_assert_eq!(errors.is_empty(), size > 0 && size <= 2048);
    }

    /// A managed vnet never produces a resource group error.
    #[test]
    fn managed_vnet_never_checks_resource_group(vnet_name in ".*") {
        let mut network = create_valid_network_spec();
        network.vnet.resource_group = String::new();
        network.vnet.name = vnet_name;
        let errors = validate::validate_network_spec(&network, &network_spec_path(), rules());
        prop_assert!(errors.iter().all(|e| !e.field.ends_with("resourceGroup")));
    }

    /// Well-formed resource group names pass in pre-existing mode.
    #[test]
    fn grammar_names_pass_as_resource_group(rg in name_strategy()) {
        let mut network = create_valid_network_spec();
        network.vnet.resource_group = rg;
        let errors = validate::validate_network_spec(&network, &network_spec_path(), rules());
        prop_assert!(errors.is_empty(), "{:?}", errors);
    }

    /// Validation is pure: running it twice gives the same list.
    #[test]
    fn validation_is_idempotent(
        rg in ".{0,12}",
        names in proptest::collection::vec(".{0,8}", 0..5),
        priority in any::<i32>(),
    ) {
        let mut cluster = create_valid_cluster();
        cluster.spec.network_spec.vnet.resource_group = rg;
        cluster.spec.network_spec.subnets = names
            .iter()
            .map(|n| subnet(n, "node"))
            .collect();
        if let Some(first) = cluster.spec.network_spec.subnets.first_mut() {
            first.security_group.ingress_rules.push(ingress_rule("r", priority));
        }

        let first = validate::validate_cluster_spec(&cluster);
        let second = validate::validate_cluster_spec(&cluster);
        prop_assert_eq!(first, second);
    }

    /// Two independent corruptions always surface as two errors, whichever
    /// subnet carries them.
    #[test]
    fn independent_corruptions_are_all_reported(bad_name_at in 0usize..2, bad_ip_at in 0usize..2) {
        let mut subnets = create_valid_subnets();
        subnets[bad_name_at].name = "bad@name".into();
        subnets[bad_ip_at].internal_lb_ip_address = Some("300.1.1.1".into());

        let errors = validate::validate_subnets(&subnets, &subnets_path(), rules());
        prop_assert_eq!(errors.len(), 2, "{:?}", errors);
    }
}

#[test]
fn missing_node_role_is_reported() {
    let mut subnets = create_valid_subnets();
    subnets.retain(|s| s.role != "node");
    subnets.push(subnet("extra-subnet", "bastion"));

    let errors = validate::validate_subnets(&subnets, &subnets_path(), rules());
    assert!(errors.iter().any(|e| e.kind == ErrorKind::Required
        && e.field == "spec.networkSpec.subnets"
        && e.detail.contains("required role node not included")));
}
