use clusterlint::parse::*;
use clusterlint::FieldPath;

// =============================================================================
// Cluster builders
// =============================================================================

pub fn create_valid_cluster() -> Cluster {
    Cluster {
        metadata: ObjectMeta {
            name: "test-cluster".into(),
            namespace: Some("default".into()),
        },
        spec: ClusterSpec {
            location: "westeurope".into(),
            resource_group: "test-cluster-rg".into(),
            network_spec: create_valid_network_spec(),
            ..ClusterSpec::default()
        },
    }
}

/// Network spec with a pre-existing vnet.
pub fn create_valid_network_spec() -> NetworkSpec {
    NetworkSpec {
        vnet: VnetSpec {
            resource_group: "custom-vnet".into(),
            name: "my-vnet".into(),
            ..VnetSpec::default()
        },
        subnets: create_valid_subnets(),
    }
}

pub fn create_valid_subnets() -> Vec<SubnetSpec> {
    vec![
        subnet("control-plane-subnet", ROLE_CONTROL_PLANE),
        subnet("node-subnet", ROLE_NODE),
    ]
}

pub fn subnet(name: &str, role: &str) -> SubnetSpec {
    SubnetSpec {
        name: name.into(),
        role: role.into(),
        ..SubnetSpec::default()
    }
}

pub fn ingress_rule(name: &str, priority: i32) -> IngressRule {
    IngressRule {
        name: name.into(),
        description: format!("{} rule", name),
        protocol: SecurityGroupProtocol::Tcp,
        priority,
        destination_ports: Some("6443".into()),
        ..IngressRule::default()
    }
}

// =============================================================================
// Compute node builders
// =============================================================================

pub const ED25519_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIIIlvG5dMRAyZm5XXaeo2jun545fawxiPQOhcvqGZ6rn ops@example";

/// OpenSSH user certificate for an Ed25519 key, signed by a test CA.
pub const ED25519_CERT: &str = "ssh-ed25519-cert-v01@openssh.com AAAAIHNzaC1lZDI1NTE5LWNlcnQtdjAxQG9wZW5zc2guY29tAAAAIOPWyXcY/Kp7DEZjSz00drT3IRZ7I/SjmVAfuiDVstkjAAAAIHYxPU/gz192vIEC8yw7Aq2ZcExs1QzOLE7A8wa+nJ5MAAAAAAAAAAAAAAABAAAAA29wcwAAAAcAAAADb3BzAAAAAGlVuQAAAAAAfCRfAAAAAAAAAACCAAAAFXBlcm1pdC1YMTEtZm9yd2FyZGluZwAAAAAAAAAXcGVybWl0LWFnZW50LWZvcndhcmRpbmcAAAAAAAAAFnBlcm1pdC1wb3J0LWZvcndhcmRpbmcAAAAAAAAACnBlcm1pdC1wdHkAAAAAAAAADnBlcm1pdC11c2VyLXJjAAAAAAAAAAAAAAAzAAAAC3NzaC1lZDI1NTE5AAAAIH2P+N6tAO01KMsmLLkZ/UQ96kVfjt0l+bWCrZVbMKCvAAAAUwAAAAtzc2gtZWQyNTUxOQAAAEAUHRvJ6LSqA0XM5To8TZ60C1l6oQuirDvsq9sHsobZbzNlcqbEOzJqC6dBJFBS1jz7dt3Y5BQf+Hb5MeoJFHIC ops@example";

pub const RSA_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQCH8ANvoyV5X1i3547cIei0kf+d5hyK+fKEBJMj4iUNitcmUgx/VXAVwOH5qJ3zo3P10vuPqdKDz5PqGtoloZaskWWtGIOnBnmWBBUpCfN8LlZUbiPGlxwmehqAsNOXBToZGDt4jZOwjGcS6W07YiH1k7fi7BEZrMclhQoDzrLaoydRqzTAOk809b740FRqyY4JAxZHyz6BRA6mrpxaPV31qWOFkH4sWCip3a7HfzrgeEItWGLkqgpqWB1dYZgiMceB0Ul3KW7/NaVeFK0cubs0Z9r2c0OhEz59ZFxelVTo8fkJRcXP3T+hEnv2f8ONSb2lr0MnC2sdzq9ORiN2T6M7 ops@example";

/// `RSA_KEY` as stored in a manifest: base64 of the authorized-keys line.
pub const RSA_KEY_BASE64: &str = "c3NoLXJzYSBBQUFBQjNOemFDMXljMkVBQUFBREFRQUJBQUFCQVFDSDhBTnZveVY1WDFpMzU0N2NJZWkwa2YrZDVoeUsrZktFQkpNajRpVU5pdGNtVWd4L1ZYQVZ3T0g1cUozem8zUDEwdnVQcWRLRHo1UHFHdG9sb1phc2tXV3RHSU9uQm5tV0JCVXBDZk44TGxaVWJpUEdseHdtZWhxQXNOT1hCVG9aR0R0NGpaT3dqR2NTNlcwN1lpSDFrN2ZpN0JFWnJNY2xoUW9EenJMYW95ZFJxelRBT2s4MDliNzQwRlJxeVk0SkF4Wkh5ejZCUkE2bXJweGFQVjMxcVdPRmtINHNXQ2lwM2E3SGZ6cmdlRUl0V0dMa3FncHFXQjFkWVpnaU1jZUIwVWwzS1c3L05hVmVGSzBjdWJzMFo5cjJjME9oRXo1OVpGeGVsVlRvOGZrSlJjWFAzVCtoRW52MmY4T05TYjJscjBNbkMyc2R6cTlPUmlOMlQ2TTcgb3BzQGV4YW1wbGUK";

pub fn valid_os_disk() -> OSDisk {
    OSDisk {
        disk_size_gb: 30,
        os_type: "Linux".into(),
        managed_disk: ManagedDisk {
            storage_account_type: "Premium_LRS".into(),
        },
    }
}

pub fn marketplace_image() -> Image {
    Image {
        marketplace: Some(MarketplaceImage {
            publisher: "cncf-upstream".into(),
            offer: "capi".into(),
            sku: "k8s-1dot18dot2-ubuntu-1804".into(),
            version: "latest".into(),
        }),
        ..Image::default()
    }
}

pub fn create_valid_compute_node() -> ComputeNode {
    ComputeNode {
        metadata: ObjectMeta {
            name: "test-cluster-md-0".into(),
            namespace: None,
        },
        spec: ComputeNodeSpec {
            vm_size: "Standard_D2s_v3".into(),
            location: "westeurope".into(),
            image: Some(marketplace_image()),
            os_disk: valid_os_disk(),
            ssh_public_key: RSA_KEY_BASE64.into(),
            ..ComputeNodeSpec::default()
        },
    }
}

// =============================================================================
// Field paths
// =============================================================================

pub fn network_spec_path() -> FieldPath {
    FieldPath::new("spec").child("networkSpec")
}

pub fn subnets_path() -> FieldPath {
    network_spec_path().child("subnets")
}
