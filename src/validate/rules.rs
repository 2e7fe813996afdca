//! Immutable rule data shared by all validators.
//!
//! The platform defaults are built once per process and never mutated;
//! callers who need different limits build their own set from a
//! [`RulesConfig`] and pass it by reference.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::parse::{self, Format};
use crate::parse::types::{ROLE_CONTROL_PLANE, ROLE_NODE};

/// Starts and ends alphanumeric; `-`, `.` and `_` allowed in between.
pub const DEFAULT_NAME_PATTERN: &str = r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$";
pub const DEFAULT_NAME_MAX_LENGTH: usize = 80;
pub const DEFAULT_MIN_INGRESS_PRIORITY: i32 = 100;
pub const DEFAULT_MAX_INGRESS_PRIORITY: i32 = 4096;
pub const DEFAULT_MAX_DISK_SIZE_GB: i32 = 2048;
pub const DEFAULT_STORAGE_ACCOUNT_TYPES: [&str; 4] =
    ["Premium_LRS", "Standard_LRS", "StandardSSD_LRS", "UltraSSD_LRS"];

static PLATFORM: LazyLock<ValidationRules> = LazyLock::new(ValidationRules::platform_defaults);

/// Serializable form of the rule set, every field optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RulesConfig {
    pub name_pattern: String,
    pub name_max_length: usize,
    pub min_ingress_priority: i32,
    pub max_ingress_priority: i32,
    #[serde(rename = "maxDiskSizeGB")]
    pub max_disk_size_gb: i32,
    pub storage_account_types: Vec<String>,
    pub required_subnet_roles: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            name_pattern: DEFAULT_NAME_PATTERN.into(),
            name_max_length: DEFAULT_NAME_MAX_LENGTH,
            min_ingress_priority: DEFAULT_MIN_INGRESS_PRIORITY,
            max_ingress_priority: DEFAULT_MAX_INGRESS_PRIORITY,
            max_disk_size_gb: DEFAULT_MAX_DISK_SIZE_GB,
            storage_account_types: DEFAULT_STORAGE_ACCOUNT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            required_subnet_roles: vec![ROLE_CONTROL_PLANE.into(), ROLE_NODE.into()],
        }
    }
}

impl RulesConfig {
    /// Decode a rules file (JSON or YAML).
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(parse::parse_as(text, Format::detect(text))?)
    }
}

/// Compiled, validated rule set.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    name_pattern: Regex,
    name_max_length: usize,
    ingress_priority: RangeInclusive<i32>,
    max_disk_size_gb: i32,
    storage_account_types: Vec<String>,
    required_subnet_roles: Vec<String>,
}

impl ValidationRules {
    /// The process-wide default rule set.
    pub fn platform() -> &'static ValidationRules {
        &PLATFORM
    }

    pub fn from_config(config: &RulesConfig) -> Result<Self, ConfigError> {
        let name_pattern =
            Regex::new(&config.name_pattern).map_err(|source| ConfigError::Pattern {
                pattern: config.name_pattern.clone(),
                source,
            })?;
        if config.name_max_length == 0 {
            return Err(ConfigError::Bound {
                field: "nameMaxLength",
                reason: "must be at least 1".into(),
            });
        }
        if config.min_ingress_priority > config.max_ingress_priority {
            return Err(ConfigError::Bound {
                field: "ingressPriority",
                reason: format!(
                    "minimum {} is above maximum {}",
                    config.min_ingress_priority, config.max_ingress_priority
                ),
            });
        }
        if config.max_disk_size_gb <= 0 {
            return Err(ConfigError::Bound {
                field: "maxDiskSizeGB",
                reason: format!("{} is not a positive size", config.max_disk_size_gb),
            });
        }
        if config.storage_account_types.is_empty() {
            return Err(ConfigError::Empty("storageAccountTypes"));
        }

        Ok(ValidationRules {
            name_pattern,
            name_max_length: config.name_max_length,
            ingress_priority: config.min_ingress_priority..=config.max_ingress_priority,
            max_disk_size_gb: config.max_disk_size_gb,
            storage_account_types: config.storage_account_types.clone(),
            required_subnet_roles: config.required_subnet_roles.clone(),
        })
    }

    fn platform_defaults() -> Self {
        // Defaults are constants; a failure here is a programming error.
        ValidationRules::from_config(&RulesConfig::default())
            .expect("default validation rules must compile")
    }

    pub fn is_valid_name(&self, name: &str) -> bool {
        name.len() <= self.name_max_length && self.name_pattern.is_match(name)
    }

    pub fn name_max_length(&self) -> usize {
        self.name_max_length
    }

    pub fn ingress_priority(&self) -> &RangeInclusive<i32> {
        &self.ingress_priority
    }

    pub fn max_disk_size_gb(&self) -> i32 {
        self.max_disk_size_gb
    }

    pub fn storage_account_types(&self) -> &[String] {
        &self.storage_account_types
    }

    pub fn required_subnet_roles(&self) -> &[String] {
        &self.required_subnet_roles
    }
}
