//! Parse phase: JSON or YAML manifest → typed documents.

pub mod types;

pub use types::*;

use serde::de::DeserializeOwned;

use crate::error::ParseError;

/// Encoding of a manifest on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// JSON when the first non-blank character opens an object, YAML otherwise.
    pub fn detect(text: &str) -> Format {
        match text.trim_start().as_bytes().first() {
            Some(b'{') => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Decode a document in an explicit format.
pub fn parse_as<T: DeserializeOwned>(text: &str, format: Format) -> Result<T, ParseError> {
    match format {
        Format::Json => Ok(serde_json::from_str(text)?),
        Format::Yaml => Ok(serde_yaml::from_str(text)?),
    }
}

/// Decode a cluster manifest, detecting the format.
pub fn parse_cluster(text: &str) -> Result<Cluster, ParseError> {
    parse_as(text, Format::detect(text))
}

/// Decode a compute-node manifest, detecting the format.
pub fn parse_compute_node(text: &str) -> Result<ComputeNode, ParseError> {
    parse_as(text, Format::detect(text))
}
