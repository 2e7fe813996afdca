//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::{FieldError, ParseError};
use crate::parse;
use crate::validate;

/// Validate a cluster manifest (JSON or YAML).
/// Returns a JSON array of error objects; empty means valid.
#[wasm_bindgen]
pub fn validate_cluster_json(json: &str) -> JsValue {
    let result = validate_cluster_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_cluster_inner(json: &str) -> Vec<ErrorDto> {
    match parse::parse_cluster(json) {
        Ok(cluster) => dtos(validate::validate_cluster_spec(&cluster)),
        Err(e) => vec![ErrorDto::from(e)],
    }
}

/// Validate a compute node manifest (JSON or YAML).
/// Returns a JSON array of error objects; empty means valid.
#[wasm_bindgen]
pub fn validate_compute_node_json(json: &str) -> JsValue {
    let result = validate_compute_node_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_compute_node_inner(json: &str) -> Vec<ErrorDto> {
    match parse::parse_compute_node(json) {
        Ok(node) => dtos(validate::validate_compute_node_spec(&node)),
        Err(e) => vec![ErrorDto::from(e)],
    }
}

fn dtos(errors: Vec<FieldError>) -> Vec<ErrorDto> {
    errors.into_iter().map(ErrorDto::from).collect()
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    kind: String,
    field: Option<String>,
    bad_value: serde_json::Value,
    detail: String,
    message: String,
}

impl From<FieldError> for ErrorDto {
    fn from(e: FieldError) -> Self {
        ErrorDto {
            kind: e.kind.to_string(),
            message: e.to_string(),
            field: Some(e.field),
            bad_value: e.bad_value,
            detail: e.detail,
        }
    }
}

impl From<ParseError> for ErrorDto {
    fn from(e: ParseError) -> Self {
        ErrorDto {
            kind: "Parse".into(),
            field: None,
            bad_value: serde_json::Value::Null,
            detail: e.to_string(),
            message: e.to_string(),
        }
    }
}
