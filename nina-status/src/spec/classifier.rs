//! Status endpoint classification
//!
//! Extracts every GET operation from the OpenAPI `paths` and keeps only the
//! read-only, parameter-free subset:
//!
//! 1. paths containing `{` (required path parameter) are always excluded
//! 2. paths whose lowercased form contains any control keyword are excluded
//!
//! Keyword matching is an unanchored substring test, so `/equipment/loadfile`
//! is excluded by `load` even though it is part of a longer word.

use nina_status_common::Operation;
use serde_json::{Map, Value};
use tracing::debug;

/// Keywords that mark an endpoint as a control command
pub const CONTROL_KEYWORDS: &[&str] = &[
    "connect",
    "disconnect",
    "set-",
    "change-",
    "add-",
    "remove-",
    "cool",
    "warm",
    "abort",
    "move",
    "slew",
    "park",
    "unpark",
    "home",
    "start",
    "stop",
    "open",
    "close",
    "sync",
    "flip",
    "reverse",
    "clear",
    "rescan",
    "switch",
    "edit",
    "reset",
    "load",
    "capture",
    "solve",
    "determine",
    "auto-focus",
];

/// Why a GET endpoint was left out of the status subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Path declares a `{parameter}`
    PathParameter,
    /// Path contains the given control keyword
    ControlKeyword(&'static str),
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PathParameter => write!(f, "requires path parameter"),
            Self::ControlKeyword(keyword) => write!(f, "control keyword '{}'", keyword),
        }
    }
}

/// Build an `Operation` for every path that declares a `get` method
///
/// Missing `summary`/`description` become empty strings and missing `tags`
/// an empty list. Order follows the OpenAPI document.
pub fn extract_get_operations(paths: &Map<String, Value>) -> Vec<Operation> {
    paths
        .iter()
        .filter_map(|(path, methods)| {
            let get = methods.get("get")?;
            Some(operation_from_get(path, get))
        })
        .collect()
}

fn operation_from_get(path: &str, get: &Value) -> Operation {
    let text = |key: &str| {
        get.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let tags: Vec<String> = get
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Operation {
        path: path.to_string(),
        summary: text("summary"),
        description: text("description"),
        tags,
    }
}

/// Reason the path is excluded, or `None` for a status endpoint
pub fn exclusion_reason(path: &str) -> Option<Exclusion> {
    if path.contains('{') {
        return Some(Exclusion::PathParameter);
    }
    let lowered = path.to_lowercase();
    CONTROL_KEYWORDS
        .iter()
        .find(|keyword| lowered.contains(**keyword))
        .map(|keyword| Exclusion::ControlKeyword(*keyword))
}

/// True when the path is a read-only, parameter-free status endpoint
pub fn is_status_endpoint(path: &str) -> bool {
    exclusion_reason(path).is_none()
}

/// Filter operations down to the status subset, preserving input order
pub fn classify(operations: &[Operation]) -> Vec<Operation> {
    operations
        .iter()
        .filter(|op| match exclusion_reason(&op.path) {
            Some(reason) => {
                debug!(path = %op.path, reason = %reason, "Excluding endpoint");
                false
            }
            None => true,
        })
        .cloned()
        .collect()
}
