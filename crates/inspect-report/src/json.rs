use serde::Serialize;

use inspect_core::{FileRecord, Registry};

/// Format a registry as a JSON object keyed by package name.
pub fn format_registry(registry: &Registry, compact: bool) -> String {
    to_json(registry, compact)
}

/// Format a single file's extraction result as JSON.
pub fn format_file(record: &FileRecord, compact: bool) -> String {
    to_json(record, compact)
}

fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> String {
    if compact {
        serde_json::to_string(value).expect("extraction results should be serializable")
    } else {
        serde_json::to_string_pretty(value).expect("extraction results should be serializable")
    }
}
