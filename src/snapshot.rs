//! Snapshot wire format for persistence, export and import
//!
//! The serialized shape is `{"templates": [{"title", "content"}, ...],
//! "selectedIndex": n}`. Two legacy tolerances are kept from earlier
//! releases: a `templates` entry may be a bare string (interpreted as the
//! content body, with a generated title), and any non-string field inside
//! an entry is replaced by a generated default rather than rejecting the
//! whole snapshot.

use serde::Serialize;
use serde_json::Value;

use crate::store::{generated_title, Template, TemplateStore};

/// Suggested file name for the exported snapshot artifact
pub const EXPORT_FILE_NAME: &str = "templates.json";

/// Serialized form of the template store plus selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub templates: Vec<Template>,
    #[serde(rename = "selectedIndex")]
    pub selected_index: usize,
}

impl Snapshot {
    /// Capture the current store state
    pub fn of_store(store: &TemplateStore) -> Self {
        Self {
            templates: store.templates().to_vec(),
            selected_index: store.selected_index(),
        }
    }

    /// Compact JSON for the storage medium
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed JSON for the downloadable export artifact
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot, tolerating legacy shapes
    ///
    /// Returns `None` when the payload is not JSON or `templates` is
    /// missing or not an array - the caller keeps its current state.
    /// `selected_fallback` is used when `selectedIndex` is absent or not an
    /// integer: a session load passes the current selection, an explicit
    /// import passes 0. The result's selection is always clamped into
    /// range.
    pub fn parse(raw: &str, selected_fallback: usize) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let entries = value.get("templates")?.as_array()?;
        let templates = normalize_templates(entries);

        let selected = value
            .get("selectedIndex")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(selected_fallback);
        let selected = if templates.is_empty() {
            0
        } else {
            selected.min(templates.len() - 1)
        };

        Some(Self {
            templates,
            selected_index: selected,
        })
    }

    /// Parse an explicitly imported file; a missing selection resets to 0
    pub fn from_import(raw: &str) -> Option<Self> {
        Self::parse(raw, 0)
    }
}

/// Normalize raw snapshot entries into templates
pub fn normalize_templates(entries: &[Value]) -> Vec<Template> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_entry(entry, index))
        .collect()
}

fn normalize_entry(entry: &Value, index: usize) -> Template {
    match entry {
        Value::Object(fields) => {
            let title = fields
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| generated_title(index));
            let content = fields
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Template { title, content }
        }
        // Legacy format: a bare string is the content body
        Value::String(content) => Template {
            title: generated_title(index),
            content: content.clone(),
        },
        Value::Null => Template::new(generated_title(index)),
        other => Template {
            title: generated_title(index),
            content: other.to_string(),
        },
    }
}
