//! Template store - the ordered library of reusable content templates
//!
//! Templates are identified positionally: removing one shifts every later
//! index down by one. Embedded references are deliberately NOT re-pointed
//! when that happens; the next synchronization pass surfaces any reference
//! that fell out of range as an error widget.

use serde::{Deserialize, Serialize};

/// Title given to a template created via [`TemplateStore::add`]
pub const DEFAULT_TITLE: &str = "template";

/// Number of templates seeded into a fresh store
const STARTER_COUNT: usize = 3;

/// Title generated for an imported entry that carries no usable title
pub fn generated_title(index: usize) -> String {
    format!("template {}", index + 1)
}

/// A named, reusable content body
///
/// `content` is an opaque serialized document body; the store never
/// inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Template {
    /// Create a template with the given title and empty content
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
        }
    }

    /// Create a template with title and content
    pub fn with_content(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Ordered collection of templates plus the currently selected index
///
/// Invariant: `selected < len()` whenever the store is non-empty; an empty
/// store keeps `selected == 0` and has no active template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateStore {
    templates: Vec<Template>,
    selected: usize,
}

impl TemplateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the starter library shown on a fresh session:
    /// three empty templates, first one selected
    pub fn starter() -> Self {
        let templates = (0..STARTER_COUNT)
            .map(|i| Template::new(generated_title(i)))
            .collect();
        Self {
            templates,
            selected: 0,
        }
    }

    /// Build a store from already-normalized parts, clamping the selection
    pub fn from_parts(templates: Vec<Template>, selected: usize) -> Self {
        let mut store = Self {
            templates,
            selected: 0,
        };
        store.selected = store.clamp_index(selected);
        store
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Index of the template currently being edited in the document surface
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    /// All templates in store order
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// The active template, or `None` when the store is empty
    pub fn active(&self) -> Option<&Template> {
        self.templates.get(self.selected)
    }

    /// All titles in store order
    ///
    /// Recomputed fresh on every call so a rename is visible to every
    /// caller immediately.
    pub fn titles(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.title.clone()).collect()
    }

    /// Append a new template with the default title and select it
    pub fn add(&mut self) {
        self.templates.push(Template::new(DEFAULT_TITLE));
        self.selected = self.templates.len() - 1;
    }

    /// Remove the template at `index`
    ///
    /// No-op on an empty store or an out-of-range index. The selection is
    /// clamped to `min(selected, len - 1)`, floored at 0. Indices held by
    /// embedded references are not corrected.
    pub fn remove(&mut self, index: usize) {
        if index >= self.templates.len() {
            tracing::debug!(index, len = self.templates.len(), "remove ignored");
            return;
        }
        self.templates.remove(index);
        self.selected = self.clamp_index(self.selected);
    }

    /// Update the title of the template at `index`; no-op out of range
    pub fn set_title(&mut self, index: usize, title: &str) {
        if let Some(template) = self.templates.get_mut(index) {
            template.title = title.to_string();
        }
    }

    /// Change the active template
    ///
    /// Returns `true` when the selection was applied; out-of-range indices
    /// (including any index on an empty store) are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.templates.len() {
            return false;
        }
        self.selected = index;
        true
    }

    /// Overwrite the active template's content with the document body
    ///
    /// Called before every persistence snapshot so edits made in the
    /// document surface are durable. No-op on an empty store.
    pub fn set_active_content(&mut self, body: &str) {
        if let Some(template) = self.templates.get_mut(self.selected) {
            template.content = body.to_string();
        }
    }

    /// Replace the whole library, e.g. from an imported snapshot
    ///
    /// Entries are expected to be normalized already (see
    /// [`crate::snapshot`]); the new selection is clamped into range.
    pub fn replace_all(&mut self, templates: Vec<Template>, selected: usize) {
        self.templates = templates;
        self.selected = self.clamp_index(selected);
    }

    fn clamp_index(&self, index: usize) -> usize {
        if self.templates.is_empty() {
            0
        } else {
            index.min(self.templates.len() - 1)
        }
    }
}
