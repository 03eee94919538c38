//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::snapshot::Snapshot;

/// Template store messages (library mutations)
#[derive(Debug, Clone)]
pub enum StoreMsg {
    /// Append a new template with the default title and select it
    Add,
    /// Remove the template at `index`; no-op on an empty store
    Remove { index: usize },
    /// Update the title of the template at `index` (live, per keystroke)
    Rename { index: usize, title: String },
    /// Make the template at `index` the one edited in the document surface
    Select { index: usize },
    /// Replace the whole library from an already-parsed snapshot
    Import { snapshot: Snapshot },
}

/// Events reported by the document surface
#[derive(Debug, Clone)]
pub enum SurfaceMsg {
    /// The surface finished initializing and can accept content
    Ready,
    /// The user edited the document; `body` is the new serialized content
    ContentChanged { body: String },
    /// The surface finished a programmatic content replacement
    /// (freshly inserted or pasted markers may need resolving)
    ContentReplaced,
    /// The user picked a different option inside an embedded widget
    ///
    /// The widget has already updated its own persisted index; the engine
    /// reconciles on the next synchronization pass, not synchronously.
    MarkerSelected { option: usize },
}

/// Application-level messages
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Embed a new reference to the template at `index` at the caret
    InsertReference { index: usize },
    /// Import a snapshot file; malformed payloads are silently rejected
    ImportJson { raw: String },
    /// Low-frequency safety-net timer fired
    SweepTick,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Template library mutations
    Store(StoreMsg),
    /// Document surface events
    Surface(SurfaceMsg),
    /// Application messages (insertion, import, timers)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Create an add-template message
    pub fn add_template() -> Self {
        Msg::Store(StoreMsg::Add)
    }

    /// Create a remove-template message
    pub fn remove_template(index: usize) -> Self {
        Msg::Store(StoreMsg::Remove { index })
    }

    /// Create a rename message
    pub fn rename_template(index: usize, title: impl Into<String>) -> Self {
        Msg::Store(StoreMsg::Rename {
            index,
            title: title.into(),
        })
    }

    /// Create a select-template message
    pub fn select_template(index: usize) -> Self {
        Msg::Store(StoreMsg::Select { index })
    }

    /// Create an insert-reference message
    pub fn insert_reference(index: usize) -> Self {
        Msg::App(AppMsg::InsertReference { index })
    }

    /// Create a content-changed message
    pub fn content_changed(body: impl Into<String>) -> Self {
        Msg::Surface(SurfaceMsg::ContentChanged { body: body.into() })
    }
}
