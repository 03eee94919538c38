//! Stencil - a template library with live embedded references
//!
//! This crate provides the core types and logic for keeping a library of
//! named content templates synchronized with dropdown reference widgets
//! embedded inside an external rich-text document, following the Elm
//! Architecture pattern. The rich-text surface and the storage medium are
//! supplied by the host through the [`surface::DocumentSurface`] and
//! [`persist::Storage`] adapter traits.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod engine;
pub mod messages;
pub mod model;
pub mod persist;
pub mod snapshot;
pub mod store;
pub mod surface;
pub mod tracing;
pub mod update;
pub mod widget;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EngineConfig;
pub use engine::Engine;
pub use messages::{AppMsg, Msg, StoreMsg, SurfaceMsg};
pub use model::AppModel;
pub use persist::{MemoryStorage, Storage};
pub use snapshot::Snapshot;
pub use store::{Template, TemplateStore};
pub use surface::{DocumentSurface, MarkerHandle};
pub use widget::{ReferenceWidget, WidgetState};
