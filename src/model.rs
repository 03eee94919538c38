//! Application model - the complete state owned by the engine
//!
//! The document body itself lives in the host surface; the model only holds
//! the template library and the engine configuration. Widget display state
//! is derived on every synchronization pass, never stored here.

use crate::config::EngineConfig;
use crate::snapshot::Snapshot;
use crate::store::TemplateStore;

/// The complete application model
#[derive(Debug, Clone, Default)]
pub struct AppModel {
    /// The template library plus current selection
    pub store: TemplateStore,
    /// Engine timing configuration
    pub config: EngineConfig,
}

impl AppModel {
    /// Create a model seeded with the starter library
    pub fn new(config: EngineConfig) -> Self {
        Self {
            store: TemplateStore::starter(),
            config,
        }
    }

    /// Create a model from a previously persisted snapshot
    pub fn from_snapshot(snapshot: Snapshot, config: EngineConfig) -> Self {
        Self {
            store: TemplateStore::from_parts(snapshot.templates, snapshot.selected_index),
            config,
        }
    }
}
