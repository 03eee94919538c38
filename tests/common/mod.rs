//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use stencil::surface::{DocumentSurface, MarkerHandle};
use stencil::widget::{ReferenceWidget, WidgetState};
use stencil::{Engine, EngineConfig, MemoryStorage};

/// One embedded marker in the mock surface
///
/// `attr` holds the raw persisted attribute separately from the widget so
/// tests can model markers pasted in with missing or garbage values.
#[derive(Debug, Clone)]
pub struct MockMarker {
    pub attr: Option<String>,
    pub widget: ReferenceWidget,
}

impl MockMarker {
    /// A well-formed marker referencing the given template index
    pub fn referencing(index: usize) -> Self {
        Self {
            attr: Some(index.to_string()),
            widget: ReferenceWidget::new(index),
        }
    }

    /// A marker with an arbitrary (possibly missing) persisted attribute
    pub fn with_raw_attr(attr: Option<&str>) -> Self {
        Self {
            attr: attr.map(str::to_string),
            widget: ReferenceWidget::new(0),
        }
    }

    pub fn state(&self) -> &WidgetState {
        self.widget.state()
    }

    pub fn is_error(&self) -> bool {
        self.widget.is_error()
    }

    /// Simulate the user picking a different option inside this widget
    pub fn user_select(&mut self, option: usize) {
        self.widget.user_select(option);
        self.attr = Some(option.to_string());
    }
}

impl MarkerHandle for MockMarker {
    fn reference_attr(&self) -> Option<String> {
        self.attr.clone()
    }

    fn set_reference_attr(&mut self, index: usize) {
        self.attr = Some(index.to_string());
        self.widget.set_reference_attr(index);
    }

    fn apply(&mut self, state: &WidgetState) {
        self.widget.apply(state);
    }
}

/// In-memory document surface for driving the engine headlessly
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    pub body: String,
    pub markers: Vec<MockMarker>,
    /// Number of insert_at_caret calls observed
    pub insertions: usize,
}

impl DocumentSurface for MockSurface {
    fn insert_at_caret(&mut self, referenced_index: usize) {
        self.markers.push(MockMarker::referencing(referenced_index));
        self.insertions += 1;
    }

    fn markers_mut(&mut self) -> Vec<&mut dyn MarkerHandle> {
        self.markers
            .iter_mut()
            .map(|m| m as &mut dyn MarkerHandle)
            .collect()
    }

    fn body(&self) -> String {
        self.body.clone()
    }

    fn set_body(&mut self, body: &str) {
        self.body = body.to_string();
    }
}

/// Config with a zero settle delay and an effectively disabled sweep, so
/// tests control every resync explicitly via tick()
pub fn test_config() -> EngineConfig {
    EngineConfig {
        insert_settle_ms: 0,
        sweep_interval_ms: 60_000,
    }
}

/// Engine over a fresh mock surface and empty storage
pub fn test_engine() -> Engine<MockSurface, MemoryStorage> {
    Engine::new(MockSurface::default(), MemoryStorage::new(), test_config())
}

/// Engine over the given surface and storage
pub fn engine_with(
    surface: MockSurface,
    storage: MemoryStorage,
) -> Engine<MockSurface, MemoryStorage> {
    Engine::new(surface, storage, test_config())
}
