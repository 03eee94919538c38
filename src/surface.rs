//! Document adapter - the boundary to the external rich-text surface
//!
//! The rich-text editor (document model, caret, undo, toolbar) lives outside
//! this crate. The engine only needs the small capability surface below:
//! insert a marker at the caret, enumerate embedded markers, and read/write
//! the serialized body. Host events flow the other way as
//! [`SurfaceMsg`](crate::messages::SurfaceMsg) values dispatched into the
//! engine.
//!
//! Marker deletion is owned by the host surface: it must intercept a
//! delete/backspace with the caret collapsed at a marker and remove the
//! marker as an atomic unit, so the editor never fragments the widget's
//! internal structure. The engine merely observes the marker missing from
//! the next enumeration.

use crate::widget::WidgetState;

/// One embedded reference marker inside the document
pub trait MarkerHandle {
    /// Raw persisted index attribute
    ///
    /// May be absent or garbage when the marker was pasted in from outside;
    /// the engine reads unparsable values as index 0.
    fn reference_attr(&self) -> Option<String>;

    /// Persist a new referenced index on the marker
    fn set_reference_attr(&mut self, index: usize);

    /// Push derived render state into the marker's widget
    fn apply(&mut self, state: &WidgetState);
}

/// Capability interface implemented per host rich-text toolkit
pub trait DocumentSurface {
    /// Insert a new reference marker at the current caret position,
    /// persisted with the given referenced index
    fn insert_at_caret(&mut self, referenced_index: usize);

    /// Every reference marker currently embedded in the document,
    /// in document order
    fn markers_mut(&mut self) -> Vec<&mut dyn MarkerHandle>;

    /// Serialized document body (opaque to the engine)
    fn body(&self) -> String;

    /// Replace the document body, e.g. when a different template is selected
    fn set_body(&mut self, body: &str);
}
