//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The engine executes them against the document surface and the storage
//! medium; the update functions themselves never touch either.

/// A side effect requested by an update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Re-resolve every embedded marker against the template store
    Resync,
    /// Resync after a settle delay, letting the surface finish mounting
    /// freshly inserted markers before they are queried
    DebouncedResync { delay_ms: u64 },
    /// Load a template's content into the document surface
    SetBody { content: String },
    /// Insert a new reference marker at the caret
    InsertMarker { index: usize },
    /// Snapshot the template store to persistent storage
    Persist,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if executing this command re-resolves markers (directly or
    /// after a delay)
    pub fn triggers_resync(&self) -> bool {
        match self {
            Cmd::Resync | Cmd::DebouncedResync { .. } => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.triggers_resync()),
            _ => false,
        }
    }

    /// Check if executing this command writes a persistence snapshot
    pub fn persists(&self) -> bool {
        match self {
            Cmd::Persist => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.persists()),
            _ => false,
        }
    }
}
