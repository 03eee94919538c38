//! Synchronization engine - the runtime around the Elm-style core
//!
//! `Engine` owns the model plus the two adapter boundaries (document
//! surface, key-value storage), dispatches messages through the pure
//! [`update`] functions and executes the returned commands. It also owns
//! the two pieces of cooperative timing: the post-insert settle delay and
//! the low-frequency safety-net sweep, both driven by host [`Engine::tick`]
//! calls.

use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::config::EngineConfig;
use crate::messages::{AppMsg, Msg, SurfaceMsg};
use crate::model::AppModel;
use crate::persist::{self, Storage};
use crate::snapshot::Snapshot;
use crate::store::TemplateStore;
use crate::surface::DocumentSurface;
use crate::update::update;
use crate::widget::WidgetState;

/// The synchronization engine
///
/// Constructed once per running instance; loads the persisted snapshot at
/// construction and has no other ambient state.
#[derive(Debug)]
pub struct Engine<S: DocumentSurface, K: Storage> {
    model: AppModel,
    surface: S,
    storage: K,
    /// Deadline of a pending deferred resync, if any
    pending_resync: Option<Instant>,
    last_sweep: Instant,
}

impl<S: DocumentSurface, K: Storage> Engine<S, K> {
    /// Create an engine over the given adapters
    ///
    /// Loads the latest snapshot from storage; a fresh or unreadable
    /// storage yields the starter library.
    pub fn new(surface: S, storage: K, config: EngineConfig) -> Self {
        let model = match persist::load(&storage, 0) {
            Some(snapshot) => {
                tracing::info!(
                    templates = snapshot.templates.len(),
                    "restored template library"
                );
                AppModel::from_snapshot(snapshot, config)
            }
            None => AppModel::new(config),
        };

        Self {
            model,
            surface,
            storage,
            pending_resync: None,
            last_sweep: Instant::now(),
        }
    }

    /// The template library
    pub fn store(&self) -> &TemplateStore {
        &self.model.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.model.config
    }

    /// The document surface adapter
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for host event plumbing
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The storage adapter
    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Dispatch a message through the update functions and execute the
    /// resulting commands
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.run_cmd(cmd);
        }
    }

    /// Embed a new reference to the template at `index` at the caret
    pub fn insert_reference(&mut self, index: usize) {
        self.dispatch(Msg::insert_reference(index));
    }

    /// Import a snapshot file; malformed payloads are silently rejected
    pub fn import_json(&mut self, raw: &str) {
        self.dispatch(Msg::App(AppMsg::ImportJson {
            raw: raw.to_string(),
        }));
    }

    /// The host surface finished a user edit
    ///
    /// Reads the current body from the surface, captures it into the
    /// active template and persists the library.
    pub fn notify_content_changed(&mut self) {
        let body = self.surface.body();
        self.dispatch(Msg::Surface(SurfaceMsg::ContentChanged { body }));
    }

    /// Serialize the library for the `templates.json` export artifact
    ///
    /// The host owns writing the actual file.
    pub fn export_json(&self) -> anyhow::Result<String> {
        Snapshot::of_store(&self.model.store).to_json_pretty()
    }

    /// Re-resolve every embedded marker against the template store
    ///
    /// Idempotent; never mutates the store. A marker whose persisted index
    /// is missing or unparsable resolves as index 0; an index outside the
    /// store goes to the error state without affecting other markers.
    pub fn resynchronize(&mut self) {
        let titles = self.model.store.titles();
        let len = titles.len();

        for marker in self.surface.markers_mut() {
            let index = marker
                .reference_attr()
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .unwrap_or(0);

            if len == 0 || index >= len {
                marker.apply(&WidgetState::Error);
            } else {
                marker.apply(&WidgetState::normal(titles.clone(), index));
            }
        }
    }

    /// Drive cooperative timing
    ///
    /// The host calls this from its idle or timer callback. Flushes a due
    /// deferred resync and runs the safety-net sweep once per configured
    /// interval to catch mutations the engine did not observe directly.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.pending_resync.is_some_and(|due| due <= now) {
            self.pending_resync = None;
            self.resynchronize();
        }

        let sweep_interval = Duration::from_millis(self.model.config.sweep_interval_ms);
        if now.duration_since(self.last_sweep) >= sweep_interval {
            self.last_sweep = now;
            self.resynchronize();
        }
    }

    fn schedule_resync(&mut self, delay: Duration) {
        let due = Instant::now() + delay;
        // Keep the earliest deadline when one is already pending
        self.pending_resync = Some(match self.pending_resync {
            Some(current) => current.min(due),
            None => due,
        });
    }

    fn run_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Resync => self.resynchronize(),
            Cmd::DebouncedResync { delay_ms } => {
                self.schedule_resync(Duration::from_millis(delay_ms));
            }
            Cmd::SetBody { content } => self.surface.set_body(&content),
            Cmd::InsertMarker { index } => self.surface.insert_at_caret(index),
            Cmd::Persist => persist::save(&mut self.storage, &self.model.store),
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.run_cmd(cmd);
                }
            }
        }
    }
}
