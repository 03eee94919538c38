//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. They mutate the
//! model and return the side effects the engine must perform; they never
//! touch the document surface or the storage medium themselves.

use crate::commands::Cmd;
use crate::messages::{AppMsg, Msg, StoreMsg, SurfaceMsg};
use crate::model::AppModel;
use crate::snapshot::Snapshot;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Store(m) => update_store(model, m),
        Msg::Surface(m) => update_surface(model, m),
        Msg::App(m) => update_app(model, m),
    }
}

/// Handle template library mutations
///
/// Every mutation that can change option count, order or validity ends in a
/// resync and a persistence snapshot.
pub fn update_store(model: &mut AppModel, msg: StoreMsg) -> Option<Cmd> {
    match msg {
        StoreMsg::Add => {
            model.store.add();
            Some(Cmd::batch(vec![Cmd::Resync, Cmd::Persist]))
        }

        StoreMsg::Remove { index } => {
            if model.store.is_empty() {
                return None;
            }
            model.store.remove(index);
            Some(Cmd::batch(vec![Cmd::Resync, Cmd::Persist]))
        }

        StoreMsg::Rename { index, title } => {
            model.store.set_title(index, &title);
            Some(Cmd::batch(vec![Cmd::Resync, Cmd::Persist]))
        }

        StoreMsg::Select { index } => {
            if !model.store.select(index) {
                return None;
            }
            let content = model
                .store
                .active()
                .map(|t| t.content.clone())
                .unwrap_or_default();
            Some(Cmd::batch(vec![
                Cmd::Resync,
                Cmd::Persist,
                Cmd::SetBody { content },
                // The surface re-renders its body after SetBody; one more
                // pass on the next tick picks up markers it re-mounted.
                Cmd::DebouncedResync { delay_ms: 0 },
            ]))
        }

        StoreMsg::Import { snapshot } => apply_import(model, snapshot),
    }
}

/// Handle document surface events
pub fn update_surface(model: &mut AppModel, msg: SurfaceMsg) -> Option<Cmd> {
    match msg {
        SurfaceMsg::Ready => {
            // Open the persisted active template on startup
            let content = model
                .store
                .active()
                .map(|t| t.content.clone())
                .unwrap_or_default();
            Some(Cmd::batch(vec![Cmd::SetBody { content }, Cmd::Resync]))
        }

        SurfaceMsg::ContentChanged { body } => {
            if model.store.is_empty() {
                return Some(Cmd::Resync);
            }
            // Capture the edit into the active template before the
            // snapshot is written
            model.store.set_active_content(&body);
            Some(Cmd::batch(vec![Cmd::Resync, Cmd::Persist]))
        }

        SurfaceMsg::ContentReplaced => Some(Cmd::Resync),

        SurfaceMsg::MarkerSelected { option } => {
            // The widget already persisted its own index; the next
            // synchronization pass reconciles the displayed options.
            tracing::debug!(option, "marker selection changed");
            None
        }
    }
}

/// Handle application messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::InsertReference { index } => Some(Cmd::batch(vec![
            Cmd::InsertMarker { index },
            Cmd::DebouncedResync {
                delay_ms: model.config.insert_settle_ms,
            },
        ])),

        AppMsg::ImportJson { raw } => match Snapshot::from_import(&raw) {
            Some(snapshot) => apply_import(model, snapshot),
            None => {
                tracing::debug!("rejected malformed template import");
                None
            }
        },

        AppMsg::SweepTick => Some(Cmd::Resync),
    }
}

/// Replace the library and reload the document surface
fn apply_import(model: &mut AppModel, snapshot: Snapshot) -> Option<Cmd> {
    model
        .store
        .replace_all(snapshot.templates, snapshot.selected_index);
    let content = model
        .store
        .active()
        .map(|t| t.content.clone())
        .unwrap_or_default();
    Some(Cmd::batch(vec![
        Cmd::Resync,
        Cmd::Persist,
        Cmd::SetBody { content },
        Cmd::DebouncedResync { delay_ms: 0 },
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Template, TemplateStore};

    fn model_with(templates: Vec<Template>, selected: usize) -> AppModel {
        AppModel {
            store: TemplateStore::from_parts(templates, selected),
            config: Default::default(),
        }
    }

    #[test]
    fn test_add_resyncs_and_persists() {
        let mut model = AppModel::default();
        let cmd = update(&mut model, Msg::add_template()).unwrap();

        assert_eq!(model.store.len(), 1);
        assert!(cmd.triggers_resync());
        assert!(cmd.persists());
    }

    #[test]
    fn test_remove_on_empty_store_is_noop() {
        let mut model = AppModel::default();
        assert!(update(&mut model, Msg::remove_template(0)).is_none());
    }

    #[test]
    fn test_select_loads_template_body() {
        let mut model = model_with(
            vec![
                Template::new("a"),
                Template::with_content("b", "<p>two</p>"),
            ],
            0,
        );
        let cmd = update(&mut model, Msg::select_template(1)).unwrap();

        assert_eq!(model.store.selected_index(), 1);
        let Cmd::Batch(cmds) = cmd else {
            panic!("expected batch");
        };
        assert!(cmds.contains(&Cmd::SetBody {
            content: "<p>two</p>".to_string()
        }));
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut model = model_with(vec![Template::new("a")], 0);
        assert!(update(&mut model, Msg::select_template(5)).is_none());
    }

    #[test]
    fn test_content_changed_captures_into_active_template() {
        let mut model = model_with(vec![Template::new("a"), Template::new("b")], 1);
        let cmd = update(&mut model, Msg::content_changed("<p>edited</p>")).unwrap();

        assert_eq!(model.store.get(1).unwrap().content, "<p>edited</p>");
        assert!(cmd.persists());
    }

    #[test]
    fn test_content_changed_on_empty_store_only_resyncs() {
        let mut model = AppModel::default();
        let cmd = update(&mut model, Msg::content_changed("<p>orphan</p>")).unwrap();

        assert!(cmd.triggers_resync());
        assert!(!cmd.persists());
    }

    #[test]
    fn test_marker_selection_defers_to_next_pass() {
        let mut model = model_with(vec![Template::new("a")], 0);
        let cmd = update(
            &mut model,
            Msg::Surface(SurfaceMsg::MarkerSelected { option: 0 }),
        );
        assert!(cmd.is_none());
    }

    #[test]
    fn test_insert_reference_schedules_settled_resync() {
        let mut model = model_with(vec![Template::new("a")], 0);
        model.config.insert_settle_ms = 100;

        let cmd = update(&mut model, Msg::insert_reference(0)).unwrap();
        let Cmd::Batch(cmds) = cmd else {
            panic!("expected batch");
        };
        assert_eq!(cmds[0], Cmd::InsertMarker { index: 0 });
        assert_eq!(cmds[1], Cmd::DebouncedResync { delay_ms: 100 });
    }

    #[test]
    fn test_import_json_replaces_library() {
        let mut model = model_with(vec![Template::new("old")], 0);
        let raw = r#"{"templates": ["imported body"], "selectedIndex": 0}"#.to_string();

        let cmd = update(&mut model, Msg::App(AppMsg::ImportJson { raw })).unwrap();
        assert_eq!(model.store.len(), 1);
        assert_eq!(model.store.get(0).unwrap().content, "imported body");
        assert!(cmd.persists());
    }

    #[test]
    fn test_programmatic_import_message() {
        let mut model = model_with(vec![Template::new("old")], 0);
        let snapshot =
            Snapshot::parse(r#"{"templates": ["a", "b"], "selectedIndex": 1}"#, 0).unwrap();

        update(&mut model, Msg::Store(StoreMsg::Import { snapshot })).unwrap();
        assert_eq!(model.store.len(), 2);
        assert_eq!(model.store.selected_index(), 1);
    }

    #[test]
    fn test_malformed_import_leaves_state_untouched() {
        let mut model = model_with(vec![Template::with_content("keep", "<p>me</p>")], 0);
        let before = model.store.clone();

        let raw = r#"{"templates": 12}"#.to_string();
        let cmd = update(&mut model, Msg::App(AppMsg::ImportJson { raw }));

        assert!(cmd.is_none());
        assert_eq!(model.store, before);
    }

    #[test]
    fn test_sweep_tick_resyncs() {
        let mut model = AppModel::default();
        assert_eq!(update(&mut model, Msg::App(AppMsg::SweepTick)), Some(Cmd::Resync));
    }
}
