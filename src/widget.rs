//! Reference widget - the embedded dropdown pointing at a template
//!
//! A widget's display (option list, checked option, error flag) is always
//! derived by the synchronization engine; the only state a marker persists
//! is the referenced index. [`ReferenceWidget`] is a headless implementation
//! of that contract, usable directly by host toolkit adapters and by the
//! test harness.

use crate::surface::MarkerHandle;

/// Option label shown by a widget whose reference cannot be resolved
pub const ERROR_OPTION: &str = "ERROR";

/// Derived render state pushed into every marker on resynchronization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetState {
    /// Enabled select box listing every template title, one pre-checked
    Normal {
        options: Vec<String>,
        selected: usize,
    },
    /// Disabled select box showing the single [`ERROR_OPTION`] sentinel
    Error,
}

impl WidgetState {
    pub fn normal(options: Vec<String>, selected: usize) -> Self {
        WidgetState::Normal { options, selected }
    }

    /// Whether this state renders as the error sentinel
    ///
    /// An empty option list renders as an error even in `Normal`, matching
    /// a select box with nothing to offer.
    pub fn is_error(&self) -> bool {
        match self {
            WidgetState::Error => true,
            WidgetState::Normal { options, .. } => options.is_empty(),
        }
    }

    /// Option labels, empty in the error state
    pub fn options(&self) -> &[String] {
        match self {
            WidgetState::Normal { options, .. } => options,
            WidgetState::Error => &[],
        }
    }

    /// Index of the checked option, if any
    pub fn checked(&self) -> Option<usize> {
        match self {
            WidgetState::Normal { selected, .. } if !self.is_error() => Some(*selected),
            _ => None,
        }
    }

    /// Title of the checked option, if any
    pub fn checked_title(&self) -> Option<&str> {
        let index = self.checked()?;
        self.options().get(index).map(String::as_str)
    }

    /// Option labels as a host should render them
    ///
    /// An unresolvable reference renders as a single disabled
    /// [`ERROR_OPTION`] entry.
    pub fn display_options(&self) -> Vec<String> {
        if self.is_error() {
            vec![ERROR_OPTION.to_string()]
        } else {
            self.options().to_vec()
        }
    }
}

/// Headless reference widget
///
/// Holds the persisted `referenced_index` attribute plus the last render
/// state applied by the engine. A user picking a different option updates
/// only the widget's own attribute; the store is reconciled on the next
/// synchronization pass, so the widget may briefly display a stale option
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceWidget {
    referenced_index: usize,
    state: WidgetState,
}

impl ReferenceWidget {
    /// Create a widget referencing the given template index
    ///
    /// Starts in the error state until the first synchronization pass
    /// supplies an option list.
    pub fn new(referenced_index: usize) -> Self {
        Self {
            referenced_index,
            state: WidgetState::Error,
        }
    }

    /// The persisted template index this embedding points at
    pub fn referenced_index(&self) -> usize {
        self.referenced_index
    }

    /// Last render state applied by the engine
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    /// User picked a different option inside this widget
    ///
    /// Updates the persisted index and the locally displayed check mark,
    /// without consulting the template store.
    pub fn user_select(&mut self, option: usize) {
        self.referenced_index = option;
        if let WidgetState::Normal { selected, .. } = &mut self.state {
            *selected = option;
        }
    }
}

impl MarkerHandle for ReferenceWidget {
    fn reference_attr(&self) -> Option<String> {
        Some(self.referenced_index.to_string())
    }

    fn set_reference_attr(&mut self, index: usize) {
        self.referenced_index = index;
    }

    fn apply(&mut self, state: &WidgetState) {
        self.state = state.clone();
    }
}
