//! Row-level actions.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::selection::SelectionContext;
use crate::types::{Record, RecordStatus};

/// An action offered on a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Open the detail dialog.
    View,
    /// Open the edit form.
    Edit,
    /// Ask for delete confirmation.
    Delete,
    /// Mark an inactive record active.
    Activate,
    /// Mark an active record inactive.
    Deactivate,
}

impl ActionKind {
    /// Every action, in display order.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::View,
        ActionKind::Edit,
        ActionKind::Delete,
        ActionKind::Activate,
        ActionKind::Deactivate,
    ];

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::View => "Visualizar",
            ActionKind::Edit => "Editar",
            ActionKind::Delete => "Excluir",
            ActionKind::Activate => "Ativar",
            ActionKind::Deactivate => "Desativar",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// The callbacks behind a row's action buttons.
///
/// Only actions with a registered callback are offered. Activate is
/// offered for inactive records and deactivate for active ones; records
/// without a status get neither.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use shopdesk::RecordStatus;
/// use shopdesk::projection::{ActionKind, RowActions};
/// use shopdesk::testing::fixtures::Brand;
///
/// let deleted = Arc::new(Mutex::new(Vec::new()));
/// let actions = RowActions::new()
///     .on_edit(|_: &Brand| {})
///     .on_delete({
///         let deleted = Arc::clone(&deleted);
///         move |brand: &Brand| deleted.lock().unwrap().push(brand.id)
///     });
///
/// let visa = Brand::new(1, "Visa", RecordStatus::Active);
/// assert_eq!(actions.available(&visa), vec![ActionKind::Edit, ActionKind::Delete]);
/// assert!(actions.trigger(ActionKind::Delete, &visa));
/// assert_eq!(*deleted.lock().unwrap(), vec![1]);
/// ```
pub struct RowActions<T> {
    on_view: Option<Callback<T>>,
    on_edit: Option<Callback<T>>,
    on_delete: Option<Callback<T>>,
    on_activate: Option<Callback<T>>,
    on_deactivate: Option<Callback<T>>,
}

impl<T> Clone for RowActions<T> {
    fn clone(&self) -> Self {
        Self {
            on_view: self.on_view.clone(),
            on_edit: self.on_edit.clone(),
            on_delete: self.on_delete.clone(),
            on_activate: self.on_activate.clone(),
            on_deactivate: self.on_deactivate.clone(),
        }
    }
}

impl<T> Default for RowActions<T> {
    fn default() -> Self {
        Self {
            on_view: None,
            on_edit: None,
            on_delete: None,
            on_activate: None,
            on_deactivate: None,
        }
    }
}

impl<T: Record> RowActions<T> {
    /// Creates actions with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires view, edit and delete to a selection context, so each button
    /// opens the matching dialog.
    pub fn with_selection(selection: &SelectionContext<T>) -> Self {
        let view = selection.clone();
        let edit = selection.clone();
        let delete = selection.clone();
        Self::new()
            .on_view(move |record: &T| view.view(record.clone()))
            .on_edit(move |record: &T| edit.edit(record.clone()))
            .on_delete(move |record: &T| delete.delete(record.clone()))
    }

    /// Sets the view callback.
    #[must_use]
    pub fn on_view(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_view = Some(Arc::new(f));
        self
    }

    /// Sets the edit callback.
    #[must_use]
    pub fn on_edit(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_edit = Some(Arc::new(f));
        self
    }

    /// Sets the delete callback.
    #[must_use]
    pub fn on_delete(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_delete = Some(Arc::new(f));
        self
    }

    /// Sets the activate callback.
    #[must_use]
    pub fn on_activate(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_activate = Some(Arc::new(f));
        self
    }

    /// Sets the deactivate callback.
    #[must_use]
    pub fn on_deactivate(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_deactivate = Some(Arc::new(f));
        self
    }

    /// Drops the callback for `kind`.
    #[must_use]
    pub fn without(mut self, kind: ActionKind) -> Self {
        match kind {
            ActionKind::View => self.on_view = None,
            ActionKind::Edit => self.on_edit = None,
            ActionKind::Delete => self.on_delete = None,
            ActionKind::Activate => self.on_activate = None,
            ActionKind::Deactivate => self.on_deactivate = None,
        }
        self
    }

    /// Actions offered for `record`, in display order.
    pub fn available(&self, record: &T) -> Vec<ActionKind> {
        ActionKind::ALL
            .into_iter()
            .filter(|kind| self.callback(*kind, record).is_some())
            .collect()
    }

    /// Runs the callback for `kind` if it is offered for `record`.
    ///
    /// Returns `false` when the action is not available.
    pub fn trigger(&self, kind: ActionKind, record: &T) -> bool {
        match self.callback(kind, record) {
            Some(callback) => {
                callback(record);
                true
            },
            None => false,
        }
    }

    fn callback(&self, kind: ActionKind, record: &T) -> Option<&Callback<T>> {
        match kind {
            ActionKind::View => self.on_view.as_ref(),
            ActionKind::Edit => self.on_edit.as_ref(),
            ActionKind::Delete => self.on_delete.as_ref(),
            ActionKind::Activate => match record.status() {
                Some(RecordStatus::Inactive) => self.on_activate.as_ref(),
                _ => None,
            },
            ActionKind::Deactivate => match record.status() {
                Some(RecordStatus::Active) => self.on_deactivate.as_ref(),
                _ => None,
            },
        }
    }
}

impl<T> fmt::Debug for RowActions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowActions")
            .field("view", &self.on_view.is_some())
            .field("edit", &self.on_edit.is_some())
            .field("delete", &self.on_delete.is_some())
            .field("activate", &self.on_activate.is_some())
            .field("deactivate", &self.on_deactivate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::selection::Selection;
    use crate::testing::fixtures::Brand;

    fn all_callbacks(counter: &Arc<AtomicUsize>) -> RowActions<Brand> {
        let bump = |counter: &Arc<AtomicUsize>| {
            let counter = Arc::clone(counter);
            move |_: &Brand| {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        };
        RowActions::new()
            .on_view(bump(counter))
            .on_edit(bump(counter))
            .on_delete(bump(counter))
            .on_activate(bump(counter))
            .on_deactivate(bump(counter))
    }

    #[test]
    fn test_status_decides_activate_or_deactivate() {
        let counter = Arc::new(AtomicUsize::new(0));
        let actions = all_callbacks(&counter);

        let active = Brand::new(1, "Visa", RecordStatus::Active);
        let inactive = Brand::new(2, "Diners", RecordStatus::Inactive);

        assert_eq!(
            actions.available(&active),
            vec![
                ActionKind::View,
                ActionKind::Edit,
                ActionKind::Delete,
                ActionKind::Deactivate
            ]
        );
        assert!(actions.available(&inactive).contains(&ActionKind::Activate));
        assert!(!actions.available(&inactive).contains(&ActionKind::Deactivate));

        assert!(!actions.trigger(ActionKind::Activate, &active));
        assert!(actions.trigger(ActionKind::Activate, &inactive));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregistered_actions_are_hidden() {
        let actions = RowActions::<Brand>::new().on_view(|_| {});
        let brand = Brand::new(1, "Visa", RecordStatus::Active);
        assert_eq!(actions.available(&brand), vec![ActionKind::View]);
        assert!(!actions.trigger(ActionKind::Edit, &brand));
    }

    #[test]
    fn test_selection_wiring() {
        let selection = SelectionContext::<Brand>::new();
        let actions = RowActions::with_selection(&selection);
        let brand = Brand::new(7, "Elo", RecordStatus::Active);

        actions.trigger(ActionKind::Edit, &brand);
        assert_eq!(selection.current(), Selection::Editing(brand.clone()));

        actions.trigger(ActionKind::Delete, &brand);
        assert_eq!(selection.deleting(), Some(brand));
    }

    #[test]
    fn test_labels() {
        assert_eq!(ActionKind::Deactivate.to_string(), "Desativar");
    }
}
