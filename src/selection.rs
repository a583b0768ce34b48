//! Which record a list screen's dialogs are open for.
//!
//! A screen has at most one dialog open: the detail view, the edit form,
//! the delete confirmation or the create form. [`Selection`] holds that as a
//! single variant, so two dialogs can never claim a record at once.
//! [`SelectionContext`] is the shared container handed to the table and to
//! every dialog of one screen; it lives as long as the screen does.
//!
//! ```rust
//! use shopdesk::RecordStatus;
//! use shopdesk::selection::{Selection, SelectionContext};
//! use shopdesk::testing::fixtures::Brand;
//!
//! let selection = SelectionContext::new();
//! let visa = Brand::new(1, "Visa", RecordStatus::Active);
//!
//! selection.edit(visa.clone());
//! assert_eq!(selection.editing(), Some(visa.clone()));
//!
//! // Opening another dialog replaces the edit form.
//! selection.delete(visa.clone());
//! assert_eq!(selection.editing(), None);
//! assert_eq!(selection.deleting(), Some(visa));
//!
//! selection.cancel();
//! assert_eq!(selection.current(), Selection::None);
//! ```

use tokio::sync::watch;

/// The dialog currently open on a list screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    /// No dialog.
    None,
    /// Detail view of a record.
    Viewing(T),
    /// Edit form of a record.
    Editing(T),
    /// Delete confirmation of a record.
    Deleting(T),
    /// Create form.
    Registering,
}

/// A transition of [`Selection`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionAction<T> {
    /// A row's view button.
    View(T),
    /// A row's edit button.
    Edit(T),
    /// A row's delete button.
    Delete(T),
    /// The screen's "new" button.
    Register,
    /// The dialog's cancel button.
    Cancel,
    /// The dialog's form or confirmation succeeded.
    Submitted,
    /// The dialog was dismissed.
    Close,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::None
    }
}

impl<T> Selection<T> {
    /// Applies `action` and returns the next selection.
    ///
    /// Opening a dialog replaces whatever was open. Cancel, submit and
    /// close all return to [`Selection::None`].
    #[must_use]
    pub fn reduce(self, action: SelectionAction<T>) -> Self {
        match action {
            SelectionAction::View(record) => Selection::Viewing(record),
            SelectionAction::Edit(record) => Selection::Editing(record),
            SelectionAction::Delete(record) => Selection::Deleting(record),
            SelectionAction::Register => Selection::Registering,
            SelectionAction::Cancel | SelectionAction::Submitted | SelectionAction::Close => {
                Selection::None
            },
        }
    }

    /// Returns `true` when no dialog is open.
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// The record the open dialog targets, if any.
    pub fn record(&self) -> Option<&T> {
        match self {
            Selection::Viewing(record) | Selection::Editing(record) | Selection::Deleting(record) => {
                Some(record)
            },
            Selection::None | Selection::Registering => None,
        }
    }

    /// The record in the detail view.
    pub fn viewing(&self) -> Option<&T> {
        match self {
            Selection::Viewing(record) => Some(record),
            _ => None,
        }
    }

    /// The record in the edit form.
    pub fn editing(&self) -> Option<&T> {
        match self {
            Selection::Editing(record) => Some(record),
            _ => None,
        }
    }

    /// The record awaiting delete confirmation.
    pub fn deleting(&self) -> Option<&T> {
        match self {
            Selection::Deleting(record) => Some(record),
            _ => None,
        }
    }

    /// Returns `true` while the create form is open.
    pub fn is_registering(&self) -> bool {
        matches!(self, Selection::Registering)
    }
}

/// Shared, observable [`Selection`] of one list screen.
///
/// Clones share state. Dialogs await [`subscribe`](Self::subscribe) to know
/// when to open and close.
#[derive(Debug)]
pub struct SelectionContext<T> {
    tx: watch::Sender<Selection<T>>,
}

impl<T> Clone for SelectionContext<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Default for SelectionContext<T> {
    fn default() -> Self {
        Self {
            tx: watch::Sender::new(Selection::None),
        }
    }
}

impl<T: Clone> SelectionContext<T> {
    /// Creates a context with no dialog open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action`.
    pub fn dispatch(&self, action: SelectionAction<T>) {
        self.tx.send_modify(|selection| {
            let current = std::mem::take(selection);
            *selection = current.reduce(action);
        });
    }

    /// Opens the detail view of `record`.
    pub fn view(&self, record: T) {
        self.dispatch(SelectionAction::View(record));
    }

    /// Opens the edit form of `record`.
    pub fn edit(&self, record: T) {
        self.dispatch(SelectionAction::Edit(record));
    }

    /// Asks to confirm deleting `record`.
    pub fn delete(&self, record: T) {
        self.dispatch(SelectionAction::Delete(record));
    }

    /// Opens the create form.
    pub fn register(&self) {
        self.dispatch(SelectionAction::Register);
    }

    /// Closes the open dialog after the user cancelled.
    pub fn cancel(&self) {
        self.dispatch(SelectionAction::Cancel);
    }

    /// Closes the open dialog after it succeeded.
    pub fn submitted(&self) {
        self.dispatch(SelectionAction::Submitted);
    }

    /// Closes the open dialog after it was dismissed.
    pub fn close(&self) {
        self.dispatch(SelectionAction::Close);
    }

    /// Returns a copy of the selection.
    pub fn current(&self) -> Selection<T> {
        self.tx.borrow().clone()
    }

    /// The record in the detail view.
    pub fn viewing(&self) -> Option<T> {
        self.tx.borrow().viewing().cloned()
    }

    /// The record in the edit form.
    pub fn editing(&self) -> Option<T> {
        self.tx.borrow().editing().cloned()
    }

    /// The record awaiting delete confirmation.
    pub fn deleting(&self) -> Option<T> {
        self.tx.borrow().deleting().cloned()
    }

    /// Returns `true` while the create form is open.
    pub fn is_registering(&self) -> bool {
        self.tx.borrow().is_registering()
    }

    /// Returns a receiver notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<Selection<T>> {
        self.tx.subscribe()
    }
}
