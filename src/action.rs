//! Action enum - All possible application actions
//!
//! Components turn key presses and mouse clicks into Actions; the App
//! processes them to update state.

use crate::model::modal::FormMode;
use crate::model::{Field, RecordDraft};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    Tick,
    Resize(u16, u16),
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextTable,
    PrevTable,
    SelectTable(usize),
    NextRow,
    PrevRow,
    FirstRow,
    LastRow,
    /// Select a row by its position in the current order
    SelectRow(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────
    SortBy(Field),
    /// Sort by the n-th column (0-based), from the number keys
    SortByColumn(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────
    OpenAddForm,
    OpenEditForm(i64),
    EditSelected,
    /// Delete a record, asking first when the table is configured to
    RequestDelete(i64),
    DeleteSelected,
    /// Delete without asking
    ConfirmDelete(i64),
    SubmitForm(FormMode, RecordDraft),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextTable => write!(f, "NextTable"),
            Action::PrevTable => write!(f, "PrevTable"),
            Action::SelectTable(i) => write!(f, "SelectTable({})", i),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::SelectRow(i) => write!(f, "SelectRow({})", i),
            Action::SortBy(field) => write!(f, "SortBy({})", field),
            Action::SortByColumn(i) => write!(f, "SortByColumn({})", i),
            Action::OpenAddForm => write!(f, "OpenAddForm"),
            Action::OpenEditForm(id) => write!(f, "OpenEditForm({})", id),
            Action::EditSelected => write!(f, "EditSelected"),
            Action::RequestDelete(id) => write!(f, "RequestDelete({})", id),
            Action::DeleteSelected => write!(f, "DeleteSelected"),
            Action::ConfirmDelete(id) => write!(f, "ConfirmDelete({})", id),
            Action::SubmitForm(mode, draft) => write!(f, "SubmitForm({:?}, {})", mode, draft.name),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
