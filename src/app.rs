//! Root application component
//!
//! The App owns the tables and routes Actions: navigation goes to the table
//! components, sorting and mutations go to the `AnimalTable` models, and the
//! view is rebuilt from the model after every change.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, ConfirmDialog, HelpDialog, HomeComponent, HomeRenderContext, RecordForm,
    TableComponent,
};
use crate::config::Config;
use crate::error::TableError;
use crate::model::modal::{FormMode, Modal, ModalStack};
use crate::model::{AnimalTable, Field, RecordDraft, Storage};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::rc::Rc;
use tracing::debug;

pub struct App {
    pub tables: Vec<AnimalTable>,

    /// Index of the table shown on screen
    pub active: usize,

    pub modals: ModalStack,

    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    /// One per table, so each keeps its own selection
    pub table_views: Vec<TableComponent>,
    pub record_form: RecordForm,
    pub confirm_dialog: ConfirmDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    /// Build every configured table, restoring persisted data from `storage`
    pub fn new(config: &Config, storage: Rc<dyn Storage>) -> App {
        let tables: Vec<AnimalTable> = config
            .tables
            .iter()
            .map(|spec| AnimalTable::new(spec.table.clone(), spec.seed.clone(), storage.clone()))
            .collect();

        let table_views = tables
            .iter()
            .map(|table| {
                let mut component = TableComponent::new();
                component.set_view(table.view());
                component
            })
            .collect();

        App {
            tables,
            active: 0,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            home: HomeComponent::new(),
            table_views,
            record_form: RecordForm::new(),
            confirm_dialog: ConfirmDialog::quit(),
            help_dialog: HelpDialog::default(),
        }
    }

    pub fn active_table(&self) -> Option<&AnimalTable> {
        self.tables.get(self.active)
    }

    pub fn active_view(&self) -> Option<&TableComponent> {
        self.table_views.get(self.active)
    }

    /// Re-project the active table into its component
    fn refresh_view(&mut self) {
        if let (Some(table), Some(component)) = (
            self.tables.get(self.active),
            self.table_views.get_mut(self.active),
        ) {
            component.set_view(table.view());
        }
    }

    fn select_record(&mut self, id: i64) {
        if let Some(component) = self.table_views.get_mut(self.active) {
            component.select_id(id);
        }
    }

    fn selected_id(&self) -> Option<i64> {
        self.active_view().and_then(|view| view.selected_id())
    }

    fn switch_table(&mut self, index: usize) {
        if index < self.tables.len() {
            self.active = index;
            self.refresh_view();
        }
    }

    fn report(&mut self, err: TableError) {
        if err.is_silent() {
            debug!("Ignored: {}", err);
        } else {
            self.error = Some(err.to_string());
        }
    }

    fn sort_active(&mut self, field: Field) {
        let selected = self.selected_id();
        let Some(table) = self.tables.get_mut(self.active) else {
            return;
        };
        if !table.sort(field) {
            return;
        }
        let direction = table.sort_state().map(|s| s.direction.indicator()).unwrap_or("");
        self.status_message = Some(format!("Sorted by {} {}", field, direction));
        self.refresh_view();
        if let Some(id) = selected {
            self.select_record(id);
        }
    }

    fn open_edit_form(&mut self, id: i64) {
        let Some(record) = self.active_table().and_then(|t| t.find(id)).cloned() else {
            return;
        };
        self.record_form.open_edit(&record);
        self.modals.push(Modal::RecordForm(FormMode::Edit(id)));
    }

    fn request_delete(&mut self, id: i64) -> Option<Action> {
        let table = self.active_table()?;
        let name = table.find(id)?.name.clone();
        if table.config().confirm_delete {
            self.confirm_dialog = ConfirmDialog::delete(id, &name);
            self.modals.push(Modal::DeleteConfirm { id });
            None
        } else {
            Some(Action::ConfirmDelete(id))
        }
    }

    fn delete_record(&mut self, id: i64) {
        if matches!(self.modals.top(), Some(Modal::DeleteConfirm { .. })) {
            self.modals.pop();
        }
        let Some(table) = self.tables.get_mut(self.active) else {
            return;
        };
        match table.delete(id) {
            Ok(removed) => self.status_message = Some(format!("Deleted {}", removed.name)),
            Err(e) => self.report(e),
        }
        self.refresh_view();
    }

    fn submit_form(&mut self, mode: FormMode, draft: RecordDraft) {
        if matches!(self.modals.top(), Some(Modal::RecordForm(_))) {
            self.modals.pop();
        }
        let Some(table) = self.tables.get_mut(self.active) else {
            return;
        };
        let name = draft.name.trim().to_string();

        match mode {
            FormMode::Add => match table.add(&draft) {
                Ok(id) => {
                    self.status_message = Some(format!("Added {}", name));
                    self.refresh_view();
                    self.select_record(id);
                }
                Err(e) => {
                    self.report(e);
                    self.refresh_view();
                }
            },
            FormMode::Edit(id) => {
                match table.edit(id, &draft) {
                    Ok(()) => self.status_message = Some(format!("Updated {}", name)),
                    Err(e) => self.report(e),
                }
                self.refresh_view();
            }
        }
    }

    fn summary(&self) -> String {
        let Some(table) = self.active_table() else {
            return String::new();
        };
        if table.is_empty() {
            return "no records".to_string();
        }
        let sort = match table.sort_state() {
            Some(state) => format!("sorted by {} {}", state.field, state.direction.indicator()),
            None => "unsorted".to_string(),
        };
        format!("{} records · {}", table.len(), sort)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            return match modal {
                Modal::QuitConfirm | Modal::DeleteConfirm { .. } => {
                    self.confirm_dialog.handle_key_event(key)
                }
                Modal::RecordForm(_) => self.record_form.handle_key_event(key),
                Modal::Help => self.help_dialog.handle_key_event(key),
            };
        }

        self.error = None;
        self.status_message = None;
        match self.table_views.get_mut(self.active) {
            Some(component) => component.handle_key_event(key),
            None => Ok(match key.code {
                KeyCode::Char('q') => Some(Action::ForceQuit),
                _ => None,
            }),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        if let Some(action) = self.home.handle_mouse_event(mouse)? {
            return Ok(Some(action));
        }
        match self.table_views.get_mut(self.active) {
            Some(component) => component.handle_mouse_event(mouse),
            None => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextTable => {
                if !self.tables.is_empty() {
                    self.switch_table((self.active + 1) % self.tables.len());
                }
            }
            Action::PrevTable => {
                if !self.tables.is_empty() {
                    let count = self.tables.len();
                    self.switch_table((self.active + count - 1) % count);
                }
            }
            Action::SelectTable(index) => self.switch_table(index),
            Action::NextRow
            | Action::PrevRow
            | Action::FirstRow
            | Action::LastRow
            | Action::SelectRow(_) => {
                if let Some(component) = self.table_views.get_mut(self.active) {
                    return component.update(action);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Sorting
            // ─────────────────────────────────────────────────────────────────
            Action::SortBy(field) => self.sort_active(field),
            Action::SortByColumn(index) => {
                return Ok(Field::ALL.get(index).map(|field| Action::SortBy(*field)));
            }

            // ─────────────────────────────────────────────────────────────────
            // Records
            // ─────────────────────────────────────────────────────────────────
            Action::OpenAddForm => {
                if !self.tables.is_empty() {
                    self.record_form.open_add();
                    self.modals.push(Modal::RecordForm(FormMode::Add));
                }
            }
            Action::EditSelected => {
                return Ok(self.selected_id().map(Action::OpenEditForm));
            }
            Action::OpenEditForm(id) => self.open_edit_form(id),
            Action::DeleteSelected => {
                return Ok(self.selected_id().map(Action::RequestDelete));
            }
            Action::RequestDelete(id) => return Ok(self.request_delete(id)),
            Action::ConfirmDelete(id) => self.delete_record(id),
            Action::SubmitForm(mode, draft) => self.submit_form(mode, draft),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.confirm_dialog = ConfirmDialog::quit();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.toggle(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if self.tables.is_empty() {
            let message = Paragraph::new("No tables configured. Add some to the config file.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(" Animals "));
            frame.render_widget(message, area);
            return Ok(());
        }

        // the view is a projection of the model, rebuilt on every draw
        self.refresh_view();

        let ctx = HomeRenderContext {
            titles: self
                .tables
                .iter()
                .map(|t| t.config().display_title())
                .collect(),
            active: self.active,
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
            summary: self.summary(),
        };

        if let Some(table_view) = self.table_views.get_mut(self.active) {
            draw_home_screen(frame, area, &mut self.home, table_view, &ctx)?;
        }

        if let Some(modal) = self.modals.top().cloned() {
            match modal {
                Modal::QuitConfirm | Modal::DeleteConfirm { .. } => {
                    self.confirm_dialog.draw(frame, area)?
                }
                Modal::RecordForm(_) => self.record_form.draw(frame, area)?,
                Modal::Help => self.help_dialog.draw(frame, area)?,
            }
        }
        Ok(())
    }
}
