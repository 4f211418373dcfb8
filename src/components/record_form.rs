//! Input form for adding and editing records
//!
//! Collects the four record fields as text and hands them back as a
//! `SubmitForm` action (or `CloseModal` when cancelled). Validation is left
//! to the table.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::modal::FormMode;
use crate::model::record::DEFAULT_IMAGE;
use crate::model::{Field, Record, RecordDraft};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub struct RecordForm {
    mode: FormMode,
    draft: RecordDraft,
    focus: usize,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Add,
            draft: RecordDraft::default(),
            focus: 0,
        }
    }

    /// Reset to an empty form for a new record; the image starts at the default
    pub fn open_add(&mut self) {
        self.mode = FormMode::Add;
        self.draft = RecordDraft {
            image: DEFAULT_IMAGE.to_string(),
            ..RecordDraft::default()
        };
        self.focus = 0;
    }

    /// Pre-fill the form with an existing record
    pub fn open_edit(&mut self, record: &Record) {
        self.mode = FormMode::Edit(record.id);
        self.draft = RecordDraft::from_record(record);
        self.focus = 0;
    }

    #[cfg(test)]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    #[cfg(test)]
    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focus]
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => " Add Animal ",
            FormMode::Edit(_) => " Edit Animal ",
        }
    }
}

impl Component for RecordForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SubmitForm(self.mode, self.draft.clone())),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                None
            }
            KeyCode::Backspace => {
                self.draft.get_mut(self.focused_field()).pop();
                None
            }
            KeyCode::Char(c) => {
                self.draft.get_mut(self.focused_field()).push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 60, 12);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from("")];
        for (i, field) in Field::ALL.iter().enumerate() {
            let focused = i == self.focus;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            let cursor = if focused { "_" } else { "" };
            let hint = match field {
                Field::Image => " (optional)",
                _ => "",
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {:>9}: ", field.label()), label_style),
                Span::styled(
                    format!("{}{}", self.draft.get(*field), cursor),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Save  "),
            Span::styled(
                " Tab ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Next field  "),
            Span::styled(
                " Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancel"),
        ]));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(self.title())
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
