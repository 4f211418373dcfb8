//! Table component for animal records
//!
//! Renders a `TableView` with headers, rows, row actions and an add button,
//! and records a hit region for every clickable part of it.

use crate::action::Action;
use crate::component::Component;
use crate::components::HitMap;
use crate::model::{Column, TableView};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEPARATOR: &str = " │ ";
const EDIT_LABEL: &str = "[edit]";
const DELETE_LABEL: &str = "[del]";
const ADD_LABEL: &str = "[+ add]";
const MAX_COLUMN_WIDTH: usize = 40;

/// Lines drawn besides the rows: header, separator, blank line, footer
const CHROME_LINES: usize = 4;

fn actions_text() -> String {
    format!("{} {}", EDIT_LABEL, DELETE_LABEL)
}

/// Pad or cut `text` to exactly `width` columns
fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Column widths for a view, in column order
pub fn column_widths(view: &TableView) -> Vec<usize> {
    view.headers
        .iter()
        .enumerate()
        .map(|(i, header)| match header.column {
            Column::Actions => header.text().width().max(actions_text().width()),
            Column::Field(_) => view
                .rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.text().width()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH),
        })
        .collect()
}

/// X offset of each column relative to the start of the line
fn column_offsets(widths: &[usize]) -> Vec<usize> {
    let mut offset = 0;
    widths
        .iter()
        .map(|w| {
            let start = offset;
            offset += w + SEPARATOR.width();
            start
        })
        .collect()
}

pub struct TableComponent {
    view: TableView,
    selected: usize,
    scroll: usize,
    hits: HitMap,
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableComponent {
    pub fn new() -> Self {
        Self {
            view: TableView {
                title: String::new(),
                headers: Vec::new(),
                rows: Vec::new(),
            },
            selected: 0,
            scroll: 0,
            hits: HitMap::new(),
        }
    }

    /// Replace the displayed view, keeping the selection in range
    pub fn set_view(&mut self, view: TableView) {
        self.view = view;
        self.selected = self.selected.min(self.view.rows.len().saturating_sub(1));
    }

    #[cfg(test)]
    pub fn view(&self) -> &TableView {
        &self.view
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Id of the highlighted record
    pub fn selected_id(&self) -> Option<i64> {
        self.view.rows.get(self.selected).map(|row| row.id)
    }

    /// Move the highlight to the record with `id`, if shown
    pub fn select_id(&mut self, id: i64) {
        if let Some(index) = self.view.rows.iter().position(|row| row.id == id) {
            self.selected = index;
        }
    }

    #[cfg(test)]
    pub fn hits(&self) -> &HitMap {
        &self.hits
    }

    fn last_index(&self) -> usize {
        self.view.rows.len().saturating_sub(1)
    }

    /// Keep the selected row inside a window of `visible` rows
    fn clamp_scroll(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
        self.scroll = self
            .scroll
            .min(self.view.rows.len().saturating_sub(visible));
    }

    fn header_line(&self, widths: &[usize]) -> Line<'static> {
        let spans: Vec<Span> = self
            .view
            .headers
            .iter()
            .zip(widths)
            .flat_map(|(header, width)| {
                let style = if header.indicator.is_some() {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if header.sortable {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD)
                };
                vec![
                    Span::styled(fit(&header.text(), *width), style),
                    Span::raw(SEPARATOR),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn row_line(&self, index: usize, widths: &[usize]) -> Line<'static> {
        let row = &self.view.rows[index];
        let base = if index == self.selected {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = Vec::new();
        for (i, header) in self.view.headers.iter().enumerate() {
            let width = widths[i];
            match header.column {
                Column::Field(_) => {
                    let cell = row.cells.get(i).map(String::as_str).unwrap_or("");
                    spans.push(Span::styled(fit(cell, width), base));
                }
                Column::Actions => {
                    spans.push(Span::styled(EDIT_LABEL, base.fg(Color::Blue)));
                    spans.push(Span::styled(" ", base));
                    spans.push(Span::styled(DELETE_LABEL, base.fg(Color::Red)));
                    let used = actions_text().width();
                    spans.push(Span::styled(" ".repeat(width.saturating_sub(used)), base));
                }
            }
            spans.push(Span::raw(SEPARATOR));
        }
        Line::from(spans)
    }

    /// Rebuild the hit map for the rows currently on screen
    fn bind_hits(&mut self, inner: Rect, widths: &[usize], visible_rows: usize, footer_line: usize) {
        self.hits.clear();
        let offsets = column_offsets(widths);
        let x_at = |offset: usize| inner.x.saturating_add(offset.min(u16::MAX as usize) as u16);
        let region = |x: u16, y: u16, width: usize| {
            Rect::new(x, y, width.min(u16::MAX as usize) as u16, 1).intersection(inner)
        };

        // Header
        for (i, header) in self.view.headers.iter().enumerate() {
            if let (Column::Field(field), true) = (header.column, header.sortable) {
                self.hits
                    .bind(region(x_at(offsets[i]), inner.y, widths[i]), Action::SortBy(field));
            }
        }

        // Rows
        let end = (self.scroll + visible_rows).min(self.view.rows.len());
        for (line, index) in (self.scroll..end).enumerate() {
            let y = inner.y + 2 + line as u16;
            let id = self.view.rows[index].id;
            let row_width = offsets.last().copied().unwrap_or(0);
            self.hits
                .bind(region(inner.x, y, row_width), Action::SelectRow(index));

            if let Some(actions) = self
                .view
                .headers
                .iter()
                .position(|h| h.column == Column::Actions)
            {
                let x = x_at(offsets[actions]);
                self.hits
                    .bind(region(x, y, EDIT_LABEL.width()), Action::OpenEditForm(id));
                let delete_x = x.saturating_add(EDIT_LABEL.width() as u16 + 1);
                self.hits
                    .bind(region(delete_x, y, DELETE_LABEL.width()), Action::RequestDelete(id));
            }
        }

        // Footer
        let footer_y = inner.y.saturating_add(footer_line.min(u16::MAX as usize) as u16);
        self.hits
            .bind(region(inner.x, footer_y, ADD_LABEL.width()), Action::OpenAddForm);
    }
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            KeyCode::Tab => Some(Action::NextTable),
            KeyCode::BackTab => Some(Action::PrevTable),
            KeyCode::Char(c @ '1'..='4') => {
                Some(Action::SortByColumn(c as usize - '1' as usize))
            }
            KeyCode::Char('a') => Some(Action::OpenAddForm),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::EditSelected),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.hits.action_at(mouse.column, mouse.row),
            MouseEventKind::ScrollDown => Some(Action::NextRow),
            MouseEventKind::ScrollUp => Some(Action::PrevRow),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextRow => {
                if self.selected < self.last_index() {
                    self.selected += 1;
                }
            }
            Action::PrevRow => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::FirstRow => {
                self.selected = 0;
            }
            Action::LastRow => {
                self.selected = self.last_index();
            }
            Action::SelectRow(index) => {
                self.selected = index.min(self.last_index());
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.view.title))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let widths = column_widths(&self.view);
        let visible_rows = (inner.height as usize).saturating_sub(CHROME_LINES).max(1);
        self.clamp_scroll(visible_rows);

        let mut lines = vec![self.header_line(&widths)];
        let separator: String = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        let end = (self.scroll + visible_rows).min(self.view.rows.len());
        for index in self.scroll..end {
            lines.push(self.row_line(index, &widths));
        }
        if self.view.rows.is_empty() {
            lines.push(Line::from(Span::styled(
                "No animals yet",
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                ADD_LABEL,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   {} records", self.view.rows.len()),
                Style::default().fg(Color::Yellow),
            ),
        ]));

        let footer_line = lines.len() - 1;
        frame.render_widget(Paragraph::new(lines), inner);
        self.bind_hits(inner, &widths, visible_rows, footer_line);

        let total = self.view.rows.len();
        if total > visible_rows {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_rows)).position(self.scroll);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}
