//! Yes/no confirmation dialog, used for quitting and deleting records

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub struct ConfirmDialog {
    title: String,
    question: String,
    on_confirm: Action,
}

impl ConfirmDialog {
    pub fn new(title: &str, question: &str, on_confirm: Action) -> Self {
        Self {
            title: title.to_string(),
            question: question.to_string(),
            on_confirm,
        }
    }

    pub fn quit() -> Self {
        Self::new("Quit?", "Are you sure you want to quit?", Action::ForceQuit)
    }

    pub fn delete(id: i64, name: &str) -> Self {
        Self::new(
            "Delete?",
            &format!("Are you sure you want to delete '{}'?", name),
            Action::ConfirmDelete(id),
        )
    }

    #[cfg(test)]
    pub fn question(&self) -> &str {
        &self.question
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(self.on_confirm.clone()),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let width = u16::try_from(self.question.width())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
            .max(40);
        let popup_area = centered_popup(area, width, 7);

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.question.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Yes  "),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("No, cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(format!(" {} ", self.title))
                    .title_style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(dialog: &mut ConfirmDialog, c: char) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_delete_confirmation() {
        let mut dialog = ConfirmDialog::delete(42, "Shark");
        assert!(dialog.question().contains("Shark"));
        assert_eq!(press(&mut dialog, 'y'), Some(Action::ConfirmDelete(42)));
        assert_eq!(press(&mut dialog, 'n'), Some(Action::CloseModal));
        assert_eq!(press(&mut dialog, 'x'), None);
    }

    #[test]
    fn test_draw_with_very_long_name() {
        let name = "Tiger".repeat(20_000);
        let mut dialog = ConfirmDialog::delete(1, &name);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| dialog.draw(frame, frame.area()).unwrap())
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Delete?"));
    }

    #[test]
    fn test_quit_confirmation() {
        let mut dialog = ConfirmDialog::quit();
        assert_eq!(press(&mut dialog, 'Y'), Some(Action::ForceQuit));
    }
}
