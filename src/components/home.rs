//! Home screen: table tabs, the active table, status line and help bar

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, HitMap, TableComponent};
use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub titles: Vec<&'a str>,
    pub active: usize,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
    /// Shown when nothing else is: record count and sort summary
    pub summary: String,
}

/// Owns the clickable tab regions
#[derive(Default)]
pub struct HomeComponent {
    tab_hits: HitMap,
}

impl HomeComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one click region per tab title, matching how `Tabs` lays them out
    fn bind_tabs(&mut self, inner: Rect, titles: &[&str]) {
        self.tab_hits.clear();
        let mut x = inner.x;
        for (index, title) in titles.iter().enumerate() {
            // one space of padding on both sides, then a one-cell divider
            let width = title.width() as u16 + 2;
            let area = Rect::new(x, inner.y, width, 1).intersection(inner);
            self.tab_hits.bind(area, Action::SelectTable(index));
            x = x.saturating_add(width + 1);
        }
    }
}

impl Component for HomeComponent {
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Ok(self.tab_hits.action_at(mouse.column, mouse.row))
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    table: &mut TableComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    let tabs_block = Block::default()
        .borders(Borders::ALL)
        .title(" Animals ")
        .border_style(Style::default().fg(Color::DarkGray));
    home.bind_tabs(tabs_block.inner(layout.tabs), &ctx.titles);

    let tabs = Tabs::new(ctx.titles.clone())
        .block(tabs_block)
        .select(ctx.active)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, layout.tabs);

    table.draw(frame, layout.table)?;

    let status = if let Some(error) = ctx.error {
        Line::from(Span::styled(
            format!(" ✗ {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(message) = ctx.status_message {
        Line::from(Span::styled(
            format!(" ✓ {}", message),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", ctx.summary),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(status), layout.status);

    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let help = Paragraph::new(Line::from(vec![
        key(" a "),
        Span::raw("Add  "),
        key(" e "),
        Span::raw("Edit  "),
        key(" d "),
        Span::raw("Delete  "),
        key(" 1-4 "),
        Span::raw("Sort  "),
        key(" Tab "),
        Span::raw("Next table  "),
        key(" ? "),
        Span::raw("Help  "),
        key(" q "),
        Span::raw("Quit"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(help, layout.help);

    Ok(())
}
