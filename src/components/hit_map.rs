//! Clickable regions recorded while drawing
//!
//! The map is cleared at the start of every draw and refilled from the
//! current view, so a click always resolves against what is on screen.

use crate::action::Action;
use ratatui::layout::{Position, Rect};

#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Action)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Bind `action` to `area`; empty areas are ignored
    pub fn bind(&mut self, area: Rect, action: Action) {
        if area.area() > 0 {
            self.regions.push((area, action));
        }
    }

    /// Action bound at a screen cell; later bindings win on overlap
    pub fn action_at(&self, column: u16, row: u16) -> Option<Action> {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, action)| action.clone())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
