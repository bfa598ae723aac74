use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::{action::Action, components::Component, tui::Frame};

/// A `Component` drawn over the panels.
///
/// The event loop routes every event to the open popup first and closes it
/// when it emits `Action::ClosePopup`.
pub trait PopupComponent: Component {
    /// Whether keys the popup ignores are swallowed instead of reaching the panels.
    fn is_modal(&self) -> bool {
        true
    }

    fn cancel_action(&mut self) -> Option<Action> {
        Some(Action::ClosePopup)
    }
}

/// Dim the panels behind a popup.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect) {
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, area);
}

/// Centered rectangle of the given size, clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Clear `area` and draw a rounded, titled shell. Returns the inner area.
pub fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: impl Into<String>) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .style(Style::default().fg(Color::White).bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect_fixed(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect_fixed(area, 80, 20), area);
    }
}
