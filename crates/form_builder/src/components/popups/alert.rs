use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use crate::{
    action::Action,
    components::Component,
    components::popup::PopupComponent,
    domain::FormBuilder,
    tui::{EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame};

/// Modal alert with a title and a (possibly multi-line) message.
/// - Enter / Esc: close
/// - Up / Down: scroll long messages
pub struct AlertPopup {
    title: String,
    message: String,
    min_width: u16,
    scroll: u16,
}

impl AlertPopup {
    pub fn new<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            min_width: 40,
            scroll: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn line_count(&self) -> u16 {
        self.message.lines().count().max(1) as u16
    }

    fn dialog_rect(&self, area: Rect) -> Rect {
        let widest = self
            .message
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.title.chars().count() + 4) as u16;
        // message + spacer + hint + borders
        let height = self.line_count().saturating_add(4);
        let width = widest.saturating_add(4).max(self.min_width);
        centered_rect_fixed(area, width, height)
    }
}

impl Component for AlertPopup {
    fn keymap_context(&self) -> &'static str {
        "popup"
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &FormBuilder,
    ) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Esc => self.cancel_action(),
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Some(Action::Update)
            }
            KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.line_count().saturating_sub(1));
                Some(Action::Update)
            }
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &FormBuilder) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let dialog = self.dialog_rect(area);
        let inner = draw_popup_frame(f, dialog, &self.title);

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::White)),
            Span::raw("/"),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": Close"),
        ])
        .fg(Color::DarkGray);

        let body_height = inner.height.saturating_sub(2);
        let body = Rect {
            height: body_height,
            ..inner
        };
        let lines: Vec<Line> = self.message.lines().map(Line::raw).collect();
        f.render_widget(
            Paragraph::new(Text::from(lines)).scroll((self.scroll, 0)),
            body,
        );
        if inner.height >= 1 {
            let hint_area = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            f.render_widget(Paragraph::new(hint), hint_area);
        }
        Ok(())
    }
}

impl PopupComponent for AlertPopup {}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn enter_and_esc_close() {
        let state = FormBuilder::new();
        for code in [KeyCode::Enter, KeyCode::Esc] {
            let mut popup = AlertPopup::new("Cannot submit", "Email is required.");
            let r = popup
                .handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), &state)
                .unwrap();
            assert_eq!(r, Some(EventResponse::Stop(Action::ClosePopup)));
        }
    }

    #[test]
    fn draws_title_and_message() {
        let state = FormBuilder::new();
        let mut popup = AlertPopup::new("Load config", "Invalid JSON format");
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| popup.draw(f, f.area(), &state).unwrap())
            .unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(rendered.contains("Load config"));
        assert!(rendered.contains("Invalid JSON format"));
    }
}
