use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use crate::{
    action::Action,
    components::Component,
    components::popup::{PopupComponent, draw_popup_frame},
    domain::FormBuilder,
    tui::{EventResponse, Frame},
    ui::keymap::map_label_to_action,
};

/// Overlay listing the active bindings; Enter runs the selected one.
/// - Up/Down to navigate
/// - Enter to emit the selected action
/// - Esc to close
pub struct KeymapOverlay {
    title: String,
    // (label, chords)
    entries: Vec<(String, Vec<String>)>,
    selected: usize,
}

impl KeymapOverlay {
    pub fn new(title: impl Into<String>, entries: Vec<(String, Vec<String>)>) -> Self {
        Self {
            title: title.into(),
            entries,
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }
}

impl Component for KeymapOverlay {
    fn keymap_context(&self) -> &'static str {
        "popup"
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &FormBuilder) -> Result<()> {
        // bottom third of the screen
        let overlay_h = (area.height / 3)
            .max(self.entries.len() as u16 + 2)
            .min(area.height);
        let overlay = Rect {
            x: area.x,
            y: area.y + area.height - overlay_h,
            width: area.width,
            height: overlay_h,
        };
        let inner = draw_popup_frame(f, overlay, &self.title);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        let mut left: Vec<Line> = Vec::new();
        let mut right: Vec<Line> = Vec::new();
        for (i, (label, chords)) in self.entries.iter().enumerate() {
            let lstyle = if i == self.selected {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::Cyan)
            };
            left.push(Line::from(Span::styled(label.clone(), lstyle)));
            right.push(Line::from(Span::styled(
                chords.join(" / "),
                Style::default().fg(Color::DarkGray),
            )));
        }

        f.render_widget(Paragraph::new(Text::from(left)), cols[0]);
        f.render_widget(Paragraph::new(Text::from(right)), cols[1]);
        Ok(())
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &FormBuilder,
    ) -> Result<Option<EventResponse<Action>>> {
        match key.code {
            KeyCode::Up => {
                if self.selected == 0 {
                    self.selected = self.entries.len().saturating_sub(1);
                } else {
                    self.selected -= 1;
                }
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % self.entries.len().max(1);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            KeyCode::Enter => {
                if let Some((label, _)) = self.entries.get(self.selected) {
                    if let Some(a) = map_label_to_action(label) {
                        return Ok(Some(EventResponse::Stop(a)));
                    }
                }
                Ok(Some(EventResponse::Stop(Action::ClosePopup)))
            }
            KeyCode::Esc | KeyCode::F(1) => Ok(self.cancel_action().map(EventResponse::Stop)),
            _ => Ok(None),
        }
    }
}

impl PopupComponent for KeymapOverlay {}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn overlay() -> KeymapOverlay {
        KeymapOverlay::new(
            "Keys",
            vec![
                ("AddField".into(), vec!["a".into()]),
                ("Quit".into(), vec!["ctrl+c".into(), "q".into()]),
            ],
        )
    }

    fn press(o: &mut KeymapOverlay, code: KeyCode) -> Option<EventResponse<Action>> {
        o.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), &FormBuilder::new())
            .unwrap()
    }

    #[test]
    fn enter_emits_selected_action() {
        let mut o = overlay();
        press(&mut o, KeyCode::Up);
        assert_eq!(press(&mut o, KeyCode::Enter), Some(EventResponse::Stop(Action::Quit)));
    }

    #[test]
    fn esc_closes() {
        let mut o = overlay();
        assert_eq!(
            press(&mut o, KeyCode::Esc),
            Some(EventResponse::Stop(Action::ClosePopup))
        );
    }
}
