use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    action::Action,
    components::{
        Component,
        line_edit::{EditOutcome, LineEdit},
    },
    domain::FormBuilder,
    tui::{EventResponse, Frame},
};

pub const CONTEXT: &str = "config";

/// The JSON config buffer.
///
/// `e`/Enter opens the editor (Alt+Enter for a newline, Enter to apply,
/// Esc to discard). A paste outside the editor replaces the whole buffer.
/// Save, load, export and import are bound through the `config` keymap context.
#[derive(Default)]
pub struct ConfigPanel {
    focused: bool,
    editing: Option<LineEdit>,
    scroll: u16,
}

impl ConfigPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for ConfigPanel {
    fn keymap_context(&self) -> &'static str {
        CONTEXT
    }

    fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.editing = None;
        }
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &FormBuilder,
    ) -> Result<Option<EventResponse<Action>>> {
        if let Some(edit) = self.editing.as_mut() {
            let action = match edit.handle_key(key) {
                EditOutcome::Commit => {
                    let text = edit.value().to_string();
                    self.editing = None;
                    Action::SetConfigBuffer(text)
                }
                EditOutcome::Cancel => {
                    self.editing = None;
                    Action::Update
                }
                EditOutcome::Changed | EditOutcome::Moved => Action::Update,
            };
            return Ok(Some(EventResponse::Stop(action)));
        }
        let action = match key.code {
            KeyCode::Char('e') | KeyCode::Enter => {
                self.editing = Some(LineEdit::new(state.config_buffer()).multiline(true));
                Some(Action::Update)
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Some(Action::Update)
            }
            KeyCode::Down => {
                let max = state.config_buffer().lines().count().saturating_sub(1) as u16;
                self.scroll = (self.scroll + 1).min(max);
                Some(Action::Update)
            }
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn handle_paste(
        &mut self,
        text: &str,
        _state: &FormBuilder,
    ) -> Result<Option<EventResponse<Action>>> {
        match self.editing.as_mut() {
            Some(edit) => {
                edit.paste(text);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            None => Ok(Some(EventResponse::Stop(Action::SetConfigBuffer(
                text.replace('\r', ""),
            )))),
        }
    }

    fn update(&mut self, action: &Action, _state: &FormBuilder) -> Result<Option<Action>> {
        if matches!(action, Action::SaveConfig | Action::TaskFinished(..)) {
            self.scroll = 0;
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &FormBuilder) -> Result<()> {
        let border = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let title = if self.editing.is_some() {
            " Config (editing) "
        } else {
            " Config "
        };
        let block = Block::default()
            .title(title)
            .title_bottom(Line::from(Span::styled(
                format!(" {} bytes ", state.config_buffer().len()),
                Style::default().fg(Color::DarkGray),
            )))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let text = match &self.editing {
            Some(edit) => edit.value(),
            None => state.config_buffer(),
        };
        let lines: Vec<Line> = if text.is_empty() && self.editing.is_none() {
            vec![Line::from(Span::styled(
                "Empty. Save the field list or paste a config here.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            text.split('\n').map(Line::raw).collect()
        };

        if let Some(edit) = &self.editing {
            let (row, col) = edit.cursor_position();
            let height = inner.height.max(1);
            if row < self.scroll {
                self.scroll = row;
            } else if row >= self.scroll + height {
                self.scroll = row + 1 - height;
            }
            let x = inner.x + col;
            let y = inner.y + row - self.scroll;
            if x < inner.right() && y < inner.bottom() {
                f.set_cursor_position(Position::new(x, y));
            }
        }

        f.render_widget(
            Paragraph::new(Text::from(lines))
                .style(Style::default().fg(Color::White))
                .scroll((self.scroll, 0)),
            inner,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn press(panel: &mut ConfigPanel, state: &FormBuilder, code: KeyCode) -> Option<Action> {
        match panel
            .handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), state)
            .unwrap()
        {
            Some(EventResponse::Stop(a)) | Some(EventResponse::Continue(a)) => Some(a),
            None => None,
        }
    }

    #[test]
    fn edit_then_enter_replaces_buffer() {
        let mut state = FormBuilder::new();
        state.set_config_buffer("[");
        let mut panel = ConfigPanel::new();
        press(&mut panel, &state, KeyCode::Char('e'));
        assert!(panel.is_editing());
        press(&mut panel, &state, KeyCode::Char(']'));
        assert_eq!(
            press(&mut panel, &state, KeyCode::Enter),
            Some(Action::SetConfigBuffer("[]".into()))
        );
        assert!(!panel.is_editing());
    }

    #[test]
    fn esc_discards_edits() {
        let state = FormBuilder::new();
        let mut panel = ConfigPanel::new();
        press(&mut panel, &state, KeyCode::Enter);
        press(&mut panel, &state, KeyCode::Char('x'));
        assert_eq!(press(&mut panel, &state, KeyCode::Esc), Some(Action::Update));
        assert!(!panel.is_editing());
    }

    #[test]
    fn paste_outside_editor_replaces_buffer() {
        let state = FormBuilder::new();
        let mut panel = ConfigPanel::new();
        let r = panel.handle_paste("[\r\n]", &state).unwrap();
        assert_eq!(
            r,
            Some(EventResponse::Stop(Action::SetConfigBuffer("[\n]".into())))
        );
    }

    #[test]
    fn keymap_keys_fall_through() {
        let state = FormBuilder::new();
        let mut panel = ConfigPanel::new();
        assert_eq!(press(&mut panel, &state, KeyCode::Char('s')), None);
    }
}
