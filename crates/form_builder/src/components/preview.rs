use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    action::Action,
    components::{
        Component,
        line_edit::{EditOutcome, LineEdit},
    },
    domain::{FieldValue, FormBuilder, WidgetKind},
    preview::assemble,
    tui::{EventResponse, Frame},
};

pub const CONTEXT: &str = "preview";

struct Editing {
    name: String,
    edit: LineEdit,
}

/// Right-hand preview of the form, followed by a submit button.
///
/// Text widgets are edited in place (Enter to start, Enter/Esc to finish);
/// values are stored on every keystroke. Other widgets react to keys directly.
#[derive(Default)]
pub struct PreviewPanel {
    selected: usize,
    focused: bool,
    editing: Option<Editing>,
    scroll: u16,
}

impl PreviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        let editing = self.editing.as_mut()?;
        match editing.edit.handle_key(key) {
            EditOutcome::Changed => Some(Action::SetValue {
                name: editing.name.clone(),
                value: FieldValue::text(editing.edit.value()),
            }),
            EditOutcome::Moved => Some(Action::Update),
            EditOutcome::Commit | EditOutcome::Cancel => {
                self.editing = None;
                Some(Action::Update)
            }
        }
    }
}

impl Component for PreviewPanel {
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
        if self.editing.is_some() {
            return Ok(self.handle_editing_key(key).map(EventResponse::Stop));
        }
        let items = assemble(state);
        // the submit button sits after the last item
        self.selected = self.selected.min(items.len());
        let action = match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Some(Action::Update)
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(items.len());
                Some(Action::Update)
            }
            // `None` is the submit button
            _ => match items.get(self.selected) {
                None if key.code == KeyCode::Enter => Some(Action::SubmitForm),
                None => None,
                Some(item) if item.widget.is_textual() && key.code == KeyCode::Enter => {
                    self.editing = Some(Editing {
                        name: item.name().to_string(),
                        edit: LineEdit::new(item.props.value.as_text())
                            .multiline(item.widget.kind() == WidgetKind::Textarea),
                    });
                    Some(Action::Update)
                }
                Some(item) => item
                    .widget
                    .on_key(&item.props, key)
                    .map(|value| Action::SetValue {
                        name: item.name().to_string(),
                        value,
                    }),
            },
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn handle_paste(
        &mut self,
        text: &str,
        _state: &FormBuilder,
    ) -> Result<Option<EventResponse<Action>>> {
        match self.editing.as_mut() {
            Some(editing) => {
                editing.edit.paste(text);
                Ok(Some(EventResponse::Stop(Action::SetValue {
                    name: editing.name.clone(),
                    value: FieldValue::text(editing.edit.value()),
                })))
            }
            None => Ok(None),
        }
    }

    fn update(&mut self, action: &Action, _state: &FormBuilder) -> Result<Option<Action>> {
        if matches!(
            action,
            Action::RemoveField(_) | Action::UpdateField { .. } | Action::LoadConfig
        ) {
            self.editing = None;
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &FormBuilder) -> Result<()> {
        let border = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title(" Preview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let items = assemble(state);
        self.selected = self.selected.min(items.len());

        let mut lines: Vec<Line> = Vec::new();
        let mut selected_line = 0usize;
        let mut cursor = None;
        if items.is_empty() {
            lines.push(Line::from(Span::styled(
                "No fields to preview. Pick a type in the field list.",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::raw(""));
        }
        for (pos, item) in items.iter().enumerate() {
            let selected = self.focused && pos == self.selected;
            if pos == self.selected {
                selected_line = lines.len();
            }
            let mut props = item.props.clone();
            if let Some(editing) = self.editing.as_ref().filter(|_| pos == self.selected) {
                props.value = FieldValue::text(editing.edit.value());
                let (row, col) = editing.edit.cursor_position();
                let (dy, dx) = if item.widget.kind() == WidgetKind::Textarea {
                    (1 + row, 2 + col)
                } else {
                    (0, props.label.chars().count() as u16 + 2 + col)
                };
                cursor = Some((lines.len() as u16 + dy, dx));
            }
            lines.extend(item.widget.render(&props, selected));
            lines.push(Line::raw(""));
        }
        if self.selected == items.len() {
            selected_line = lines.len();
        }
        let submit_style = if self.focused && self.selected == items.len() {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled("[ Submit ]", submit_style)));

        let height = inner.height as usize;
        if height > 0 {
            let top = self.scroll as usize;
            if selected_line < top {
                self.scroll = selected_line as u16;
            } else if selected_line >= top + height {
                self.scroll = (selected_line + 1 - height) as u16;
            }
        }
        f.render_widget(
            Paragraph::new(Text::from(lines)).scroll((self.scroll, 0)),
            inner,
        );

        if let Some((line, col)) = cursor {
            let y = inner.y + line.saturating_sub(self.scroll);
            let x = inner.x + col;
            if line >= self.scroll && x < inner.right() && y < inner.bottom() {
                f.set_cursor_position(Position::new(x, y));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldAttribute;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn press(panel: &mut PreviewPanel, state: &FormBuilder, code: KeyCode) -> Option<Action> {
        match panel
            .handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), state)
            .unwrap()
        {
            Some(EventResponse::Stop(a)) | Some(EventResponse::Continue(a)) => Some(a),
            None => None,
        }
    }

    fn builder(fields: &[(&str, &str, &str)]) -> FormBuilder {
        let mut b = FormBuilder::new();
        for (kind, name, options) in fields {
            let i = b.add_field();
            b.update_field(i, FieldAttribute::Type, kind).unwrap();
            b.update_field(i, FieldAttribute::Label, name).unwrap();
            b.update_field(i, FieldAttribute::Name, name).unwrap();
            if !options.is_empty() {
                b.update_field(i, FieldAttribute::Options, options).unwrap();
            }
        }
        b
    }

    #[test]
    fn typing_sets_value_on_every_keystroke() {
        let state = builder(&[("text", "email", "")]);
        let mut panel = PreviewPanel::new();
        assert_eq!(press(&mut panel, &state, KeyCode::Enter), Some(Action::Update));
        assert!(panel.is_editing());
        assert_eq!(
            press(&mut panel, &state, KeyCode::Char('x')),
            Some(Action::SetValue {
                name: "email".into(),
                value: FieldValue::text("x")
            })
        );
        press(&mut panel, &state, KeyCode::Esc);
        assert!(!panel.is_editing());
    }

    #[test]
    fn dropdown_cycles_options() {
        let state = builder(&[("dropdown", "color", "red,green")]);
        let mut panel = PreviewPanel::new();
        assert_eq!(
            press(&mut panel, &state, KeyCode::Right),
            Some(Action::SetValue {
                name: "color".into(),
                value: FieldValue::text("red")
            })
        );
    }

    #[test]
    fn enter_on_submit_row_submits() {
        let state = builder(&[("checkbox", "tos", "")]);
        let mut panel = PreviewPanel::new();
        press(&mut panel, &state, KeyCode::Down);
        assert_eq!(press(&mut panel, &state, KeyCode::Enter), Some(Action::SubmitForm));
        // the cursor cannot move past the submit button
        press(&mut panel, &state, KeyCode::Down);
        assert_eq!(press(&mut panel, &state, KeyCode::Enter), Some(Action::SubmitForm));
    }

    #[test]
    fn empty_preview_only_has_submit() {
        let state = FormBuilder::new();
        let mut panel = PreviewPanel::new();
        assert_eq!(press(&mut panel, &state, KeyCode::Enter), Some(Action::SubmitForm));
        assert_eq!(press(&mut panel, &state, KeyCode::Char('q')), None);
    }
}
