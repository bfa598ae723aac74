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
    domain::{FieldAttribute, FieldDefinition, FormBuilder, REQUIRED_RULE},
    tui::{EventResponse, Frame},
};

pub const CONTEXT: &str = "editor";

const LABEL_WIDTH: usize = 11;

/// One selectable row of the field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Attribute(usize, FieldAttribute),
    Required(usize),
    Remove(usize),
    Add,
}

impl Row {
    pub fn field(&self) -> Option<usize> {
        match self {
            Row::Attribute(i, _) | Row::Required(i) | Row::Remove(i) => Some(*i),
            Row::Add => None,
        }
    }
}

/// Rows for the current field list. `Options` only appears for choice widgets.
pub fn rows(fields: &[FieldDefinition]) -> Vec<Row> {
    let mut rows = Vec::with_capacity(fields.len() * 6 + 1);
    for (i, field) in fields.iter().enumerate() {
        rows.push(Row::Attribute(i, FieldAttribute::Type));
        rows.push(Row::Attribute(i, FieldAttribute::Label));
        rows.push(Row::Attribute(i, FieldAttribute::Name));
        if field.field_type.has_options() {
            rows.push(Row::Attribute(i, FieldAttribute::Options));
        }
        rows.push(Row::Required(i));
        rows.push(Row::Remove(i));
    }
    rows.push(Row::Add);
    rows
}

struct Editing {
    index: usize,
    attribute: FieldAttribute,
    edit: LineEdit,
}

/// Left panel: the list of field definitions.
///
/// Up/Down select a row, Left/Right cycle the type, Enter edits text
/// attributes or activates the row, Space toggles `required`, `d` removes
/// the field under the cursor.
#[derive(Default)]
pub struct FieldEditor {
    selected: usize,
    focused: bool,
    editing: Option<Editing>,
    scroll: u16,
}

impl FieldEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_row(&self, state: &FormBuilder) -> Row {
        let rows = rows(state.fields());
        rows[self.selected.min(rows.len() - 1)]
    }

    fn select(&mut self, row: Row, state: &FormBuilder) {
        if let Some(pos) = rows(state.fields()).iter().position(|r| *r == row) {
            self.selected = pos;
        }
    }

    fn move_selection(&mut self, delta: isize, state: &FormBuilder) {
        let len = rows(state.fields()).len() as isize;
        self.selected = (self.selected as isize + delta).clamp(0, len - 1) as usize;
    }

    fn activate(&mut self, row: Row, state: &FormBuilder, dir: i32) -> Option<Action> {
        match row {
            Row::Attribute(index, FieldAttribute::Type) => {
                let field = state.field(index)?;
                Some(Action::UpdateField {
                    index,
                    attribute: FieldAttribute::Type,
                    value: field.field_type.cycle(dir).as_str().to_string(),
                })
            }
            Row::Attribute(index, attribute) => {
                let field = state.field(index)?;
                self.editing = Some(Editing {
                    index,
                    attribute,
                    edit: LineEdit::new(field.raw(attribute)),
                });
                Some(Action::Update)
            }
            Row::Required(index) => {
                let field = state.field(index)?;
                Some(Action::ToggleValidation {
                    index,
                    rule: REQUIRED_RULE.to_string(),
                    value: !field.is_required(),
                })
            }
            Row::Remove(index) => Some(Action::RemoveField(index)),
            Row::Add => Some(Action::AddField),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        let editing = self.editing.as_mut()?;
        match editing.edit.handle_key(key) {
            EditOutcome::Commit => {
                let action = Action::UpdateField {
                    index: editing.index,
                    attribute: editing.attribute,
                    value: editing.edit.value().to_string(),
                };
                self.editing = None;
                Some(action)
            }
            EditOutcome::Cancel => {
                self.editing = None;
                Some(Action::Update)
            }
            EditOutcome::Changed | EditOutcome::Moved => Some(Action::Update),
        }
    }

    fn row_line(&self, row: Row, field: &FieldDefinition, selected: bool) -> Line<'static> {
        let (label, value) = match row {
            Row::Attribute(_, FieldAttribute::Type) => {
                ("Type", format!("◂ {} ▸", field.field_type))
            }
            Row::Attribute(_, FieldAttribute::Label) => ("Label", field.label.clone()),
            Row::Attribute(_, FieldAttribute::Name) => ("Name", field.name.clone()),
            Row::Attribute(_, FieldAttribute::Options) => {
                ("Options", field.raw(FieldAttribute::Options))
            }
            Row::Required(_) => (
                "Required",
                if field.is_required() { "[x]" } else { "[ ]" }.to_string(),
            ),
            Row::Remove(_) => {
                return Line::from(vec![
                    Span::raw("  "),
                    Span::styled("[ Remove field ]", row_style(selected, self.focused, Color::Red)),
                ]);
            }
            Row::Add => return Line::default(),
        };
        let value = match &self.editing {
            Some(e) if selected => e.edit.value().to_string(),
            _ => value,
        };
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{:<width$}", format!("{label}:"), width = LABEL_WIDTH),
                Style::default().fg(Color::White),
            ),
            Span::styled(value, row_style(selected, self.focused, Color::Cyan)),
        ])
    }
}

fn row_style(selected: bool, focused: bool, color: Color) -> Style {
    match (selected, focused) {
        (true, true) => Style::default().fg(Color::Black).bg(Color::White),
        (true, false) => Style::default().fg(color).add_modifier(Modifier::UNDERLINED),
        _ => Style::default().fg(color),
    }
}

impl Component for FieldEditor {
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
        let row = self.selected_row(state);
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1, state);
                Some(Action::Update)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1, state);
                Some(Action::Update)
            }
            KeyCode::Left if matches!(row, Row::Attribute(_, FieldAttribute::Type)) => {
                self.activate(row, state, -1)
            }
            KeyCode::Right if matches!(row, Row::Attribute(_, FieldAttribute::Type)) => {
                self.activate(row, state, 1)
            }
            KeyCode::Enter => self.activate(row, state, 1),
            KeyCode::Char(' ') if matches!(row, Row::Required(_)) => self.activate(row, state, 1),
            KeyCode::Char('d') | KeyCode::Delete => row.field().map(Action::RemoveField),
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
            Some(editing) => {
                editing.edit.paste(text);
                Ok(Some(EventResponse::Stop(Action::Update)))
            }
            None => Ok(None),
        }
    }

    fn update(&mut self, action: &Action, state: &FormBuilder) -> Result<Option<Action>> {
        match action {
            Action::AddField => {
                let index = state.len().saturating_sub(1);
                self.select(Row::Attribute(index, FieldAttribute::Type), state);
            }
            Action::LoadConfig | Action::RemoveField(_) => {
                self.editing = None;
                let len = rows(state.fields()).len();
                self.selected = self.selected.min(len - 1);
            }
            Action::UpdateField {
                index,
                attribute: FieldAttribute::Type,
                ..
            } => {
                // the options row may have appeared or vanished
                self.select(Row::Attribute(*index, FieldAttribute::Type), state);
            }
            _ => {}
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
            .title(format!(" Fields ({}) ", state.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = rows(state.fields());
        self.selected = self.selected.min(rows.len() - 1);

        let mut lines: Vec<Line> = Vec::new();
        let mut selected_line = 0usize;
        let mut current_field = None;
        for (pos, row) in rows.iter().enumerate() {
            let selected = pos == self.selected;
            if row.field() != current_field {
                current_field = row.field();
                if let Some(i) = current_field {
                    if i > 0 {
                        lines.push(Line::raw(""));
                    }
                    lines.push(Line::from(Span::styled(
                        format!("Field #{}", i + 1),
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                }
            }
            if selected {
                selected_line = lines.len();
            }
            match (row, row.field().and_then(|i| state.field(i))) {
                (Row::Add, _) => {
                    lines.push(Line::raw(""));
                    if selected {
                        selected_line = lines.len();
                    }
                    lines.push(Line::from(Span::styled(
                        "[ + Add field ]",
                        row_style(selected, self.focused, Color::Green),
                    )));
                }
                (row, Some(field)) => lines.push(self.row_line(*row, field, selected)),
                (_, None) => {}
            }
        }

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

        if let Some(editing) = &self.editing {
            let (_, col) = editing.edit.cursor_position();
            let x = inner.x + 2 + LABEL_WIDTH as u16 + col;
            let y = inner.y + (selected_line as u16).saturating_sub(self.scroll);
            if x < inner.right() && y < inner.bottom() {
                f.set_cursor_position(Position::new(x, y));
            }
        }
        Ok(())
    }
}
