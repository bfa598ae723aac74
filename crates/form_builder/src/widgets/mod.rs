//! Preview widgets and the field registry.
//!
//! Every widget is a stateless unit struct implementing [`FieldWidget`]: it turns
//! [`WidgetProps`] into terminal lines and turns key presses into new values.
//! The registry maps a field's type tag to its widget; unset and unknown tags
//! have no widget and are skipped by the preview.

use crossterm::event::KeyEvent;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::domain::{FieldType, FieldValue, WidgetKind};

pub mod checkbox;
pub mod dropdown;
pub mod radio;
pub mod text;
pub mod textarea;

pub use checkbox::Checkbox;
pub use dropdown::Dropdown;
pub use radio::RadioGroup;
pub use text::TextInput;
pub use textarea::TextArea;

/// Uniform input of every widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetProps<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub value: FieldValue,
    pub options: &'a [String],
}

impl WidgetProps<'_> {
    /// Position of the current value within `options`.
    pub fn selected_index(&self) -> Option<usize> {
        let current = self.value.as_text();
        if current.is_empty() {
            return None;
        }
        self.options.iter().position(|o| o == current)
    }

    /// Move the selection through `options`, wrapping at both ends.
    /// Without a selection, forward picks the first option and backward the last.
    pub fn cycle_option(&self, dir: i32) -> Option<FieldValue> {
        if self.options.is_empty() {
            return None;
        }
        let len = self.options.len() as i32;
        let next = match self.selected_index() {
            Some(idx) => (idx as i32 + dir).rem_euclid(len),
            None if dir < 0 => len - 1,
            None => 0,
        };
        Some(FieldValue::text(self.options[next as usize].clone()))
    }
}

/// Rendering contract shared by the five widget kinds.
pub trait FieldWidget: Send + Sync {
    fn kind(&self) -> WidgetKind;

    fn render(&self, props: &WidgetProps<'_>, focused: bool) -> Vec<Line<'static>>;

    /// Textual widgets are edited through the panel's line editor.
    fn is_textual(&self) -> bool {
        false
    }

    /// New value produced by `key`, if the widget reacts to it.
    fn on_key(&self, _props: &WidgetProps<'_>, _key: KeyEvent) -> Option<FieldValue> {
        None
    }

    /// Value shown while the form holds nothing for this field.
    fn default_value(&self) -> FieldValue {
        FieldValue::default()
    }
}

/// Widget registered for a known kind.
pub fn widget_for(kind: WidgetKind) -> &'static dyn FieldWidget {
    match kind {
        WidgetKind::Text => &TextInput,
        WidgetKind::Textarea => &TextArea,
        WidgetKind::Dropdown => &Dropdown,
        WidgetKind::Checkbox => &Checkbox,
        WidgetKind::Radio => &RadioGroup,
    }
}

/// Registry lookup for a field's type tag. Unset and unknown tags yield `None`.
pub fn renderer_for(field_type: &FieldType) -> Option<&'static dyn FieldWidget> {
    field_type.kind().map(widget_for)
}

pub(crate) fn label_span(label: &str, focused: bool) -> Span<'static> {
    Span::styled(
        format!("{label}:"),
        Style::default().fg(Color::White).add_modifier(if focused {
            Modifier::BOLD
        } else {
            Modifier::empty()
        }),
    )
}

pub(crate) fn value_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

#[cfg(test)]
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
