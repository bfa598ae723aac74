use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{FieldWidget, WidgetProps, value_style};
use crate::domain::{FieldValue, WidgetKind};

/// Boolean toggle. The only widget that produces `FieldValue::Flag`.
pub struct Checkbox;

impl FieldWidget for Checkbox {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Checkbox
    }

    fn render(&self, props: &WidgetProps<'_>, focused: bool) -> Vec<Line<'static>> {
        let mark = if props.value.is_checked() { "[x]" } else { "[ ]" };
        vec![Line::from(vec![
            Span::styled(mark, value_style(focused)),
            Span::raw(" "),
            Span::raw(props.label.to_string()),
        ])]
    }

    fn on_key(&self, props: &WidgetProps<'_>, key: KeyEvent) -> Option<FieldValue> {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right => {
                Some(FieldValue::Flag(!props.value.is_checked()))
            }
            _ => None,
        }
    }

    fn default_value(&self) -> FieldValue {
        FieldValue::Flag(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::line_text;
    use crossterm::event::KeyModifiers;

    #[test]
    fn space_toggles_the_flag() {
        let mut props = WidgetProps {
            label: "Subscribe",
            name: "subscribe",
            value: Checkbox.default_value(),
            options: &[],
        };
        assert_eq!(line_text(&Checkbox.render(&props, false)[0]), "[ ] Subscribe");

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        props.value = Checkbox.on_key(&props, space).unwrap();
        assert_eq!(props.value, FieldValue::Flag(true));
        assert_eq!(line_text(&Checkbox.render(&props, false)[0]), "[x] Subscribe");
    }
}
