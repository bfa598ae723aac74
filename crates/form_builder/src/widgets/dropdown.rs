use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use super::{FieldWidget, WidgetProps, label_span, value_style};
use crate::domain::{FieldValue, WidgetKind};

/// Select box cycling through the field's options with Left/Right.
pub struct Dropdown;

impl FieldWidget for Dropdown {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Dropdown
    }

    fn render(&self, props: &WidgetProps<'_>, focused: bool) -> Vec<Line<'static>> {
        let selected = props
            .selected_index()
            .and_then(|idx| props.options.get(idx));
        let value = match selected {
            Some(option) => Span::styled(format!("▾ {option}"), value_style(focused)),
            None => Span::styled(
                "▾ (none)".to_string(),
                if focused {
                    value_style(true)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ),
        };
        let mut spans = vec![label_span(props.label, focused), Span::raw(" "), value];
        if focused && props.options.len() > 1 {
            spans.push(Span::styled(
                format!("  {} options", props.options.len()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        vec![Line::from(spans)]
    }

    fn on_key(&self, props: &WidgetProps<'_>, key: KeyEvent) -> Option<FieldValue> {
        match key.code {
            KeyCode::Left => props.cycle_option(-1),
            KeyCode::Right | KeyCode::Char(' ') => props.cycle_option(1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::line_text;
    use crossterm::event::KeyModifiers;

    fn options() -> Vec<String> {
        vec!["red".into(), "green".into()]
    }

    #[test]
    fn shows_selected_option() {
        let options = options();
        let props = WidgetProps {
            label: "Color",
            name: "color",
            value: FieldValue::text("green"),
            options: &options,
        };
        assert_eq!(line_text(&Dropdown.render(&props, false)[0]), "Color: ▾ green");
    }

    #[test]
    fn value_outside_options_renders_as_none() {
        let options = options();
        let props = WidgetProps {
            label: "Color",
            name: "color",
            value: FieldValue::text("blue"),
            options: &options,
        };
        assert_eq!(line_text(&Dropdown.render(&props, false)[0]), "Color: ▾ (none)");
    }

    #[test]
    fn arrows_cycle_options() {
        let options = options();
        let props = WidgetProps {
            label: "Color",
            name: "color",
            value: FieldValue::text("red"),
            options: &options,
        };
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(Dropdown.on_key(&props, right), Some(FieldValue::text("green")));
        assert_eq!(Dropdown.on_key(&props, enter), None);
    }
}
