use ratatui::text::{Line, Span};

use super::{FieldWidget, WidgetProps, label_span, value_style};
use crate::domain::WidgetKind;

/// Single-line text input.
pub struct TextInput;

impl FieldWidget for TextInput {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Text
    }

    fn render(&self, props: &WidgetProps<'_>, focused: bool) -> Vec<Line<'static>> {
        let value = props.value.as_text();
        // keep an empty focused input visible
        let shown = if value.is_empty() { " " } else { value };
        vec![Line::from(vec![
            label_span(props.label, focused),
            Span::raw(" "),
            Span::styled(shown.to_string(), value_style(focused)),
        ])]
    }

    fn is_textual(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;
    use crate::widgets::line_text;

    #[test]
    fn renders_label_and_value_on_one_line() {
        let props = WidgetProps {
            label: "Email",
            name: "email",
            value: FieldValue::text("a@b.c"),
            options: &[],
        };
        let lines = TextInput.render(&props, false);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "Email: a@b.c");
        assert!(TextInput.is_textual());
    }
}
