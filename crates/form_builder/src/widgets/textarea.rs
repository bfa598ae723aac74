use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use super::{FieldWidget, WidgetProps, label_span, value_style};
use crate::domain::WidgetKind;

/// Multi-line text area; the label sits above a gutter of value lines.
pub struct TextArea;

impl FieldWidget for TextArea {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Textarea
    }

    fn render(&self, props: &WidgetProps<'_>, focused: bool) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(label_span(props.label, focused))];
        let value = props.value.as_text();
        let gutter = Span::styled("│ ", Style::default().fg(Color::DarkGray));
        if value.is_empty() {
            lines.push(Line::from(vec![
                gutter,
                Span::styled(" ", value_style(focused)),
            ]));
            return lines;
        }
        for l in value.split('\n') {
            lines.push(Line::from(vec![
                gutter.clone(),
                Span::styled(l.to_string(), value_style(focused)),
            ]));
        }
        lines
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
    fn one_gutter_line_per_value_line() {
        let props = WidgetProps {
            label: "Bio",
            name: "bio",
            value: FieldValue::text("first\nsecond"),
            options: &[],
        };
        let lines = TextArea.render(&props, true);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["Bio:", "│ first", "│ second"]);
    }

    #[test]
    fn empty_value_still_draws_the_box() {
        let props = WidgetProps {
            label: "Bio",
            name: "bio",
            value: FieldValue::default(),
            options: &[],
        };
        assert_eq!(TextArea.render(&props, false).len(), 2);
    }
}
