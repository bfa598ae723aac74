use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use super::{FieldWidget, WidgetProps, label_span, value_style};
use crate::domain::{FieldValue, WidgetKind};

/// Radio group: one line per option below the label.
pub struct RadioGroup;

impl FieldWidget for RadioGroup {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Radio
    }

    fn render(&self, props: &WidgetProps<'_>, focused: bool) -> Vec<Line<'static>> {
        let selected = props.selected_index();
        let mut lines = vec![Line::from(label_span(props.label, focused))];
        for (idx, option) in props.options.iter().enumerate() {
            let is_selected = selected == Some(idx);
            let mark = if is_selected { "(•)" } else { "( )" };
            let style = if is_selected {
                value_style(focused)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{mark} {option}"), style),
            ]));
        }
        lines
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

    #[test]
    fn marks_the_selected_option() {
        let options = vec!["small".to_string(), "large".to_string()];
        let props = WidgetProps {
            label: "Size",
            name: "size",
            value: FieldValue::text("large"),
            options: &options,
        };
        let texts: Vec<String> = RadioGroup.render(&props, false).iter().map(line_text).collect();
        assert_eq!(texts, vec!["Size:", "  ( ) small", "  (•) large"]);
    }

    #[test]
    fn left_moves_selection_backwards() {
        let options = vec!["small".to_string(), "large".to_string()];
        let props = WidgetProps {
            label: "Size",
            name: "size",
            value: FieldValue::text("small"),
            options: &options,
        };
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(RadioGroup.on_key(&props, left), Some(FieldValue::text("large")));
    }
}
