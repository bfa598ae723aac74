//! Preview assembly: one entry per field that has a registered widget.

use crate::domain::FormBuilder;
use crate::widgets::{FieldWidget, WidgetProps, renderer_for};

/// A field of the preview form together with the widget that draws it.
pub struct PreviewItem<'a> {
    /// Position of the definition in the field list.
    pub index: usize,
    pub widget: &'static dyn FieldWidget,
    pub props: WidgetProps<'a>,
}

impl PreviewItem<'_> {
    pub fn name(&self) -> &str {
        self.props.name
    }
}

/// Build the preview from the current field list and values.
///
/// Fields whose type is unset or unknown are skipped.
pub fn assemble(builder: &FormBuilder) -> Vec<PreviewItem<'_>> {
    builder
        .fields()
        .iter()
        .enumerate()
        .filter_map(|(index, field)| {
            let widget = renderer_for(&field.field_type)?;
            let value = builder
                .values()
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| widget.default_value());
            Some(PreviewItem {
                index,
                widget,
                props: WidgetProps {
                    label: &field.label,
                    name: &field.name,
                    value,
                    options: &field.options,
                },
            })
        })
        .collect()
}
