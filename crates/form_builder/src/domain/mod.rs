//! Form builder core: field definitions, preview values, validation and the
//! JSON config document. Free of terminal concerns so it can be driven by the
//! TUI, the headless `check` command and tests alike.

pub mod builder;
pub mod errors;
pub mod field;
pub mod values;

pub use builder::{FormBuilder, Submission, parse_fields};
pub use errors::BuilderError;
pub use field::{
    FieldAttribute, FieldDefinition, FieldType, REQUIRED_RULE, WidgetKind, parse_options,
};
pub use values::{FieldValue, FormValues};
