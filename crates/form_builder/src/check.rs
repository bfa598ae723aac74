//! Headless validation: load a config document, fill in values, submit.

use std::path::Path;

use color_eyre::{Result, eyre::WrapErr};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{BuilderError, FormBuilder, FormValues, Submission, parse_fields};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Builder(#[from] BuilderError),
    #[error("Values must be a JSON object of field names to strings or booleans")]
    Values(#[source] serde_json::Error),
}

impl CheckError {
    /// `title: message`, with the parser detail on a second line when there is one.
    pub fn report(&self) -> String {
        match self {
            CheckError::Builder(e) => format!("{}: {}", e.title(), e.report()),
            CheckError::Values(source) => format!("Load values: {self}\n{source}"),
        }
    }
}

/// Validate `values` (a JSON object) against the field list in `config`.
pub fn validate(config: &str, values: Option<&str>) -> Result<Submission, CheckError> {
    let mut builder = FormBuilder::with_fields(parse_fields(config)?);
    if let Some(values) = values {
        let values: FormValues = serde_json::from_str(values).map_err(CheckError::Values)?;
        for (name, value) in values.iter() {
            builder.set_value(name, value.clone());
        }
    }
    Ok(builder.submit()?)
}

/// Run `check` against files and print the outcome. Returns whether the form is valid.
pub fn run(config: &Path, values: Option<&Path>) -> Result<bool> {
    let config_text = std::fs::read_to_string(config)
        .wrap_err_with(|| format!("reading config {}", config.display()))?;
    let values_text = values
        .map(|path| {
            std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading values {}", path.display()))
        })
        .transpose()?;

    match validate(&config_text, values_text.as_deref()) {
        Ok(submission) => {
            info!("check passed for {}", config.display());
            println!("{}", submission.message());
            Ok(true)
        }
        Err(err) => {
            warn!("check failed for {}: {err}", config.display());
            eprintln!("{}", err.report());
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"[
        {"type": "text", "label": "Email", "name": "email", "validation": {"required": true}},
        {"type": "checkbox", "label": "Subscribe", "name": "subscribe"}
    ]"#;

    #[test]
    fn parse_failures_report_the_parser_detail() {
        let report = validate("[{\"label\": 5}]", None).unwrap_err().report();
        assert!(report.starts_with("Load config: Invalid JSON format\n"));
        assert!(report.contains("invalid type"));

        let report = validate(CONFIG, Some("[]")).unwrap_err().report();
        assert!(report.starts_with("Load values: Values must be a JSON object"));
        assert_eq!(report.lines().count(), 2);
    }

    #[test]
    fn missing_required_value_fails() {
        let err = validate(CONFIG, None).unwrap_err();
        assert_eq!(err.to_string(), "Email is required.");
    }

    #[test]
    fn complete_values_pass() {
        let submission =
            validate(CONFIG, Some(r#"{"email": "a@b.c", "subscribe": true}"#)).unwrap();
        assert_eq!(
            submission.values.get("subscribe"),
            Some(&FieldValue::Flag(true))
        );
    }

    #[test]
    fn malformed_documents_are_reported() {
        assert!(matches!(
            validate("{", None),
            Err(CheckError::Builder(BuilderError::ConfigParse(_)))
        ));
        assert!(matches!(
            validate(CONFIG, Some("[1, 2]")),
            Err(CheckError::Values(_))
        ));
    }

    #[test]
    fn run_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("form.json");
        let values = dir.path().join("values.json");
        std::fs::write(&config, CONFIG).unwrap();
        std::fs::write(&values, r#"{"email": "a@b.c"}"#).unwrap();
        assert!(run(&config, Some(&values)).unwrap());
        assert!(!run(&config, None).unwrap());
        assert!(run(&dir.path().join("missing.json"), None).is_err());
    }
}
