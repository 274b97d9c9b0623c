//! Validation result model.
//!
//! [`ValidationResult`] keeps its fields private so that `is_valid()` always
//! equals "no errors recorded": adding an error flips it to `false`, adding a
//! warning never touches it.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Position inside a configuration file.
///
/// `line` and `column` are 1-based; `0` means unknown. An unknown line hides
/// the column as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLocation {
    pub file_path: String,
    pub line: u32,
    pub column: u32
}

impl FileLocation {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            line: 0,
            column: 0
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

impl fmt::Display for FileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (0, _) => write!(f, "{}", self.file_path),
            (line, 0) => write!(f, "{}:{line}", self.file_path),
            (line, column) => write!(f, "{}:{line}:{column}", self.file_path)
        }
    }
}

/// A single finding about one field of a configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    field: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix_suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<FileLocation>
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            current_value: None,
            expected_value: None,
            fix_suggestion: None,
            location: None
        }
    }

    /// The error every validator reports for a missing document.
    pub fn nil_config(subject: &str) -> Self {
        Self::new("config", "configuration cannot be nil")
            .with_fix(format!("Provide a valid {subject} configuration"))
    }

    pub fn with_current(mut self, value: impl Into<Value>) -> Self {
        self.current_value = Some(value.into());
        self
    }

    pub fn with_expected(mut self, value: impl Into<Value>) -> Self {
        self.expected_value = Some(value.into());
        self
    }

    pub fn with_fix(mut self, suggestion: impl Into<String>) -> Self {
        self.fix_suggestion = Some(suggestion.into());
        self
    }

    pub fn with_location(mut self, location: FileLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn current_value(&self) -> Option<&Value> {
        self.current_value.as_ref()
    }

    pub fn expected_value(&self) -> Option<&Value> {
        self.expected_value.as_ref()
    }

    pub fn fix_suggestion(&self) -> Option<&str> {
        self.fix_suggestion.as_deref()
    }

    pub fn location(&self) -> Option<&FileLocation> {
        self.location.as_ref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "validation error: {}", self.message)
        } else {
            write!(
                f,
                "validation error in field '{}': {}",
                self.field, self.message
            )
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors and warnings collected while validating one configuration file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
    config_file: String
}

impl ValidationResult {
    pub fn new(config_file: impl Into<String>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            config_file: config_file.into()
        }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Append another result's findings, keeping this result's file name.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error);
        }
        self.warnings.extend(other.warnings);
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn format_errors(&self) -> String {
        format_findings(&self.errors)
    }

    pub fn format_warnings(&self) -> String {
        format_findings(&self.warnings)
    }

    /// One-line outcome, e.g. `kind.yaml: 2 error(s), 1 warning(s)`.
    pub fn summary(&self) -> String {
        if self.valid && self.warnings.is_empty() {
            return format!("{}: valid", self.config_file);
        }
        format!(
            "{}: {} error(s), {} warning(s)",
            self.config_file,
            self.errors.len(),
            self.warnings.len()
        )
    }
}

fn format_findings(findings: &[ValidationError]) -> String {
    let mut out = String::new();
    for finding in findings {
        out.push_str("- ");
        if let Some(location) = &finding.location {
            out.push_str(&format!("{location}: "));
        }
        out.push_str(&finding.to_string());
        out.push('\n');
        if let Some(fix) = &finding.fix_suggestion {
            out.push_str(&format!("  fix: {fix}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_result_is_valid() {
        let result = ValidationResult::new("kind.yaml");
        assert!(result.is_valid());
        assert!(!result.has_errors());
        assert!(!result.has_warnings());
        assert_eq!(result.config_file(), "kind.yaml");
        assert_eq!(result.summary(), "kind.yaml: valid");
    }

    #[test]
    fn test_error_flips_validity_and_warning_does_not() {
        let mut result = ValidationResult::new("ksail.yaml");
        result.add_warning(ValidationError::new("spec.sourceDirectory", "looks odd"));
        assert!(result.is_valid());

        result.add_error(ValidationError::new("spec.distribution", "is required"));
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(result.summary(), "ksail.yaml: 1 error(s), 1 warning(s)");
    }

    #[test]
    fn test_merge_keeps_invariant() {
        let mut result = ValidationResult::new("ksail.yaml");
        let mut other = ValidationResult::new("kind.yaml");
        other.add_error(ValidationError::new("nodes", "missing"));
        other.add_warning(ValidationError::new("name", "blank"));

        result.merge(other);
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(result.config_file(), "ksail.yaml");
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("spec.distribution", "distribution is required");
        assert_eq!(
            err.to_string(),
            "validation error in field 'spec.distribution': distribution is required"
        );

        let err = ValidationError::new("", "something broke");
        assert_eq!(err.to_string(), "validation error: something broke");
    }

    #[test]
    fn test_nil_config_error() {
        let err = ValidationError::nil_config("Kind");
        assert_eq!(err.field(), "config");
        assert_eq!(err.message(), "configuration cannot be nil");
        assert!(!err.fix_suggestion().unwrap().is_empty());
    }

    #[test]
    fn test_file_location_display() {
        assert_eq!(FileLocation::new("kind.yaml").to_string(), "kind.yaml");
        assert_eq!(FileLocation::new("kind.yaml").at(3, 0).to_string(), "kind.yaml:3");
        assert_eq!(
            FileLocation::new("kind.yaml").at(3, 7).to_string(),
            "kind.yaml:3:7"
        );
        assert_eq!(FileLocation::new("kind.yaml").at(0, 7).to_string(), "kind.yaml");
    }

    #[test]
    fn test_format_errors_includes_location_and_fix() {
        let mut result = ValidationResult::new("ksail.yaml");
        result.add_error(
            ValidationError::new("spec.connection.context", "mismatch")
                .with_current("kind-other")
                .with_expected("kind-kind")
                .with_fix("Set spec.connection.context to 'kind-kind'")
                .with_location(FileLocation::new("ksail.yaml").at(9, 5)),
        );

        let formatted = result.format_errors();
        assert!(formatted.contains("ksail.yaml:9:5: validation error in field"));
        assert!(formatted.contains("fix: Set spec.connection.context to 'kind-kind'"));
        assert_eq!(result.errors()[0].current_value(), Some(&json!("kind-other")));
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut result = ValidationResult::new("eks.yaml");
        result.add_error(ValidationError::new("metadata.region", "required").with_fix("set it"));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["valid"], json!(false));
        assert_eq!(value["configFile"], json!("eks.yaml"));
        assert_eq!(value["errors"][0]["fixSuggestion"], json!("set it"));
        assert!(value["errors"][0].get("currentValue").is_none());
    }
}
