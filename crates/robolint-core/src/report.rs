//! Accumulated validation findings.

use serde::Serialize;

/// Findings for one validated document: errors block publication,
/// warnings are advisory only.
///
/// Every applicable rule runs regardless of earlier failures, so a report
/// always carries the full set of findings for its document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a blocking error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record an advisory warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// A report is valid when it holds no errors; warnings don't count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let mut report = ValidationReport::new();
        report.warn("advisory");
        assert!(report.is_valid());
        assert_eq!(report.warnings, vec!["advisory"]);
    }

    #[test]
    fn errors_invalidate() {
        let mut report = ValidationReport::new();
        report.error("broken");
        report.error("also broken");
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn serializes_to_json() {
        let mut report = ValidationReport::new();
        report.error("e");
        report.warn("w");
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"errors":["e"],"warnings":["w"]}"#);
    }
}
