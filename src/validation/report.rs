//! Check report types for structured preflight results.
//!
//! This module provides structured results that can be shown to users or
//! emitted as JSON for scripts that drive the exporter.

use serde::Serialize;
use std::fmt;

/// The result of checking a drawing before export.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CheckReport {
    /// Number of text frames the exporter would write.
    pub exportable: usize,

    /// All issues found.
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: CheckIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if any issue carries `code`.
    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(
                f,
                "Check passed: {} text frame(s) ready to export",
                self.exportable
            );
        }

        writeln!(
            f,
            "Check completed with {} error(s) and {} warning(s), {} text frame(s) exportable:",
            self.error_count(),
            self.warning_count(),
            self.exportable
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single check issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct CheckIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    pub context: IssueContext,
}

impl CheckIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a check issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The export runs, but the output may not typeset as intended.
    Warning,
    /// The export would fail or produce wrong placement.
    Error,
}

/// A stable code identifying the type of check issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    // Document issues
    /// The text layer does not exist.
    MissingTextLayer,
    /// The text layer has no exportable frames.
    NoExportableText,
    /// The graphical bounds are inverted or not finite.
    InvalidGraphicalBounds,

    // Skipped frames
    /// Area or path text is not exported.
    SkippedNonPointText,
    /// Frames without contents are not exported.
    SkippedEmptyText,

    // Content issues
    /// Contents contain characters outside ASCII.
    NonAsciiText,
    /// Contents contain curly quotes, which TeX reads as garbage.
    TypographerQuotes,

    // Geometry and style issues
    /// The transform is not a pure rotation; the extracted angle is wrong.
    NonRotationTransform,
    /// The anchor has NaN or infinite coordinates.
    AnchorNotFinite,
    /// The frame has no font name.
    MissingFontName,
    /// The font size is zero, negative or not finite.
    InvalidFontSize,
}

/// Where a check issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    /// The drawing as a whole.
    Document,
    /// A layer.
    Layer { name: String },
    /// A text frame, by its index on the layer.
    Frame { layer: String, index: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Document => write!(f, "document"),
            IssueContext::Layer { name } => write!(f, "layer \"{}\"", name),
            IssueContext::Frame { layer, index } => {
                write!(f, "layer \"{}\" frame {}", layer, index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_clean() {
        let report = CheckReport::new();
        assert!(report.is_ok());
        assert!(report.is_clean());
        assert_eq!(
            report.to_string(),
            "Check passed: 0 text frame(s) ready to export\n"
        );
    }

    #[test]
    fn counts_by_severity() {
        let mut report = CheckReport::new();
        report.add(CheckIssue::warning(
            IssueCode::NonAsciiText,
            "contains 'é'",
            IssueContext::Frame {
                layer: "Text".into(),
                index: 2,
            },
        ));
        report.add(CheckIssue::error(
            IssueCode::MissingFontName,
            "no font",
            IssueContext::Frame {
                layer: "Text".into(),
                index: 3,
            },
        ));
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert!(!report.is_ok());
        assert!(report.has(IssueCode::MissingFontName));
        assert!(report
            .to_string()
            .contains("[ERROR] MissingFontName in layer \"Text\" frame 3: no font"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = CheckReport::new();
        report.exportable = 4;
        report.add(CheckIssue::warning(
            IssueCode::TypographerQuotes,
            "curly quote",
            IssueContext::Layer {
                name: "Text".into(),
            },
        ));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"exportable\":4"));
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"code\":\"typographer_quotes\""));
        assert!(json.contains("\"kind\":\"layer\""));
    }
}
