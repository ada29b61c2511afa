//! Issue types produced by a generation round.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it. Issues never abort a round; the summary decides the exit status.

use enum_dispatch::enum_dispatch;

use crate::core::element::Marker;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    DroppedMarker,
    WriteFailure,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::DroppedMarker => write!(f, "dropped-marker"),
            Rule::WriteFailure => write!(f, "write-failure"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A model file that could not be read or parsed. The file is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// A member marker whose enclosing class carries no content view.
///
/// No binding is generated for it. Severity depends on `strictMarkers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedMarkerIssue {
    pub marker: Marker,
    pub element: String,
    pub enclosing_class: String,
    pub severity: Severity,
}

impl DroppedMarkerIssue {
    pub fn rule() -> Rule {
        Rule::DroppedMarker
    }
}

/// A binding that could not be rendered or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailureIssue {
    /// Qualified name of the binding type.
    pub artifact: String,
    pub error: String,
}

impl WriteFailureIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::WriteFailure
    }
}

/// Unified issue enum for the reporter.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    DroppedMarker(DroppedMarkerIssue),
    WriteFailure(WriteFailureIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A model file.
    File { path: &'a str },
    /// A member of a class in the element model.
    Member { class: &'a str, member: &'a str },
    /// A generated artifact, by qualified name.
    Artifact { name: &'a str },
}

impl std::fmt::Display for ReportLocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportLocation::File { path } => write!(f, "{}", path),
            ReportLocation::Member { class, member } => write!(f, "{}#{}", class, member),
            ReportLocation::Artifact { name } => write!(f, "{}", name),
        }
    }
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for DroppedMarkerIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Member {
            class: &self.enclosing_class,
            member: &self.element,
        }
    }

    fn message(&self) -> String {
        format!(
            "{} marker ignored: {} has no content-view marker",
            self.marker, self.enclosing_class
        )
    }

    fn report_severity(&self) -> Severity {
        self.severity
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("add a contentView to the enclosing class or remove the marker")
    }
}

impl Report for WriteFailureIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Artifact {
            name: &self.artifact,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
