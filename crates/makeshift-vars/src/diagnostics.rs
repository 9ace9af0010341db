//! Recoverable anomalies.
//!
//! The Makefile subset is read permissively: a line that isn't an assignment, a reference that
//! can't be interpreted or a value stuck in a reference cycle never aborts a run. Each of those
//! events becomes a [`Diagnostic`] so callers can report them, and is logged as it happens.

use std::fmt;

use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Text that is neither an assignment nor a known directive
    UnrecognizedLine,
    UnsupportedDirective,
    UnterminatedContinuation,
    UnterminatedDefine,
    /// `$(...)` or `${...}` that doesn't name a variable, or a stray `$`
    MalformedReference,
    /// A reference to a name defined neither locally nor in the environment
    UndefinedReference,
    /// A value that could not be interpolated because of a reference cycle
    ForcedEmpty,
    /// An object file with no matching source file
    UnresolvedExtension,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnrecognizedLine
            | DiagnosticKind::UnsupportedDirective
            | DiagnosticKind::UndefinedReference => Severity::Note,
            DiagnosticKind::UnterminatedContinuation
            | DiagnosticKind::UnterminatedDefine
            | DiagnosticKind::MalformedReference
            | DiagnosticKind::ForcedEmpty => Severity::Warning,
            DiagnosticKind::UnresolvedExtension => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source the diagnostic refers to, usually a path
    pub origin: Option<String>,
    pub line_no: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.origin, self.line_no) {
            (Some(origin), Some(line_no)) => write!(f, "{origin}:{line_no}: ")?,
            (Some(origin), None) => write!(f, "{origin}: ")?,
            (None, Some(line_no)) => write!(f, "line {line_no}: ")?,
            (None, None) => {}
        }
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    origin: Option<String>,
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics pushed into the returned collector are attributed to `origin`.
    pub fn for_origin<S: Into<String>>(origin: S) -> Self {
        Diagnostics {
            origin: Some(origin.into()),
            items: vec![],
        }
    }

    pub fn push<M: Into<String>>(
        &mut self,
        kind: DiagnosticKind,
        line_no: Option<usize>,
        message: M,
    ) {
        let diagnostic = Diagnostic {
            kind,
            origin: self.origin.clone(),
            line_no,
            message: message.into(),
        };

        match diagnostic.severity() {
            Severity::Note => debug!("{diagnostic}"),
            Severity::Warning => warn!("{diagnostic}"),
            Severity::Error => error!("{diagnostic}"),
        }

        self.items.push(diagnostic);
    }

    /// Take over diagnostics from another collector without logging them again.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    pub fn has_severity(&self, severity: Severity) -> bool {
        self.items.iter().any(|d| d.severity() >= severity)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
