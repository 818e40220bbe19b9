//! Diagnostic codes, records, and the append-only sink
//!
//! Recoverable problems found while lowering are never reported through
//! `Result` or panics. Each one is appended to a [`DiagnosticSink`] as a
//! `(code, position, severity, args)` record and surfaced to the caller
//! once the whole tree has been processed.

use hn_span::Span;
use std::fmt;

// Re-export codespan types for convenience
pub use codespan_reporting;

/// How serious a diagnostic is
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    /// A note attached to other output
    Note,
    /// Suspicious but not invalid input
    Warning,
    /// Invalid input; compilation cannot fully succeed
    Error,
}

/// Every diagnostic the front-end bridge can produce
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum DiagnosticCode {
    /// A quoted identifier contained characters outside `[0-9a-zA-Z.]`
    IdentifierLiteralOnlySupportsAlphanumerics,
    /// A unicode escape named a surrogate or out-of-range code point
    InvalidUnicode,
    /// A decimal integer literal above `i64::MAX`
    IntegerTooLarge,
    /// A decimal integer literal below `i64::MIN`
    IntegerTooSmall,
    /// A hex integer literal above `i64::MAX`
    HexadecimalTooLarge,
    /// A hex integer literal below `i64::MIN`
    HexadecimalTooSmall,
    /// A syntax construct with no lowering rule where one was required
    UnsupportedConstruct,
}

impl DiagnosticCode {
    /// Stable machine-readable identifier, used by rendered output
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdentifierLiteralOnlySupportsAlphanumerics => {
                "identifier-literal-only-supports-alphanumerics"
            }
            Self::InvalidUnicode => "invalid-unicode",
            Self::IntegerTooLarge => "integer-too-large",
            Self::IntegerTooSmall => "integer-too-small",
            Self::HexadecimalTooLarge => "hexadecimal-too-large",
            Self::HexadecimalTooSmall => "hexadecimal-too-small",
            Self::UnsupportedConstruct => "unsupported-construct",
        }
    }

    /// Message template; `{}` placeholders are filled from the args
    pub const fn message_template(self) -> &'static str {
        match self {
            Self::IdentifierLiteralOnlySupportsAlphanumerics => {
                "identifier literals only support alphanumeric characters"
            }
            Self::InvalidUnicode => "invalid unicode escape `{}`",
            Self::IntegerTooLarge => "integer literal `{}` is too large",
            Self::IntegerTooSmall => "integer literal `{}` is too small",
            Self::HexadecimalTooLarge => "hexadecimal literal `{}` is too large",
            Self::HexadecimalTooSmall => "hexadecimal literal `{}` is too small",
            Self::UnsupportedConstruct => "construct `{}` is not supported here",
        }
    }

    /// Default severity of this code
    pub const fn severity(self) -> Severity {
        Severity::Error
    }
}

/// A single recorded diagnostic
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong
    pub code: DiagnosticCode,
    /// Where in the source it went wrong
    pub pos: Span,
    /// How serious it is
    pub severity: Severity,
    /// Code-specific message arguments, in template order
    pub args: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with the code's default severity
    pub fn new(code: DiagnosticCode, pos: Span, args: Vec<String>) -> Self {
        Self {
            code,
            pos,
            severity: code.severity(),
            args,
        }
    }

    /// The rendered message, with args substituted into the template
    pub fn message(&self) -> String {
        let mut message = String::new();
        let mut args = self.args.iter();
        let mut rest = self.code.message_template();
        while let Some(index) = rest.find("{}") {
            message.push_str(&rest[..index]);
            match args.next() {
                Some(arg) => message.push_str(arg),
                None => message.push_str("{}"),
            }
            rest = &rest[index + 2..];
        }
        message.push_str(rest);
        message
    }

    /// Converts to a codespan diagnostic for rustc-style output
    pub fn to_codespan_diagnostic(
        &self,
        file_id: usize,
    ) -> codespan_reporting::diagnostic::Diagnostic<usize> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        let diagnostic = match self.severity {
            Severity::Error => Diagnostic::error(),
            Severity::Warning => Diagnostic::warning(),
            Severity::Note => Diagnostic::note(),
        };
        diagnostic
            .with_code(self.code.as_str())
            .with_message(self.message())
            .with_labels(vec![Label::primary(file_id, self.pos.range())])
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.pos, self.message())
    }
}

/// Append-only collector for diagnostics of one compilation
#[derive(Clone, Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic with no message arguments
    pub fn error(&mut self, code: DiagnosticCode, pos: Span) {
        self.report(code, pos, Vec::new());
    }

    /// Records a diagnostic with a single message argument
    pub fn error_with_arg(&mut self, code: DiagnosticCode, pos: Span, arg: impl Into<String>) {
        self.report(code, pos, vec![arg.into()]);
    }

    /// Records a diagnostic with arbitrary message arguments
    pub fn report(&mut self, code: DiagnosticCode, pos: Span, args: Vec<String>) {
        self.diagnostics.push(Diagnostic::new(code, pos, args));
    }

    /// Everything recorded so far, in report order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any error-severity diagnostic was recorded
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether the sink is empty
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consumes the sink, yielding all diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
