//! Diagnostics reported to the user of a derivation checker.
//!
//! A [`Diagnostic`] carries a severity, an optional source span, a message and
//! optional debugging details. Its one-line form reads
//! `file:line:column: [warning: ]message`, or starts with `unknown file: ` when
//! no span is known. [`render_report`] draws the same diagnostic against its
//! source text with `ariadne`.
use std::{fmt, ops::Range};

use ariadne::{Config, Label, Report, ReportKind, Source};
use log::{error, warn};
use strum::{Display, EnumIs, IntoStaticStr};

/// How serious a diagnostic is. Only errors make a check fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIs)]
pub enum Severity {
    #[strum(to_string = "error")]
    Error,
    #[strum(to_string = "warning")]
    Warning,
}

/// What produced a diagnostic, as a stable machine-readable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIs)]
#[strum(serialize_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Proof search exhausted its budget.
    SolveFailed,
    /// The step to solve does not form a judgment.
    SolveMalformedGoal,
    /// A step was justified by proof search.
    SolveUnreliable,
}

/// A region of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    /// File name, if the source comes from a file.
    pub file: Option<String>,
    /// Byte range in the source text.
    pub range: Range<usize>,
    /// 1-based line of `range.start`.
    pub line: usize,
    /// 1-based column of `range.start`.
    pub column: usize,
}

impl Span {
    /// Span of `range` in `source`, computing its line and column.
    ///
    /// A start inside a multi-byte character counts from that character.
    pub fn in_source(file: Option<String>, source: &str, range: Range<usize>) -> Self {
        let mut start = range.start.min(source.len());
        while !source.is_char_boundary(start) {
            start -= 1;
        }
        let before = &source[..start];
        let line = 1 + before.matches('\n').count();
        let column = 1 + before
            .rfind('\n')
            .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count());
        Self {
            file,
            range,
            line,
            column,
        }
    }

    fn file_name(&self) -> &str {
        self.file.as_deref().unwrap_or("<input>")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name(), self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Option<Span>,
    /// Extra details for whoever debugs the checker, not part of the message.
    pub debug_info: Option<String>,
}

impl Diagnostic {
    pub fn error<M: Into<String>>(kind: DiagnosticKind, message: M, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            span,
            debug_info: None,
        }
    }

    pub fn warning<M: Into<String>>(kind: DiagnosticKind, message: M, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, message, span)
        }
    }

    pub fn with_debug_info<D: Into<String>>(mut self, debug_info: D) -> Self {
        self.debug_info = Some(debug_info.into());
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// The message alone.
    pub fn short_message(&self) -> &str {
        &self.message
    }

    /// The message prefixed by its location and, for warnings, `warning: `.
    pub fn full_message(&self) -> String {
        let location = match &self.span {
            Some(span) => format!("{span}: "),
            None => "unknown file: ".to_string(),
        };
        let severity = if self.is_error() { "" } else { "warning: " };
        format!("{location}{severity}{}", self.short_message())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_message())
    }
}

/// Receives diagnostics as they are produced.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => error!("{diagnostic}"),
            Severity::Warning => warn!("{diagnostic}"),
        }
    }
}

/// Draw `diagnostic` against `source` without colors.
///
/// Diagnostics without a span fall back to their one-line form.
pub fn render_report(diagnostic: &Diagnostic, source: &str) -> std::io::Result<String> {
    let Some(span) = &diagnostic.span else {
        return Ok(format!("{diagnostic}\n"));
    };

    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };
    let file = span.file_name().to_string();
    let range = (file.clone(), span.range.clone());

    let mut report = Report::build(kind, range.clone())
        .with_config(Config::default().with_color(false))
        .with_code(<&'static str>::from(diagnostic.kind))
        .with_message(diagnostic.short_message())
        .with_label(Label::new(range).with_message(diagnostic.short_message()));
    if let Some(debug_info) = &diagnostic.debug_info {
        report = report.with_note(debug_info);
    }

    let mut buf = Vec::new();
    report
        .finish()
        .write((file, Source::from(source)), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
