//! Source positions and diagnostics for the Talus compiler front end.
//!
//! Provides [`SourceLocation`], [`SourceRange`], [`Level`], and [`Diagnostic`]
//! — the in-band error model threaded through the scanner, tokenizer, and
//! parser (see the crate-level docs of `talus_core` for how they're used).
//! [`LineIndex`] is a supporting utility that turns byte offsets into
//! `(line, column)` pairs without re-scanning the source buffer.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

// ── LineIndex ────────────────────────────────────────────────────────────

/// Maps byte offsets in a source string to 1-based line and column numbers.
///
/// Built in O(n) time; each lookup is O(log n) via binary search. Intentionally
/// dependency-free so it can be reused by a future LSP server or other tooling
/// without pulling in the rest of the parser.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line. `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build a `LineIndex` from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based `(line, column)` pair.
    ///
    /// If `offset` is past the end of the source, the last line is returned
    /// with the column clamped past the line length.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let col = offset.saturating_sub(self.line_starts[line]);
        (line + 1, col + 1)
    }

    /// Byte offset of the start of the given 1-based line.
    ///
    /// Returns `None` if `line` is out of bounds.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|i| self.line_starts.get(i)).copied()
    }

    /// Total number of lines (at least 1, even for empty input).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

// ── SourceLocation / SourceRange ──────────────────────────────────────────

/// A particular character in a source file.
///
/// Lines are 1-based. Columns are 1-based for ordinary characters; the
/// line-terminating newline itself is positioned at column 0 of the new line
/// (column -1 if it was preceded by a carriage return).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Name of the source file this location is within.
    pub filename: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number (0 or -1 for a line-terminating newline).
    pub column: isize,
}

impl SourceLocation {
    /// Construct a new source location.
    pub fn new(filename: impl Into<String>, line: usize, column: isize) -> Self {
        Self { filename: filename.into(), line, column }
    }
}

/// A range of characters in a source file, described by inclusive start/end
/// locations.
///
/// In principle `start` and `end` could name different files, but in
/// practice this never arises, since a `SourceRange` is always built from
/// locations produced by scanning a single buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    /// The first location covered by this range, inclusive.
    pub start: SourceLocation,
    /// The last location covered by this range, inclusive.
    pub end: SourceLocation,
}

impl SourceRange {
    /// Construct a range spanning `[start, end]` inclusive.
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }
}

// ── Level ──────────────────────────────────────────────────────────────

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// The input may produce unexpected results but compilation can proceed.
    Warning,
    /// The input is invalid.
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

// ── Details ────────────────────────────────────────────────────────────

/// The kind-specific payload of a [`Diagnostic`].
///
/// Each variant carries a statically-associated English message template
/// (see [`Details::message`]) plus whatever fields that template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[non_exhaustive]
pub enum Details {
    /// A `BadOutdent` token was encountered while parsing statements.
    InconsistentIndentation,
    /// A simple statement was not followed by a `NewLine` token.
    NewlineExpected,
    /// The `:`/`NewLine`/`Indent` triple required to open a block was not found.
    IndentedBlockExpected,
    /// A non-empty module docstring was not followed by a blank line.
    EmptyLineRequiredAfterDocstring,
    /// An open bracket (e.g. `(`) was never matched by a closing bracket.
    UnmatchedOpenBracket {
        /// The punctuation text of the unclosed open bracket (e.g. `"("`).
        bracket: String,
    },
    /// A recognised but unimplemented statement or expression form was parsed.
    NotYetImplemented {
        /// Name of the unimplemented feature (e.g. `"while statement"`).
        feature: String,
    },
}

impl Details {
    /// Render this detail's statically-associated message template.
    pub fn message(&self) -> String {
        match self {
            Details::InconsistentIndentation => "Inconsistent indentation".to_string(),
            Details::NewlineExpected => "End of line expected".to_string(),
            Details::IndentedBlockExpected => "Expected an indented block".to_string(),
            Details::EmptyLineRequiredAfterDocstring => {
                "Empty line required after module docstring".to_string()
            }
            Details::UnmatchedOpenBracket { bracket } => {
                format!("Unmatched open bracket {bracket:?}")
            }
            Details::NotYetImplemented { feature } => format!("{feature} is not yet implemented"),
        }
    }
}

// ── Diagnostic ─────────────────────────────────────────────────────────

/// A diagnostic value produced by the scanner, tokenizer, or parser.
///
/// Diagnostics never halt processing; they are embedded as values within the
/// tree or graph being built (see `talus_core`'s `DiagnosticStmt`/
/// `DiagnosticExpr`/`DiagnosticOp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of this diagnostic.
    pub level: Level,
    /// The kind-specific payload and message template.
    pub details: Details,
    /// The primary source range this diagnostic concerns.
    pub source_range: SourceRange,
    /// An optional secondary range providing additional context (e.g. the
    /// opening `Indent` that a mismatched `Outdent` fails to match).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_range: Option<SourceRange>,
}

impl Diagnostic {
    /// Construct a diagnostic with no context range.
    pub fn new(level: Level, details: Details, source_range: SourceRange) -> Self {
        Self { level, details, source_range, context_range: None }
    }

    /// Shorthand for an `Error`-level diagnostic.
    pub fn error(details: Details, source_range: SourceRange) -> Self {
        Self::new(Level::Error, details, source_range)
    }

    /// Shorthand for a `Warning`-level diagnostic.
    pub fn warning(details: Details, source_range: SourceRange) -> Self {
        Self::new(Level::Warning, details, source_range)
    }

    /// Attach a secondary context range (builder pattern).
    pub fn with_context_range(mut self, context_range: SourceRange) -> Self {
        self.context_range = Some(context_range);
        self
    }

    /// Render this diagnostic's message via its details' template.
    pub fn message(&self) -> String {
        self.details.message()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = &self.source_range.start;
        write!(f, "{}[{}:{}]: {}", self.level, start.line, start.column, self.message())
    }
}
