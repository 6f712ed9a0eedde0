//! Plain-text diagnostic rendering (§10.1, §10.4).
//!
//! No color, no HTML — HTML rendering of diagnostics is an explicit
//! Non-goal. Each diagnostic prints its `Display` line followed by the
//! source line it concerns, wrapped to `max_width` columns.

use talus_diagnostics::Diagnostic;

/// Print `diagnostics` to stderr, one per line plus a wrapped source excerpt.
pub fn render_diagnostics(source: &str, diagnostics: &[Diagnostic], max_width: usize) {
    if diagnostics.is_empty() {
        return;
    }
    let lines: Vec<&str> = source.lines().collect();

    for diag in diagnostics {
        eprintln!("{diag}");
        let line_no = diag.source_range.start.line;
        if let Some(text) = line_no.checked_sub(1).and_then(|i| lines.get(i)) {
            eprintln!("    {}", wrap(text, max_width));
        }
    }
}

fn wrap(line: &str, max_width: usize) -> String {
    if line.chars().count() <= max_width {
        line.to_string()
    } else {
        let truncated: String = line.chars().take(max_width.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

/// Whether any diagnostic in `diagnostics` is at `Level::Error`.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.level == talus_diagnostics::Level::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use talus_diagnostics::{Details, SourceLocation, SourceRange};

    #[test]
    fn wrap_leaves_short_lines_untouched() {
        assert_eq!(wrap("short", 10), "short");
    }

    #[test]
    fn wrap_truncates_long_lines() {
        let wrapped = wrap(&"x".repeat(20), 10);
        assert_eq!(wrapped.chars().count(), 10);
        assert!(wrapped.ends_with('…'));
    }

    #[test]
    fn has_errors_detects_error_level() {
        let range = SourceRange::new(SourceLocation::new("t", 1, 1), SourceLocation::new("t", 1, 1));
        let warn = Diagnostic::warning(Details::NewlineExpected, range.clone());
        assert!(!has_errors(&[warn]));
        let err = Diagnostic::error(Details::NewlineExpected, range);
        assert!(has_errors(&[err]));
    }
}
