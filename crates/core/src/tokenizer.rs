//! Raises a raw token stream into the logical token stream: strips
//! whitespace/comments, tracks bracket depth, and emits synthetic
//! `Indent`/`Outdent`/`BadOutdent` tokens from the source's indentation.

use crate::token::{Kind, Token};
use talus_diagnostics::SourceLocation;

/// Tokenizes `source` in module mode: `min_depth` is 0, so indentation
/// tracking is active from the start.
pub fn tokenize<'a>(source: &'a str, filename: impl Into<String>) -> Tokenizer<'a> {
    Tokenizer::new(source, filename, 0)
}

/// Tokenizes `source` in single-expression mode: `min_depth` is 1, so
/// indentation tokens are never produced (as if the whole input were
/// already inside one bracket).
pub fn tokenize_expr<'a>(source: &'a str, filename: impl Into<String>) -> Tokenizer<'a> {
    Tokenizer::new(source, filename, 1)
}

/// Raises a raw token stream (from [`crate::scanner::Scanner`]) into the
/// logical stream described in §4.2.
pub struct Tokenizer<'a> {
    raw: crate::scanner::Scanner<'a>,
    min_depth: usize,
    bracket_depth: usize,
    indent_stack: Vec<usize>,
    start_of_line: bool,
    pending: std::collections::VecDeque<Token>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str, filename: impl Into<String>, min_depth: usize) -> Self {
        Self {
            raw: crate::scanner::Scanner::new(source, filename),
            min_depth,
            bracket_depth: min_depth,
            indent_stack: vec![0],
            start_of_line: min_depth == 0,
            pending: std::collections::VecDeque::new(),
            done: false,
        }
    }

    fn fabricated(kind: Kind, n: usize, loc: SourceLocation) -> Token {
        Token::new(kind, vec![b' '; n], loc)
    }

    fn outdent_to(&mut self, n: usize, at_loc: &SourceLocation) {
        while *self.indent_stack.last().unwrap() > n {
            self.indent_stack.pop();
            self.pending.push_back(Self::fabricated(
                Kind::Outdent,
                0,
                SourceLocation::new(at_loc.filename.clone(), at_loc.line, 1),
            ));
        }
        let top = *self.indent_stack.last().unwrap();
        if top != n {
            let delta = (n as isize - top as isize).unsigned_abs();
            self.pending.push_back(Self::fabricated(
                Kind::BadOutdent,
                delta,
                SourceLocation::new(at_loc.filename.clone(), at_loc.line, 1),
            ));
            self.indent_stack.push(n);
        }
    }

    fn process_raw(&mut self, tok: Token) {
        match tok.kind {
            Kind::OpenBracket => {
                self.bracket_depth += 1;
                self.pending.push_back(tok);
            }
            Kind::CloseBracket => {
                if self.bracket_depth == self.min_depth {
                    self.pending.push_back(Token::new(
                        Kind::MismatchBracket,
                        tok.bytes,
                        tok.location,
                    ));
                } else {
                    self.bracket_depth -= 1;
                    self.pending.push_back(tok);
                }
            }
            Kind::Comment => {
                // dropped unconditionally
            }
            Kind::Space => {
                // never emitted: the leading-of-line case is handled by
                // lookahead in `next` before `process_raw` ever sees it, and
                // mid-line or in-bracket whitespace carries no information.
            }
            Kind::NewLine if self.bracket_depth > self.min_depth => {
                // dropped — indentation suspended inside brackets
            }
            Kind::NewLine if self.bracket_depth == self.min_depth => {
                self.pending.push_back(tok);
                self.start_of_line = true;
            }
            Kind::Eof => {
                if self.bracket_depth == self.min_depth {
                    self.outdent_to(0, &tok.location);
                }
                self.pending.push_back(tok);
                self.done = true;
            }
            _ => {
                self.pending.push_back(tok);
                self.start_of_line = false;
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Some(tok);
            }
            if self.done {
                return None;
            }

            if self.start_of_line && self.bracket_depth == self.min_depth {
                // Peek the leading Space (if any) plus what follows, so a
                // blank line emits nothing and a real line emits the right
                // Indent/Outdent/BadOutdent sequence before its first token.
                let first = self.raw.next().expect("raw stream always yields EOF");
                match first.kind {
                    Kind::Space => {
                        let loc = first.location.clone();
                        let n = first.bytes.len();
                        let second = self.raw.next().expect("raw stream always yields EOF");
                        if second.kind == Kind::NewLine {
                            self.process_raw(second);
                        } else {
                            self.handle_indent_change(n, loc);
                            self.process_raw(second);
                        }
                    }
                    Kind::NewLine => {
                        self.process_raw(first);
                    }
                    _ => {
                        let loc = first.location.clone();
                        self.handle_indent_change(0, loc);
                        self.process_raw(first);
                    }
                }
            } else {
                let raw = self.raw.next().expect("raw stream always yields EOF");
                self.process_raw(raw);
            }
        }
    }
}

impl<'a> Tokenizer<'a> {
    fn handle_indent_change(&mut self, n: usize, at_loc: SourceLocation) {
        let top = *self.indent_stack.last().unwrap();
        if n > top {
            self.indent_stack.push(n);
            self.pending.push_back(Self::fabricated(
                Kind::Indent,
                n,
                SourceLocation::new(at_loc.filename.clone(), at_loc.line, 1),
            ));
        } else if n < top {
            self.outdent_to(n, &at_loc);
        }
        self.start_of_line = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Kind> {
        tokenize(src, "t").map(|t| t.kind).collect()
    }

    #[test]
    fn pass_statement_has_no_indentation_tokens() {
        assert_eq!(kinds("pass\n"), vec![Kind::Ident, Kind::NewLine, Kind::Eof]);
    }

    #[test]
    fn bracket_mismatch_seed() {
        assert_eq!(
            kinds("())\n"),
            vec![
                Kind::OpenBracket,
                Kind::CloseBracket,
                Kind::MismatchBracket,
                Kind::NewLine,
                Kind::Eof
            ]
        );
    }

    #[test]
    fn indent_round_trip_seed() {
        let toks: Vec<Token> = tokenize("foo:\n    bar\n", "t").collect();
        let kinds: Vec<Kind> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                Kind::Ident,
                Kind::Punct,
                Kind::NewLine,
                Kind::Indent,
                Kind::Ident,
                Kind::NewLine,
                Kind::Outdent,
                Kind::Eof,
            ]
        );
        let indent = &toks[3];
        assert_eq!(indent.bytes, vec![b' '; 4]);
        let outdent = &toks[6];
        assert_eq!(outdent.bytes.len(), 0);
    }

    #[test]
    fn inconsistent_outdent_seed() {
        let toks: Vec<Token> = tokenize("foo:\n    bar\n   baz\n", "t").collect();
        let kinds: Vec<Kind> = toks.iter().map(|t| t.kind).collect();
        // ..., NewLine(after bar), Outdent, BadOutdent, Ident(baz), ...
        let outdent_pos = kinds.iter().position(|k| *k == Kind::Outdent).unwrap();
        assert_eq!(kinds[outdent_pos + 1], Kind::BadOutdent);
        let bad = &toks[outdent_pos + 1];
        assert_eq!(bad.bytes.len(), 1); // |3 - 4| == 1
    }

    #[test]
    fn blank_line_emits_no_indentation_event() {
        let toks: Vec<Token> = tokenize("foo:\n\n    bar\n", "t").collect();
        let kinds: Vec<Kind> = toks.iter().map(|t| t.kind).collect();
        // two NewLines back to back (blank line), then Indent.
        assert_eq!(
            kinds,
            vec![
                Kind::Ident,
                Kind::Punct,
                Kind::NewLine,
                Kind::NewLine,
                Kind::Indent,
                Kind::Ident,
                Kind::NewLine,
                Kind::Outdent,
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(kinds("pass # hi\n"), vec![Kind::Ident, Kind::NewLine, Kind::Eof]);
    }

    #[test]
    fn indentation_suspended_inside_brackets() {
        let toks: Vec<Token> = tokenize("foo(\n    bar\n)\n", "t").collect();
        let kinds: Vec<Kind> = toks.iter().map(|t| t.kind).collect();
        assert!(!kinds.contains(&Kind::Indent));
        assert!(!kinds.contains(&Kind::Outdent));
    }

    #[test]
    fn expr_mode_suppresses_indentation_entirely() {
        let toks: Vec<Token> = tokenize_expr("1 +\n  2\n", "t").collect();
        let kinds: Vec<Kind> = toks.iter().map(|t| t.kind).collect();
        assert!(!kinds.contains(&Kind::Indent));
        assert!(!kinds.contains(&Kind::Outdent));
    }

    #[test]
    fn every_indent_matched_by_outdent_before_eof() {
        let toks: Vec<Token> = tokenize("a:\n  b:\n    c\n", "t").collect();
        let mut depth = 0i32;
        for t in &toks {
            match t.kind {
                Kind::Indent => depth += 1,
                Kind::Outdent => depth -= 1,
                Kind::Eof => assert_eq!(depth, 0, "unbalanced indent/outdent at EOF"),
                _ => {}
            }
            assert!(depth >= 0, "outdent outnumbered indent at some prefix");
        }
    }

    #[test]
    fn ends_with_newline_outdent_eof() {
        let toks: Vec<Token> = tokenize("a:\n  b\n", "t").collect();
        let tail: Vec<Kind> = toks.iter().rev().take(3).rev().map(|t| t.kind).collect();
        assert_eq!(tail, vec![Kind::NewLine, Kind::Outdent, Kind::Eof]);
    }
}
