//! One-token lookahead and range-builder utility used by the parser.

use crate::token::Token;
use talus_diagnostics::SourceRange;

/// Wraps a token iterator to provide non-destructive one-token lookahead.
pub struct Peeker<I: Iterator<Item = Token>> {
    inner: I,
    peeked: Option<Token>,
    last_read: Option<Token>,
}

impl<I: Iterator<Item = Token>> Peeker<I> {
    /// Wrap a token producer.
    pub fn new(inner: I) -> Self {
        Self { inner, peeked: None, last_read: None }
    }

    /// Return the next token without consuming it. Idempotent across
    /// consecutive calls.
    pub fn peek(&mut self) -> &Token {
        if self.peeked.is_none() {
            self.peeked = Some(self.inner.next().expect("raw token stream ends with EOF, never None"));
        }
        self.peeked.as_ref().unwrap()
    }

    /// Return the next token and advance.
    pub fn read(&mut self) -> Token {
        let tok = self.peeked.take().unwrap_or_else(|| {
            self.inner.next().expect("raw token stream ends with EOF, never None")
        });
        self.last_read = Some(tok.clone());
        tok
    }

    /// Capture the location of the not-yet-read token and return a closure
    /// that, once invoked, yields a `SourceRange` from that captured start to
    /// the end of the most recently read token (or the start itself if
    /// nothing has been read since).
    ///
    /// Idiom: call this *before* parsing a construct, then call the returned
    /// closure after the last token of that construct has been consumed.
    pub fn range_builder(&mut self) -> impl FnOnce(&Self) -> SourceRange {
        let start = self.peek().location.clone();
        move |p: &Self| match &p.last_read {
            Some(last) => SourceRange::new(start.clone(), last.source_range().end),
            None => SourceRange::new(start.clone(), start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Kind;
    use talus_diagnostics::SourceLocation;

    fn tok(kind: Kind, text: &str, line: usize, col: isize) -> Token {
        Token::new(kind, text.as_bytes().to_vec(), SourceLocation::new("t", line, col))
    }

    #[test]
    fn peek_is_idempotent() {
        let toks = vec![tok(Kind::Ident, "a", 1, 1), tok(Kind::Eof, "", 1, 2)];
        let mut p = Peeker::new(toks.into_iter());
        assert_eq!(p.peek().kind, Kind::Ident);
        assert_eq!(p.peek().kind, Kind::Ident);
    }

    #[test]
    fn read_advances() {
        let toks = vec![tok(Kind::Ident, "a", 1, 1), tok(Kind::Eof, "", 1, 2)];
        let mut p = Peeker::new(toks.into_iter());
        assert_eq!(p.read().kind, Kind::Ident);
        assert_eq!(p.read().kind, Kind::Eof);
    }

    #[test]
    fn peek_then_read_returns_same_token() {
        let toks = vec![tok(Kind::Ident, "a", 1, 1), tok(Kind::Eof, "", 1, 2)];
        let mut p = Peeker::new(toks.into_iter());
        let peeked_kind = p.peek().kind;
        let read = p.read();
        assert_eq!(peeked_kind, read.kind);
    }

    #[test]
    fn range_builder_spans_captured_construct() {
        let toks = vec![
            tok(Kind::Ident, "foo", 1, 1),
            tok(Kind::Punct, ":", 1, 4),
            tok(Kind::Eof, "", 1, 5),
        ];
        let mut p = Peeker::new(toks.into_iter());
        let finish = p.range_builder();
        p.read(); // foo
        p.read(); // :
        let range = finish(&p);
        assert_eq!(range.start.column, 1);
        assert_eq!(range.end.column, 5); // ":" at col 4, 1 byte long -> end col 5
    }

    #[test]
    fn range_builder_with_nothing_read_is_zero_width() {
        let toks = vec![tok(Kind::Eof, "", 1, 1)];
        let mut p = Peeker::new(toks.into_iter());
        let finish = p.range_builder();
        let range = finish(&p);
        assert_eq!(range.start, range.end);
    }
}
