//! Byte-to-raw-token classifier.
//!
//! The scanner consumes the source buffer linearly and emits raw tokens: a
//! loss-less partition of the input where every byte lands in exactly one
//! token. It never validates content (operator legality, digit-vs-base,
//! keyword-ness) — that's left to later stages.

use crate::token::{Kind, Token};
use talus_diagnostics::SourceLocation;

/// Scans `source` into its raw token stream.
///
/// Per §5, this realises the scanner as a synchronous pull-based iterator
/// rather than a channel/thread producer: the only externally-visible
/// contract is strict FIFO with one token per completed lexical atom, which
/// an `Iterator` gives for free.
pub struct Scanner<'a> {
    source: &'a [u8],
    filename: String,
    pos: usize,
    line: usize,
    column: isize,
    done: bool,
    /// Set once we've emitted the final synthetic `NewLine`/`EOF` pair.
    emitted_final_newline: bool,
}

impl<'a> Scanner<'a> {
    /// Construct a scanner over `source`, attributing positions to `filename`.
    pub fn new(source: &'a str, filename: impl Into<String>) -> Self {
        Self {
            source: source.as_bytes(),
            filename: filename.into(),
            pos: 0,
            line: 1,
            column: 1,
            done: false,
            emitted_final_newline: false,
        }
    }

    fn loc(&self) -> SourceLocation {
        SourceLocation::new(self.filename.clone(), self.line, self.column)
    }

    fn peek_byte(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    /// Advance past `n` plain (non-newline) bytes, updating `column`.
    fn advance(&mut self, n: usize) {
        self.pos += n;
        self.column += n as isize;
    }

    fn make(&self, kind: Kind, start_pos: usize, start_loc: SourceLocation) -> Token {
        Token::new(kind, self.source[start_pos..self.pos].to_vec(), start_loc)
    }

    fn scan_newline(&mut self) -> Token {
        let start_loc = self.loc();
        let had_cr = self.peek_byte() == Some(b'\r');
        let bytes: Vec<u8> = if had_cr && self.peek_at(1) == Some(b'\n') {
            self.pos += 2;
            self.source[self.pos - 2..self.pos].to_vec()
        } else {
            self.pos += 1;
            self.source[self.pos - 1..self.pos].to_vec()
        };
        self.line += 1;
        self.column = if had_cr { -1 } else { 0 };
        let next_line_start_column = 1;
        let located = Token::new(Kind::NewLine, bytes, start_loc);
        self.column = next_line_start_column;
        located
    }

    fn scan_space(&mut self) -> Token {
        let start_pos = self.pos;
        let start_loc = self.loc();
        while matches!(self.peek_byte(), Some(b' ') | Some(b'\t')) {
            self.advance(1);
        }
        self.make(Kind::Space, start_pos, start_loc)
    }

    fn scan_comment(&mut self) -> Token {
        let start_pos = self.pos;
        let start_loc = self.loc();
        while !matches!(self.peek_byte(), None | Some(b'\n') | Some(b'\r')) {
            self.advance(1);
        }
        self.make(Kind::Comment, start_pos, start_loc)
    }

    fn scan_string(&mut self) -> Token {
        let start_pos = self.pos;
        let start_loc = self.loc();
        self.advance(1); // opening quote
        loop {
            match self.peek_byte() {
                None | Some(b'\n') | Some(b'\r') => break,
                Some(b'\\') => {
                    self.advance(1);
                    if !matches!(self.peek_byte(), None | Some(b'\n') | Some(b'\r')) {
                        self.advance(1);
                    }
                }
                Some(b'"') => {
                    self.advance(1);
                    break;
                }
                Some(_) => self.advance(1),
            }
        }
        self.make(Kind::StringLit, start_pos, start_loc)
    }

    fn scan_number(&mut self) -> Token {
        let start_pos = self.pos;
        let start_loc = self.loc();
        let kind = if self.peek_byte() == Some(b'0') {
            match self.peek_at(1) {
                Some(b'x') | Some(b'X') => {
                    self.advance(2);
                    Kind::HexNumLit
                }
                Some(b'b') | Some(b'B') => {
                    self.advance(2);
                    Kind::BinNumLit
                }
                Some(b'o') | Some(b'O') => {
                    self.advance(2);
                    Kind::OctNumLit
                }
                _ => Kind::DecNumLit,
            }
        } else {
            Kind::DecNumLit
        };
        loop {
            match self.peek_byte() {
                Some(b) if b.is_ascii_alphanumeric() => self.advance(1),
                Some(b'.') if kind == Kind::DecNumLit => self.advance(1),
                _ => break,
            }
        }
        self.make(kind, start_pos, start_loc)
    }

    fn scan_ident(&mut self) -> Token {
        let start_pos = self.pos;
        let start_loc = self.loc();
        self.advance(1);
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.advance(1);
        }
        self.make(Kind::Ident, start_pos, start_loc)
    }

    fn scan_punct(&mut self) -> Token {
        let start_pos = self.pos;
        let start_loc = self.loc();
        self.advance(1);
        while let Some(b) = self.peek_byte() {
            if is_punct_start(b) {
                self.advance(1);
            } else {
                break;
            }
        }
        self.make(Kind::Punct, start_pos, start_loc)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_bracket(b: u8) -> Option<Kind> {
    match b {
        b'(' | b'[' | b'{' => Some(Kind::OpenBracket),
        b')' | b']' | b'}' => Some(Kind::CloseBracket),
        _ => None,
    }
}

fn is_punct_start(b: u8) -> bool {
    !b.is_ascii_alphanumeric()
        && b != b'_'
        && b != b' '
        && b != b'\t'
        && b != b'\n'
        && b != b'\r'
        && b != b'"'
        && b != b'#'
        && is_bracket(b).is_none()
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let Some(b) = self.peek_byte() else {
            if !self.emitted_final_newline {
                self.emitted_final_newline = true;
                let needs_newline = self.pos > 0
                    && !matches!(self.source.last(), Some(b'\n'));
                if needs_newline {
                    let loc = self.loc();
                    self.line += 1;
                    self.column = 1;
                    return Some(Token::new(Kind::NewLine, Vec::new(), loc));
                }
            }
            self.done = true;
            return Some(Token::new(Kind::Eof, Vec::new(), self.loc()));
        };
        let tok = match b {
            b'\n' | b'\r' => self.scan_newline(),
            b' ' | b'\t' => self.scan_space(),
            b'#' => self.scan_comment(),
            b'"' => self.scan_string(),
            b'0'..=b'9' => self.scan_number(),
            b if is_ident_start(b) => self.scan_ident(),
            b if is_bracket(b).is_some() => {
                let start_loc = self.loc();
                let kind = is_bracket(b).unwrap();
                let start_pos = self.pos;
                self.advance(1);
                self.make(kind, start_pos, start_loc)
            }
            _ => self.scan_punct(),
        };
        Some(tok)
    }
}
