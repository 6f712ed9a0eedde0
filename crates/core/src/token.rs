//! Token kinds shared by the scanner and tokenizer.

use talus_diagnostics::{SourceLocation, SourceRange};

/// Classification of a token.
///
/// Raw and logical tokens share the same kind set except for four
/// logical-only synthetic kinds (`Indent`, `Outdent`, `BadOutdent`,
/// `MismatchBracket`), which the scanner never produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// End of input. Exactly one is emitted, always last.
    Eof,
    /// A single line terminator (`\n` or `\r\n`).
    NewLine,
    /// A run of spaces/tabs (raw only — dropped by the tokenizer).
    Space,
    /// A `#`-to-end-of-line comment (raw only — dropped by the tokenizer).
    Comment,
    /// One of `( [ {`.
    OpenBracket,
    /// One of `) ] }`.
    CloseBracket,
    /// A run of non-alphanumeric, non-bracket characters.
    Punct,
    /// `[A-Za-z_][A-Za-z_0-9]*`. Keywords are not distinguished here.
    Ident,
    /// A decimal numeric literal, e.g. `1`, `3.14`.
    DecNumLit,
    /// A `0x`-prefixed numeric literal.
    HexNumLit,
    /// A `0b`-prefixed numeric literal.
    BinNumLit,
    /// A `0o`-prefixed numeric literal.
    OctNumLit,
    /// A `"`-delimited string literal, possibly unterminated.
    StringLit,
    /// Synthetic: indentation increased. Logical only.
    Indent,
    /// Synthetic: indentation decreased to a previously-seen level. Logical only.
    Outdent,
    /// Synthetic: indentation decreased to a level never seen before. Logical only.
    BadOutdent,
    /// Synthetic: a closing bracket with no corresponding open bracket. Logical only.
    MismatchBracket,
}

/// A single token: its classification, source bytes, and starting location.
///
/// For raw tokens, `bytes` is a sub-sequence of the source buffer. For
/// synthetic logical tokens (`Indent`, `Outdent`, `BadOutdent`), `bytes` is a
/// fabricated run of spaces whose length is semantically meaningful (the
/// indent delta), not a literal slice of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// This token's classification.
    pub kind: Kind,
    /// Source bytes (literal or fabricated — see struct docs).
    pub bytes: Vec<u8>,
    /// Location of the first byte of this token.
    pub location: SourceLocation,
}

impl Token {
    /// Construct a token.
    pub fn new(kind: Kind, bytes: Vec<u8>, location: SourceLocation) -> Self {
        Self { kind, bytes, location }
    }

    /// The token's text, assuming its bytes are valid UTF-8 (true for every
    /// kind this crate produces).
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.bytes).expect("token bytes are always valid UTF-8")
    }

    /// This token's source range: from `location` to `location` advanced by
    /// `len(bytes)` columns on the same line.
    pub fn source_range(&self) -> SourceRange {
        let end = SourceLocation::new(
            self.location.filename.clone(),
            self.location.line,
            self.location.column + self.bytes.len() as isize,
        );
        SourceRange::new(self.location.clone(), end)
    }
}
