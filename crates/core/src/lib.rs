//! Scanner, tokenizer, parser, AST, and SSA-style IR for the Talus compiler
//! front end.
//!
//! The pipeline is a straight line: [`scanner::Scanner`] partitions raw
//! bytes into raw tokens; [`tokenizer::tokenize`] raises those into the
//! logical token stream ([`token::Kind::Indent`]/`Outdent`/`BadOutdent`
//! included); [`parser::parse_module`] consumes that stream and produces an
//! [`ast::Module`]; [`ast::Stmt::build_ir`]/[`ast::Expr::build_ir`] lower AST
//! nodes into an [`ir::Routine`] via an [`ir::Builder`]. Errors encountered
//! while scanning, tokenizing, or parsing user input are never propagated as
//! `Result::Err` — they're embedded as [`talus_diagnostics::Diagnostic`]
//! values within the token stream or AST (§7). [`SourceError`] covers the
//! small set of failures that occur before there's a coherent buffer to
//! attach a diagnostic to.

#![warn(missing_docs)]

pub mod ast;
mod error;
pub mod ir;
pub mod parser;
mod peeker;
mod scanner;
mod scope;
mod token;
mod tokenizer;

pub use error::SourceError;
pub use peeker::Peeker;
pub use scanner::Scanner;
pub use scope::{Scope, Symbol, SymbolMaker};
pub use token::{Kind, Token};
pub use tokenizer::{tokenize, tokenize_expr, Tokenizer};

pub use ast::{Expr, IfClause, Module, Node, Param, Stmt, StatementBlock};
pub use parser::{parse_expr, parse_expr_stmt, parse_module};

pub use ir::{BasicBlock, BinaryOpCode, BlockId, Builder, Literal, Loop, LoopId, Routine, Terminator, UnaryOpCode, Value};

/// Scans, tokenizes, and parses a complete module from raw bytes.
///
/// This is the crate's single convenience entry point combining all three
/// front-end stages; callers who need finer control (e.g. to inspect the
/// raw or logical token stream) should compose [`Scanner`]/[`tokenize`]/
/// [`parse_module`] directly.
pub fn parse_module_bytes(source: &[u8], filename: impl Into<String>) -> Result<Module, SourceError> {
    let text = std::str::from_utf8(source)?;
    Ok(parse_module(tokenize(text, filename)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_module_bytes_rejects_invalid_utf8() {
        let bytes = [0x70, 0xff, 0x73, 0x73];
        assert!(matches!(parse_module_bytes(&bytes, "t"), Err(SourceError::InvalidUtf8(_))));
    }

    #[test]
    fn parse_module_bytes_parses_valid_source() {
        let module = parse_module_bytes(b"pass\n", "t").unwrap();
        assert_eq!(module.block.statements.len(), 1);
        assert!(matches!(module.block.statements[0], Stmt::Pass { .. }));
    }
}
