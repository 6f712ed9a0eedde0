//! The parser (§4.4): turns a logical token stream into an AST, embedding
//! diagnostics as nodes rather than failing outright (§4.4.6).

mod expr;
mod stmt;

pub use stmt::Parser;

use crate::ast::{Expr, Module, Stmt};
use crate::token::Token;

/// `ParseModule(token-stream) → Module` (§6).
pub fn parse_module(tokens: impl Iterator<Item = Token>) -> Module {
    Parser::new(tokens).parse_module()
}

/// `ParseExpr(token-stream) → Expression` (§6): a single expression,
/// assignment not permitted (pure-expression context).
pub fn parse_expr(tokens: impl Iterator<Item = Token>) -> Expr {
    let mut p = crate::peeker::Peeker::new(tokens);
    expr::parse_expr(&mut p, false)
}

/// `ParseExprStmt(token-stream) → ExprStmt` (§6): a single expression
/// statement, assignment permitted, terminated by `NewLine`.
pub fn parse_expr_stmt(tokens: impl Iterator<Item = Token>) -> Stmt {
    Parser::new(tokens).parse_expr_stmt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{tokenize, tokenize_expr};

    #[test]
    fn parse_module_entry_point() {
        let m = parse_module(tokenize("pass\n", "t"));
        assert_eq!(m.block.statements.len(), 1);
    }

    #[test]
    fn parse_expr_entry_point() {
        let e = parse_expr(tokenize_expr("1 + 2", "t"));
        assert!(matches!(e, Expr::BinaryOpExpr { .. }));
    }

    #[test]
    fn parse_expr_stmt_entry_point() {
        let s = parse_expr_stmt(tokenize_expr("x = 1\n", "t"));
        assert!(matches!(s, Stmt::ExprStmt { .. }));
    }
}
