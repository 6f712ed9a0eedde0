//! Table-driven precedence-climbing expression grammar (§4.4.5).

use crate::ast::expr::{BinaryOp, UnaryOp};
use crate::ast::Expr;
use crate::peeker::Peeker;
use crate::token::{Kind, Token};
use bigdecimal::BigDecimal;
use talus_diagnostics::{Details, Diagnostic};

type Level = (&'static [(&'static str, BinaryOp)], bool);

/// Assignment operators (§4.4.5 level 0). Only spliced in ahead of
/// [`LEVELS`] in statement-expression context; `Chain = no`, so a match here
/// recurses into level 1 (`or`) for its right-hand side, not back into
/// itself — assignment doesn't chain.
const ASSIGN_LEVEL: Level = (
    &[
        ("=", BinaryOp::Assign),
        ("+=", BinaryOp::AddAssign),
        ("-=", BinaryOp::SubtractAssign),
        ("*=", BinaryOp::MultiplyAssign),
        ("/=", BinaryOp::DivideAssign),
        ("|=", BinaryOp::UnionAssign),
        ("&=", BinaryOp::IntersectionAssign),
    ],
    false,
);

/// Levels 1–8 of the precedence table, lowest precedence first. All chain.
const LEVELS: &[Level] = &[
    (&[("or", BinaryOp::Or)], true),
    (&[("and", BinaryOp::And)], true),
    (
        &[
            ("is", BinaryOp::Is),
            ("<", BinaryOp::LessThan),
            ("<=", BinaryOp::LessThanEqual),
            (">", BinaryOp::GreaterThan),
            (">=", BinaryOp::GreaterThanEqual),
            ("!=", BinaryOp::NotEqual),
            ("==", BinaryOp::Equal),
        ],
        true,
    ),
    (&[("|", BinaryOp::Union)], true),
    (&[("&", BinaryOp::Intersection)], true),
    (&[("<<", BinaryOp::ShiftLeft), (">>", BinaryOp::ShiftRight)], true),
    (&[("+", BinaryOp::Add), ("-", BinaryOp::Subtract)], true),
    (&[("*", BinaryOp::Multiply), ("/", BinaryOp::Divide), ("%", BinaryOp::Modulo)], true),
];

fn levels_for(allow_assignment: bool) -> Vec<Level> {
    let mut v = Vec::with_capacity(LEVELS.len() + 1);
    if allow_assignment {
        v.push(ASSIGN_LEVEL);
    }
    v.extend_from_slice(LEVELS);
    v
}

/// Parses a full expression. `allow_assignment` selects whether level 0
/// (assignment operators) participates — true only in statement-expression
/// context (§4.4.5).
pub fn parse_expr<I: Iterator<Item = Token>>(p: &mut Peeker<I>, allow_assignment: bool) -> Expr {
    let levels = levels_for(allow_assignment);
    parse_level(p, &levels, 0)
}

fn parse_level<I: Iterator<Item = Token>>(p: &mut Peeker<I>, levels: &[Level], idx: usize) -> Expr {
    let finish = p.range_builder();
    let lhs = if idx + 1 < levels.len() { parse_level(p, levels, idx + 1) } else { parse_unary(p) };

    let (ops, chain) = levels[idx];
    let Some((op, op_source_range)) = try_match_binary_op(p, ops) else {
        return lhs;
    };

    let rhs = if chain {
        parse_level(p, levels, idx)
    } else if idx + 1 < levels.len() {
        parse_level(p, levels, idx + 1)
    } else {
        parse_unary(p)
    };

    Expr::BinaryOpExpr { op, lhs: Box::new(lhs), rhs: Box::new(rhs), source_range: finish(p), op_source_range }
}

fn try_match_binary_op<I: Iterator<Item = Token>>(
    p: &mut Peeker<I>,
    ops: &[(&str, BinaryOp)],
) -> Option<(BinaryOp, talus_diagnostics::SourceRange)> {
    let text = p.peek().text().to_string();
    let matched = ops.iter().find(|(sym, _)| *sym == text).map(|(_, op)| *op)?;

    let op_finish = p.range_builder();
    p.read();

    if matched == BinaryOp::Is && p.peek().text() == "not" {
        p.read();
        return Some((BinaryOp::IsNot, op_finish(p)));
    }
    Some((matched, op_finish(p)))
}

/// Unary prefix operators, nesting right-to-left when chained (§4.4.5).
fn parse_unary<I: Iterator<Item = Token>>(p: &mut Peeker<I>) -> Expr {
    let finish = p.range_builder();
    let text = p.peek().text().to_string();
    let op = match text.as_str() {
        "not" => Some(UnaryOp::Not),
        "-" => Some(UnaryOp::Negate),
        "~" => Some(UnaryOp::Complement),
        _ => None,
    };
    let Some(op) = op else {
        return parse_factor(p);
    };

    let op_finish = p.range_builder();
    p.read();
    let op_source_range = op_finish(p);
    let operand = parse_unary(p);

    Expr::UnaryOpExpr { op, operand: Box::new(operand), source_range: finish(p), op_source_range }
}

fn parse_number(tok: &Token) -> BigDecimal {
    let text = tok.text();
    let from_radix = |digits: &str, radix: u32| -> BigDecimal {
        u64::from_str_radix(digits, radix).map(BigDecimal::from).unwrap_or_else(|_| BigDecimal::from(0))
    };
    match tok.kind {
        Kind::HexNumLit => from_radix(&text[2..], 16),
        Kind::BinNumLit => from_radix(&text[2..], 2),
        Kind::OctNumLit => from_radix(&text[2..], 8),
        _ => text.parse().unwrap_or_else(|_| BigDecimal::from(0)),
    }
}

/// The terminal level of the grammar (§4.4.5): literals, identifiers, and
/// parenthesised sub-expressions. Call/subscript/attribute postfix chains
/// are a planned extension, not parsed here.
fn parse_factor<I: Iterator<Item = Token>>(p: &mut Peeker<I>) -> Expr {
    let finish = p.range_builder();
    let tok = p.peek().clone();

    match tok.kind {
        Kind::OpenBracket if tok.text() == "(" => {
            p.read();
            let inner = parse_level(p, LEVELS, 0);
            if p.peek().kind == Kind::CloseBracket && p.peek().text() == ")" {
                p.read();
                inner
            } else {
                // Unmatched `(`: a diagnostic node, not a panic (REDESIGN FLAGS).
                let diag = Diagnostic::error(Details::UnmatchedOpenBracket { bracket: tok.text().to_string() }, finish(p));
                Expr::Diagnostic { diagnostics: vec![diag] }
            }
        }
        Kind::DecNumLit | Kind::HexNumLit | Kind::BinNumLit | Kind::OctNumLit => {
            p.read();
            Expr::LiteralNumber { value: parse_number(&tok), source_range: finish(p) }
        }
        Kind::StringLit => {
            p.read();
            Expr::LiteralString { value: tok.text().to_string(), source_range: finish(p) }
        }
        Kind::Ident => {
            p.read();
            match tok.text() {
                "true" => Expr::LiteralBool { value: true, source_range: finish(p) },
                "false" => Expr::LiteralBool { value: false, source_range: finish(p) },
                "null" => Expr::LiteralNull { source_range: finish(p) },
                name => Expr::Symbol { name: name.to_string(), source_range: finish(p) },
            }
        }
        _ => {
            p.read();
            let diag = Diagnostic::error(
                Details::NotYetImplemented { feature: format!("expression starting with {:?}", tok.text()) },
                finish(p),
            );
            Expr::Diagnostic { diagnostics: vec![diag] }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize_expr;

    fn parse(src: &str) -> Expr {
        let mut p = Peeker::new(tokenize_expr(src, "t"));
        parse_expr(&mut p, false)
    }

    #[test]
    fn number_literal() {
        match parse("3.14") {
            Expr::LiteralNumber { value, .. } => assert_eq!(value.to_string(), "3.14"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn string_literal() {
        match parse("\"hi\"") {
            Expr::LiteralString { value, .. } => assert_eq!(value, "\"hi\""),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn true_false_null() {
        assert!(matches!(parse("true"), Expr::LiteralBool { value: true, .. }));
        assert!(matches!(parse("false"), Expr::LiteralBool { value: false, .. }));
        assert!(matches!(parse("null"), Expr::LiteralNull { .. }));
    }

    #[test]
    fn symbol_reference() {
        match parse("foo") {
            Expr::Symbol { name, .. } => assert_eq!(name, "foo"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn binary_op_precedence_multiply_binds_tighter_than_add() {
        match parse("1 + 2 * 3") {
            Expr::BinaryOpExpr { op: BinaryOp::Add, lhs, rhs, .. } => {
                assert!(matches!(*lhs, Expr::LiteralNumber { .. }));
                assert!(matches!(*rhs, Expr::BinaryOpExpr { op: BinaryOp::Multiply, .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn is_not_is_a_single_combined_operator() {
        match parse("a is not b") {
            Expr::BinaryOpExpr { op: BinaryOp::IsNot, .. } => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parenthesised_grouping() {
        match parse("(1 + 2) * 3") {
            Expr::BinaryOpExpr { op: BinaryOp::Multiply, lhs, .. } => {
                assert!(matches!(*lhs, Expr::BinaryOpExpr { op: BinaryOp::Add, .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unmatched_open_paren_is_a_diagnostic_not_a_panic() {
        match parse("(1 + 2") {
            Expr::Diagnostic { diagnostics } => {
                assert_eq!(diagnostics.len(), 1);
                assert!(matches!(diagnostics[0].details, Details::UnmatchedOpenBracket { .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unary_chain_nests_right_to_left() {
        match parse("not not true") {
            Expr::UnaryOpExpr { op: UnaryOp::Not, operand, .. } => {
                assert!(matches!(*operand, Expr::UnaryOpExpr { op: UnaryOp::Not, .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn assignment_only_parses_when_allowed() {
        let mut p = Peeker::new(tokenize_expr("x = 1", "t"));
        match parse_expr(&mut p, true) {
            Expr::BinaryOpExpr { op: BinaryOp::Assign, .. } => {}
            other => panic!("unexpected: {other:?}"),
        }
    }
}
