//! Expression node kinds (§4.4.5, §4.5).

use super::{Node, Param};
use crate::ir::{Builder, Value};
use crate::scope::Scope;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use talus_diagnostics::{Diagnostic, SourceRange};

/// A two-operand expression operator (§4.4.5's precedence table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `=` — only reachable from statement-expression context (§4.4.5 level 0).
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubtractAssign,
    /// `*=`
    MultiplyAssign,
    /// `/=`
    DivideAssign,
    /// `|=`
    UnionAssign,
    /// `&=`
    IntersectionAssign,
    /// `or`
    Or,
    /// `and`
    And,
    /// `is`
    Is,
    /// `is not`
    IsNot,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
    /// `!=`
    NotEqual,
    /// `==`
    Equal,
    /// `|`
    Union,
    /// `&`
    Intersection,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
}

impl BinaryOp {
    /// The operator's source-text spelling, used both for `Params()` and as
    /// a table key during parsing.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubtractAssign => "-=",
            Self::MultiplyAssign => "*=",
            Self::DivideAssign => "/=",
            Self::UnionAssign => "|=",
            Self::IntersectionAssign => "&=",
            Self::Or => "or",
            Self::And => "and",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
            Self::NotEqual => "!=",
            Self::Equal => "==",
            Self::Union => "|",
            Self::Intersection => "&",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }
}

/// A single-operand expression operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// logical `not`
    Not,
    /// arithmetic negation `-`
    Negate,
    /// bitwise complement `~`
    Complement,
}

impl UnaryOp {
    /// The operator's source-text spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Negate => "-",
            Self::Complement => "~",
        }
    }
}

/// An expression AST node (§4.4.5).
///
/// `Params()`/`ChildNodes()` are implemented for every variant; `BuildIR`
/// lowering is implemented for the variant that's actually reachable from
/// the statement grammar built so far (`DiagnosticExpr`). The remaining
/// variants raise the same "not yet implemented" signal their upstream
/// counterparts do — lowering literals, symbols, and operator expressions to
/// IR instructions is future work, not a gap introduced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[non_exhaustive]
pub enum Expr {
    /// A numeric literal, stored as its normalised decimal rendering (§9):
    /// equality is string-equality of that rendering, not bitwise.
    LiteralNumber { value: BigDecimal, source_range: SourceRange },
    /// A string literal, storing the bytes as decoded from source (escapes
    /// already processed).
    LiteralString { value: String, source_range: SourceRange },
    /// A boolean literal.
    LiteralBool { value: bool, source_range: SourceRange },
    /// The `null` literal.
    LiteralNull { source_range: SourceRange },
    /// A bare identifier reference.
    Symbol { name: String, source_range: SourceRange },
    /// A prefix unary operator expression.
    UnaryOpExpr { op: UnaryOp, operand: Box<Expr>, source_range: SourceRange, op_source_range: SourceRange },
    /// An infix binary operator expression.
    BinaryOpExpr { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr>, source_range: SourceRange, op_source_range: SourceRange },
    /// A parse-time error, carrying the diagnostics that describe it, in
    /// place of the expression that couldn't be parsed (§7, item 2).
    Diagnostic { diagnostics: Vec<Diagnostic> },
}

impl Expr {
    /// This node's source range.
    pub fn source_range(&self) -> Option<&SourceRange> {
        match self {
            Self::LiteralNumber { source_range, .. }
            | Self::LiteralString { source_range, .. }
            | Self::LiteralBool { source_range, .. }
            | Self::LiteralNull { source_range }
            | Self::Symbol { source_range, .. }
            | Self::UnaryOpExpr { source_range, .. }
            | Self::BinaryOpExpr { source_range, .. } => Some(source_range),
            Self::Diagnostic { .. } => None,
        }
    }

    /// This node's scalar attributes (§4.5).
    pub fn params(&self) -> Vec<Param> {
        match self {
            Self::LiteralNumber { value, .. } => vec![Param::Number(value.to_string())],
            Self::LiteralString { value, .. } => vec![Param::Str(value.clone())],
            Self::LiteralBool { value, .. } => vec![Param::Bool(*value)],
            Self::LiteralNull { .. } => vec![],
            Self::Symbol { name, .. } => vec![Param::Ident(name.clone())],
            Self::UnaryOpExpr { op, .. } => vec![Param::Op(op.symbol())],
            Self::BinaryOpExpr { op, .. } => vec![Param::Op(op.symbol())],
            Self::Diagnostic { .. } => vec![],
        }
    }

    /// This node's children, in source order (§4.5).
    pub fn child_nodes(&self) -> Vec<Node<'_>> {
        match self {
            Self::LiteralNumber { .. }
            | Self::LiteralString { .. }
            | Self::LiteralBool { .. }
            | Self::LiteralNull { .. }
            | Self::Symbol { .. }
            | Self::Diagnostic { .. } => vec![],
            Self::UnaryOpExpr { operand, .. } => vec![Node::Expr(operand)],
            Self::BinaryOpExpr { lhs, rhs, .. } => vec![Node::Expr(lhs), Node::Expr(rhs)],
        }
    }

    /// Lowers this expression to an IR value (§4.6).
    pub fn build_ir(&self, scope: &mut Scope, builder: &mut Builder<'_>) -> Value {
        match self {
            Self::Diagnostic { diagnostics } => builder.diagnostics(diagnostics.clone()),
            Self::LiteralNumber { .. } => unimplemented!("BuildIR not yet implemented for LiteralNumberExpr"),
            Self::LiteralString { .. } => unimplemented!("BuildIR not yet implemented for LiteralStringExpr"),
            Self::LiteralBool { .. } => unimplemented!("BuildIR not yet implemented for LiteralBoolExpr"),
            Self::LiteralNull { .. } => unimplemented!("BuildIR not yet implemented for LiteralNullExpr"),
            Self::Symbol { .. } => {
                let _ = scope;
                unimplemented!("BuildIR not yet implemented for SymbolExpr")
            }
            Self::UnaryOpExpr { .. } | Self::BinaryOpExpr { .. } => {
                let _ = (scope, builder);
                unimplemented!("BuildIR not yet implemented for operator expressions")
            }
        }
    }
}
