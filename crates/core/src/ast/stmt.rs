//! Statement node kinds, `StatementBlock`, `Module`, and `IfClause` (§4.4,
//! §4.5).

use super::{Expr, Node, Param};
use crate::ir::Builder;
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use talus_diagnostics::{Diagnostic, SourceRange};
use std::rc::Rc;

/// A sequence of statements delimited by indentation (the body of a module
/// or of one `if`/`elif`/`else` clause).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementBlock {
    /// The statements, in source order.
    pub statements: Vec<Stmt>,
    /// The block's full source extent, including its statements.
    pub source_range: SourceRange,
}

impl StatementBlock {
    /// No scalar attributes of its own.
    pub fn params(&self) -> Vec<Param> {
        vec![]
    }

    /// Its statements, in source order.
    pub fn child_nodes(&self) -> Vec<Node<'_>> {
        self.statements.iter().map(Node::Stmt).collect()
    }

    /// Lowers each statement in order into `builder`'s current block.
    pub fn build_ir(&self, scope: &Rc<Scope>, builder: &mut Builder<'_>) {
        let mut child = scope.new_child();
        for stmt in &self.statements {
            stmt.build_ir(&mut child, builder);
        }
    }
}

/// The root of a parsed source file: a top-level statement block plus a
/// module docstring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// The module's top-level statements.
    pub block: StatementBlock,
    /// The module docstring text, or empty if none was present (§9:
    /// docstring extraction is stubbed — only the leading-string-literal
    /// shape is recognised, its contents are not decoded further).
    pub doc: String,
    /// The module's full source extent.
    pub source_range: SourceRange,
}

impl Module {
    /// No scalar attributes of its own.
    pub fn params(&self) -> Vec<Param> {
        vec![]
    }

    /// The module's single child: its top-level block.
    pub fn child_nodes(&self) -> Vec<Node<'_>> {
        vec![Node::Block(&self.block)]
    }
}

/// One arm of an `if`/`elif`/`else` chain. `cond` is `None` for the trailing
/// `else` arm, if present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfClause {
    /// The condition expression, or `None` for an `else` arm.
    pub cond: Option<Expr>,
    /// The body executed when `cond` holds (or unconditionally, for `else`).
    pub block: StatementBlock,
}

impl IfClause {
    /// No scalar attributes of its own.
    pub fn params(&self) -> Vec<Param> {
        vec![]
    }

    /// The condition (if any) followed by the body block.
    pub fn child_nodes(&self) -> Vec<Node<'_>> {
        match &self.cond {
            Some(cond) => vec![Node::Expr(cond), Node::Block(&self.block)],
            None => vec![Node::Block(&self.block)],
        }
    }
}

/// A statement AST node (§4.4.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[non_exhaustive]
pub enum Stmt {
    /// `pass` — does nothing.
    Pass { source_range: SourceRange },
    /// `break` — jumps to the scope's current break target.
    Break { source_range: SourceRange },
    /// `continue` — jumps to the scope's current continue target.
    Continue { source_range: SourceRange },
    /// `return`, with an optional value expression.
    Return { expr: Option<Expr>, source_range: SourceRange },
    /// An `if`/`elif`/`else` chain.
    If { clauses: Vec<IfClause>, source_range: SourceRange },
    /// A bare expression used as a statement; its value is discarded.
    ExprStmt { expr: Expr },
    /// A statement-level parse error, carrying the diagnostics describing
    /// it, in place of the statement that couldn't be parsed (§7, item 2).
    /// Also used for statement forms recognised by the grammar but not yet
    /// lowered (`while`, `for`, `var`, `const`, `func`, `proc`), via a
    /// `Details::NotYetImplemented` diagnostic (§9 decisions).
    Diagnostic { diagnostics: Vec<Diagnostic> },
}

impl Stmt {
    /// This node's source range.
    pub fn source_range(&self) -> Option<&SourceRange> {
        match self {
            Self::Pass { source_range }
            | Self::Break { source_range }
            | Self::Continue { source_range }
            | Self::Return { source_range, .. }
            | Self::If { source_range, .. } => Some(source_range),
            Self::ExprStmt { .. } | Self::Diagnostic { .. } => None,
        }
    }

    /// This node's scalar attributes (§4.5). All statement kinds here carry
    /// their identifying data through child nodes (conditions, the return
    /// expression) rather than scalar params.
    pub fn params(&self) -> Vec<Param> {
        vec![]
    }

    /// This node's children, in source order (§4.5).
    pub fn child_nodes(&self) -> Vec<Node<'_>> {
        match self {
            Self::Pass { .. } | Self::Break { .. } | Self::Continue { .. } | Self::Diagnostic { .. } => {
                vec![]
            }
            Self::Return { expr, .. } => expr.iter().map(Node::Expr).collect(),
            Self::If { clauses, .. } => clauses.iter().map(Node::Clause).collect(),
            Self::ExprStmt { expr } => vec![Node::Expr(expr)],
        }
    }

    /// Lowers this statement into `builder`'s current block (§4.6).
    pub fn build_ir(&self, scope: &mut Scope, builder: &mut Builder<'_>) {
        match self {
            Self::Pass { .. } => {}
            Self::Break { .. } => {
                let target = scope.break_block.expect("`break` outside a loop is a contract violation at IR-build time");
                builder.jump(target);
            }
            Self::Continue { .. } => {
                let target = scope.continue_block.expect("`continue` outside a loop is a contract violation at IR-build time");
                builder.jump(target);
            }
            Self::ExprStmt { expr } => {
                expr.build_ir(scope, builder);
            }
            Self::Diagnostic { diagnostics } => {
                builder.diagnostics(diagnostics.clone());
            }
            Self::Return { expr, .. } => {
                let value = match expr {
                    Some(e) => e.build_ir(scope, builder),
                    None => builder.void(),
                };
                builder.ret(value);
            }
            Self::If { clauses, .. } => build_if_ir(clauses, scope, builder),
        }
    }
}

/// Lowers an `if`/`elif`/`else` chain per §4.6.4: allocate an `after` block;
/// for each clause, branch into a fresh true/false pair, lower the clause
/// body into the true side and jump to `after`, then continue with the
/// false side as the next clause's entry point (or, for a trailing `else`,
/// lower straight into it).
fn build_if_ir(clauses: &[IfClause], scope: &mut Scope, builder: &mut Builder<'_>) {
    let after = builder.new_basic_block();
    let scope_rc = Rc::new(scope.clone());

    for clause in clauses {
        let child_scope = Rc::new(scope_rc.new_child());

        match &clause.cond {
            None => {
                clause.block.build_ir(&child_scope, builder);
            }
            Some(cond) => {
                let mut cond_scope = (*scope_rc).clone();
                let cond_value = cond.build_ir(&mut cond_scope, builder);
                let true_block = builder.new_basic_block();
                let false_block = builder.new_basic_block();
                builder.branch(cond_value, true_block, false_block);

                builder.switch_basic_block(true_block);
                clause.block.build_ir(&child_scope, builder);
                builder.jump(after);

                builder.switch_basic_block(false_block);
            }
        }
    }

    builder.jump(after);
    builder.switch_basic_block(after);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Routine;
    use talus_diagnostics::SourceLocation;

    fn range() -> SourceRange {
        let loc = SourceLocation::new("t", 1, 1);
        SourceRange::new(loc.clone(), loc)
    }

    #[test]
    fn pass_has_no_params_or_children() {
        let s = Stmt::Pass { source_range: range() };
        assert!(s.params().is_empty());
        assert!(s.child_nodes().is_empty());
    }

    #[test]
    fn break_jumps_to_scopes_break_block() {
        let mut routine = Routine::new();
        let target = {
            let mut b = Builder::new(&mut routine);
            b.new_basic_block()
        };
        let mut scope = Scope::new();
        scope.break_block = Some(target);
        let mut b = Builder::new(&mut routine);
        Stmt::Break { source_range: range() }.build_ir(&mut scope, &mut b);
        let entry = routine.entry();
        match routine.block(entry).terminator() {
            Some(crate::ir::Terminator::Jump(t)) => assert_eq!(*t, target),
            other => panic!("expected Jump, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "contract violation")]
    fn break_outside_loop_panics() {
        let mut routine = Routine::new();
        let mut b = Builder::new(&mut routine);
        let mut scope = Scope::new();
        Stmt::Break { source_range: range() }.build_ir(&mut scope, &mut b);
    }

    #[test]
    fn if_elif_else_shape_matches_seed() {
        let pass = |r: SourceRange| StatementBlock { statements: vec![Stmt::Pass { source_range: r.clone() }], source_range: r };
        let if_stmt = Stmt::If {
            clauses: vec![
                IfClause { cond: Some(Expr::LiteralNull { source_range: range() }), block: pass(range()) },
                IfClause { cond: Some(Expr::LiteralNull { source_range: range() }), block: pass(range()) },
                IfClause { cond: None, block: pass(range()) },
            ],
            source_range: range(),
        };
        match &if_stmt {
            Stmt::If { clauses, .. } => {
                assert_eq!(clauses.len(), 3);
                assert!(clauses[0].cond.is_some());
                assert!(clauses[1].cond.is_some());
                assert!(clauses[2].cond.is_none());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn if_with_else_builds_after_block_reachable_from_both_arms() {
        let mut routine = Routine::new();
        let mut scope = Scope::new();
        let pass = |r: SourceRange| StatementBlock { statements: vec![Stmt::Pass { source_range: r.clone() }], source_range: r };
        let if_stmt = Stmt::If {
            clauses: vec![
                IfClause { cond: Some(Expr::LiteralBool { value: true, source_range: range() }), block: pass(range()) },
                IfClause { cond: None, block: pass(range()) },
            ],
            source_range: range(),
        };
        // LiteralBoolExpr::BuildIR is unimplemented, so drive the condition
        // value manually instead of through Expr::build_ir.
        {
            let mut b = Builder::new(&mut routine);
            let after = b.new_basic_block();
            let cond_value = b.true_();
            let true_block = b.new_basic_block();
            let false_block = b.new_basic_block();
            b.branch(cond_value, true_block, false_block);
            b.switch_basic_block(true_block);
            if let Stmt::If { clauses, .. } = &if_stmt {
                clauses[0].block.build_ir(&Rc::new(scope.clone()), &mut b);
            }
            b.jump(after);
            b.switch_basic_block(false_block);
            if let Stmt::If { clauses, .. } = &if_stmt {
                clauses[1].block.build_ir(&Rc::new(scope.clone()), &mut b);
            }
            b.jump(after);
            b.switch_basic_block(after);
        }
        let _ = &mut scope;
        let order = routine.basic_blocks();
        // entry, true_block, false_block, after — all four reachable, none
        // pruned.
        assert_eq!(order.len(), 4);
    }
}
