//! Statement, block, `if`/`elif`/`else`, and module-level grammar (§4.4.1–§4.4.4).

use super::expr::parse_expr;
use crate::ast::{IfClause, Module, Stmt, StatementBlock};
use crate::peeker::Peeker;
use crate::token::{Kind, Token};
use talus_diagnostics::{Details, Diagnostic, SourceRange};

/// Recursive-descent statement/block parser, driven by a [`Peeker`].
pub struct Parser<I: Iterator<Item = Token>> {
    p: Peeker<I>,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Wrap a logical token stream for parsing.
    pub fn new(tokens: I) -> Self {
        Self { p: Peeker::new(tokens) }
    }

    /// `ParseModule` (§4.4.4, §6).
    pub fn parse_module(mut self) -> Module {
        let finish = self.p.range_builder();
        let (doc, doc_diagnostic) = self.parse_doc();
        let block_finish = self.p.range_builder();
        let mut statements = Vec::from_iter(doc_diagnostic);
        statements.extend(self.parse_statements(|k| k == Kind::Eof));
        let block_range = block_finish(&self.p);
        let source_range = finish(&self.p);
        Module { block: StatementBlock { statements, source_range: block_range }, doc, source_range }
    }

    /// `ParseExprStmt` (§6): a single expression statement, assignment
    /// permitted, terminated by `NewLine`.
    pub fn parse_expr_stmt(mut self) -> Stmt {
        self.parse_expr_stmt_inner()
    }

    /// Only the leading-string-literal *shape* of a module docstring is
    /// recognised; its contents are not decoded (§9), so the returned text
    /// is always the empty string. The "non-empty docstring must be followed
    /// by a blank line" diagnostic (§4.4.4) only needs the raw literal's
    /// source text, which is available before that stub discards it, so it
    /// still fires: a blank line is two consecutive `NewLine` tokens, so if
    /// the docstring's own `NewLine` isn't itself followed by another one,
    /// the returned statement is prepended to the block.
    fn parse_doc(&mut self) -> (String, Option<Stmt>) {
        if self.p.peek().kind == Kind::StringLit {
            let finish = self.p.range_builder();
            let text = self.p.peek().text().to_string();
            self.p.read();
            let non_empty = text.len() > 2; // more than just the surrounding quotes
            if self.p.peek().kind == Kind::NewLine {
                self.p.read();
            }
            let blank_line_follows = self.p.peek().kind == Kind::NewLine;
            if non_empty && !blank_line_follows {
                let diag = Diagnostic::error(Details::EmptyLineRequiredAfterDocstring, finish(&self.p));
                return (String::new(), Some(Stmt::Diagnostic { diagnostics: vec![diag] }));
            }
        }
        (String::new(), None)
    }

    /// `ParseStatements(stop_predicate)` (§4.4.1).
    fn parse_statements(&mut self, stop: impl Fn(Kind) -> bool) -> Vec<Stmt> {
        let mut out = Vec::new();
        loop {
            if stop(self.p.peek().kind) {
                break;
            }
            if self.p.peek().kind == Kind::BadOutdent {
                let range = self.p.peek().source_range();
                self.p.read();
                out.push(Stmt::Diagnostic { diagnostics: vec![Diagnostic::error(Details::InconsistentIndentation, range)] });
                break;
            }
            out.push(self.parse_statement());
        }
        out
    }

    fn parse_statement(&mut self) -> Stmt {
        if self.p.peek().kind == Kind::Ident {
            let text = self.p.peek().text().to_string();
            match text.as_str() {
                "pass" => return self.parse_simple_keyword(|r| Stmt::Pass { source_range: r }),
                "break" => return self.parse_simple_keyword(|r| Stmt::Break { source_range: r }),
                "continue" => return self.parse_simple_keyword(|r| Stmt::Continue { source_range: r }),
                "return" => return self.parse_return(),
                "if" => return self.parse_if(),
                "while" => return self.parse_stub("while statement"),
                "for" => return self.parse_stub("for statement"),
                "var" => return self.parse_stub("var declaration"),
                "const" => return self.parse_stub("const declaration"),
                "func" => return self.parse_stub("func declaration"),
                "proc" => return self.parse_stub("proc declaration"),
                _ => {}
            }
        }
        self.parse_expr_stmt_inner()
    }

    fn parse_simple_keyword(&mut self, make: impl FnOnce(SourceRange) -> Stmt) -> Stmt {
        let finish = self.p.range_builder();
        self.p.read();
        let range = finish(&self.p);
        self.require_newline(range, make)
    }

    fn parse_return(&mut self) -> Stmt {
        let finish = self.p.range_builder();
        self.p.read();
        let expr = if self.p.peek().kind == Kind::NewLine { None } else { Some(parse_expr(&mut self.p, false)) };
        let range = finish(&self.p);
        self.require_newline(range, move |r| Stmt::Return { expr, source_range: r })
    }

    fn parse_expr_stmt_inner(&mut self) -> Stmt {
        let finish = self.p.range_builder();
        let expr = parse_expr(&mut self.p, true);
        let range = finish(&self.p);
        self.require_newline(range, move |_| Stmt::ExprStmt { expr })
    }

    fn require_newline(&mut self, range: SourceRange, make: impl FnOnce(SourceRange) -> Stmt) -> Stmt {
        if self.p.peek().kind == Kind::NewLine {
            self.p.read();
            make(range)
        } else {
            Stmt::Diagnostic { diagnostics: vec![Diagnostic::error(Details::NewlineExpected, range)] }
        }
    }

    /// `if`/`elif`/`else` (§4.4.3).
    fn parse_if(&mut self) -> Stmt {
        let finish = self.p.range_builder();
        self.p.read(); // "if"
        let mut clauses = Vec::new();

        let cond = parse_expr(&mut self.p, false);
        let block = self.parse_block();
        clauses.push(IfClause { cond: Some(cond), block });

        while self.p.peek().kind == Kind::Ident && self.p.peek().text() == "elif" {
            self.p.read();
            let cond = parse_expr(&mut self.p, false);
            let block = self.parse_block();
            clauses.push(IfClause { cond: Some(cond), block });
        }

        if self.p.peek().kind == Kind::Ident && self.p.peek().text() == "else" {
            self.p.read();
            let block = self.parse_block();
            clauses.push(IfClause { cond: None, block });
        }

        Stmt::If { clauses, source_range: finish(&self.p) }
    }

    /// Indented block (§4.4.2): `:` `NewLine` `Indent` statements `Outdent`.
    fn parse_block(&mut self) -> StatementBlock {
        let finish = self.p.range_builder();
        if self.p.peek().kind == Kind::Punct && self.p.peek().text() == ":" {
            self.p.read();
            if self.p.peek().kind == Kind::NewLine {
                self.p.read();
                if self.p.peek().kind == Kind::Indent {
                    self.p.read();
                    let statements = self.parse_statements(|k| k == Kind::Outdent);
                    if self.p.peek().kind == Kind::Outdent {
                        self.p.read();
                    }
                    return StatementBlock { statements, source_range: finish(&self.p) };
                }
            }
        }
        let range = finish(&self.p);
        StatementBlock {
            statements: vec![Stmt::Diagnostic { diagnostics: vec![Diagnostic::error(Details::IndentedBlockExpected, range.clone())] }],
            source_range: range,
        }
    }

    /// A recognised-but-unlowered leading keyword (`while`, `for`, `var`,
    /// `const`, `func`, `proc`): consumes its header and, if present, an
    /// indented block, without attempting to interpret either (§9 decisions).
    fn parse_stub(&mut self, feature: &'static str) -> Stmt {
        let finish = self.p.range_builder();
        self.p.read(); // leading keyword
        while !matches!(self.p.peek().kind, Kind::NewLine | Kind::Eof)
            && !(self.p.peek().kind == Kind::Punct && self.p.peek().text() == ":")
        {
            self.p.read();
        }
        if self.p.peek().kind == Kind::Punct && self.p.peek().text() == ":" {
            let _ = self.parse_block();
        } else if self.p.peek().kind == Kind::NewLine {
            self.p.read();
        }
        let range = finish(&self.p);
        Stmt::Diagnostic { diagnostics: vec![Diagnostic::error(Details::NotYetImplemented { feature: feature.to_string() }, range)] }
    }
}
