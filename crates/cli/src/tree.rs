//! Pretty-printed AST dump and diagnostic collection, built on the core's
//! uniform `Node`/`params()`/`child_nodes()` traversal (§4.5, §10.1).

use std::fmt::Write as _;

use talus_core::{Expr, Module, Node, Param, Stmt};
use talus_diagnostics::Diagnostic;

/// Render `module` as an indented tree, one node per line.
pub fn print_module(module: &Module) -> String {
    let mut out = String::new();
    writeln!(out, "Module").unwrap();
    for child in module.child_nodes() {
        print_node(&child, 1, &mut out);
    }
    out
}

fn print_node(node: &Node<'_>, depth: usize, out: &mut String) {
    // A `StatementBlock` is a pure sequencing construct — render its
    // statements in place rather than introducing an extra "Block" line.
    if let Node::Block(_) = node {
        for child in node.child_nodes() {
            print_node(&child, depth, out);
        }
        return;
    }

    let indent = "  ".repeat(depth);

    if let Node::Stmt(Stmt::Diagnostic { diagnostics }) | Node::Expr(Expr::Diagnostic { diagnostics }) = node {
        writeln!(out, "{indent}Diagnostic").unwrap();
        for d in diagnostics {
            writeln!(out, "{indent}  {d}").unwrap();
        }
        return;
    }

    let params = node.params();
    if params.is_empty() {
        writeln!(out, "{indent}{}", node_label(node)).unwrap();
    } else {
        let rendered: Vec<String> = params.iter().map(param_str).collect();
        writeln!(out, "{indent}{} {}", node_label(node), rendered.join(" ")).unwrap();
    }
    for child in node.child_nodes() {
        print_node(&child, depth + 1, out);
    }
}

fn node_label(node: &Node<'_>) -> &'static str {
    match node {
        Node::Stmt(s) => stmt_label(s),
        Node::Expr(e) => expr_label(e),
        Node::Block(_) => "Block",
        Node::Clause(_) => "IfClause",
    }
}

fn stmt_label(s: &Stmt) -> &'static str {
    match s {
        Stmt::Pass { .. } => "Pass",
        Stmt::Break { .. } => "Break",
        Stmt::Continue { .. } => "Continue",
        Stmt::Return { .. } => "Return",
        Stmt::If { .. } => "If",
        Stmt::ExprStmt { .. } => "ExprStmt",
        Stmt::Diagnostic { .. } => "Diagnostic",
        _ => "Stmt",
    }
}

fn expr_label(e: &Expr) -> &'static str {
    match e {
        Expr::LiteralNumber { .. } => "LiteralNumber",
        Expr::LiteralString { .. } => "LiteralString",
        Expr::LiteralBool { .. } => "LiteralBool",
        Expr::LiteralNull { .. } => "LiteralNull",
        Expr::Symbol { .. } => "Symbol",
        Expr::UnaryOpExpr { .. } => "UnaryOpExpr",
        Expr::BinaryOpExpr { .. } => "BinaryOpExpr",
        Expr::Diagnostic { .. } => "Diagnostic",
        _ => "Expr",
    }
}

fn param_str(p: &Param) -> String {
    match p {
        Param::Ident(s) => s.clone(),
        Param::Op(s) => (*s).to_string(),
        Param::Bool(b) => b.to_string(),
        Param::Number(s) => s.clone(),
        Param::Str(s) => s.clone(),
    }
}

/// Collect every diagnostic embedded anywhere in `module`'s tree.
pub fn collect_diagnostics(module: &Module) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for child in module.child_nodes() {
        walk(&child, &mut out);
    }
    out
}

fn walk(node: &Node<'_>, out: &mut Vec<Diagnostic>) {
    match node {
        Node::Stmt(Stmt::Diagnostic { diagnostics }) | Node::Expr(Expr::Diagnostic { diagnostics }) => {
            out.extend(diagnostics.iter().cloned());
        }
        _ => {}
    }
    for child in node.child_nodes() {
        walk(&child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talus_core::{parse_module, tokenize};

    #[test]
    fn prints_a_simple_module() {
        let module = parse_module(tokenize("pass\n", "t"));
        let dump = print_module(&module);
        assert_eq!(dump, "Module\n  Pass\n");
    }

    #[test]
    fn collects_diagnostics_from_malformed_input() {
        let module = parse_module(tokenize("pass pass\n", "t"));
        let diagnostics = collect_diagnostics(&module);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn if_chain_renders_nested_clauses() {
        let module = parse_module(tokenize("if a:\n    pass\nelse:\n    pass\n", "t"));
        let dump = print_module(&module);
        assert!(dump.contains("If"));
        assert!(dump.contains("IfClause"));
        assert!(dump.contains("Symbol a"));
    }
}
