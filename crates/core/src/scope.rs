//! Lexical scope (§4.7): name resolution plus the currently-active
//! `continue`/`break` jump targets threaded through IR lowering.

use crate::ir::BlockId;
use std::collections::HashMap;
use std::rc::Rc;
use talus_diagnostics::SourceRange;

/// A declared name: just enough to report where and as what it was
/// introduced. Concrete symbol kinds (routines, variables, types) are a
/// later concern than anything this crate lowers today.
#[derive(Debug, Clone)]
pub struct Symbol {
    name: String,
    decl_range: SourceRange,
}

impl Symbol {
    /// Create a symbol recording its declared name and source location.
    pub fn new(name: impl Into<String>, decl_range: SourceRange) -> Self {
        Self { name: name.into(), decl_range }
    }

    /// The name this symbol was declared under.
    pub fn decl_name(&self) -> &str {
        &self.name
    }

    /// Where this symbol was declared.
    pub fn decl_range(&self) -> &SourceRange {
        &self.decl_range
    }
}

/// Constructs a [`Symbol`] for a freshly-declared name, given the scope's
/// variable/constant-specific policy (e.g. mutability bookkeeping a later
/// analysis pass may attach).
pub type SymbolMaker = Rc<dyn Fn(&str, &SourceRange) -> Symbol>;

/// A lexical scope: a name-to-symbol map, a parent link, the loop jump
/// targets currently in effect, and the two symbol-construction policies
/// (`var` vs `const`) inherited down the chain.
#[derive(Clone)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    parent: Option<Rc<Scope>>,
    /// The block a `continue` statement in this scope jumps to.
    pub continue_block: Option<BlockId>,
    /// The block a `break` statement in this scope jumps to.
    pub break_block: Option<BlockId>,
    make_variable: Option<SymbolMaker>,
    make_constant: Option<SymbolMaker>,
}

impl Scope {
    /// A fresh, parentless scope with no loop targets and no symbol-maker
    /// policy installed yet.
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            parent: None,
            continue_block: None,
            break_block: None,
            make_variable: None,
            make_constant: None,
        }
    }

    /// Install the policy used by [`Scope::declare_variable`].
    pub fn with_variable_maker(mut self, maker: SymbolMaker) -> Self {
        self.make_variable = Some(maker);
        self
    }

    /// Install the policy used by [`Scope::declare_constant`].
    pub fn with_constant_maker(mut self, maker: SymbolMaker) -> Self {
        self.make_constant = Some(maker);
        self
    }

    /// A child scope inheriting this scope's loop targets and symbol-maker
    /// policies; callers override whichever slots are changing (e.g. a new
    /// loop's body overrides `continue_block`/`break_block`).
    pub fn new_child(self: &Rc<Self>) -> Scope {
        Scope {
            symbols: HashMap::new(),
            parent: Some(Rc::clone(self)),
            continue_block: self.continue_block,
            break_block: self.break_block,
            make_variable: self.make_variable.clone(),
            make_constant: self.make_constant.clone(),
        }
    }

    /// Declare `name` as a variable in this scope, using the installed
    /// variable-maker policy.
    ///
    /// Panics if no variable-maker policy was installed: declaring a
    /// variable with no policy in place is a programmer error, not user
    /// input (§7, item 4).
    pub fn declare_variable(&mut self, name: &str, decl_range: SourceRange) -> Symbol {
        let maker = self.make_variable.clone().expect("no variable-declaration policy installed on this scope");
        let symbol = maker(name, &decl_range);
        self.symbols.insert(name.to_string(), symbol.clone());
        symbol
    }

    /// Declare `name` as a constant in this scope, using the installed
    /// constant-maker policy. Panics under the same condition as
    /// [`Scope::declare_variable`].
    pub fn declare_constant(&mut self, name: &str, decl_range: SourceRange) -> Symbol {
        let maker = self.make_constant.clone().expect("no constant-declaration policy installed on this scope");
        let symbol = maker(name, &decl_range);
        self.symbols.insert(name.to_string(), symbol.clone());
        symbol
    }

    /// Resolve `name`, searching this scope then its ancestors.
    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        if let Some(sym) = self.symbols.get(name) {
            return Some(sym);
        }
        self.parent.as_deref().and_then(|p| p.symbol(name))
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> SourceRange {
        let loc = talus_diagnostics::SourceLocation::new("t", 1, 1);
        SourceRange::new(loc.clone(), loc)
    }

    #[test]
    fn child_scope_inherits_loop_targets() {
        let routine = crate::ir::Routine::new();
        let mut parent = Scope::new();
        parent.break_block = Some(routine.entry());
        let parent = Rc::new(parent);
        let child = parent.new_child();
        assert_eq!(child.break_block, parent.break_block);
    }

    #[test]
    fn lookup_walks_parent_chain() {
        let mut parent = Scope::new().with_variable_maker(Rc::new(|name, range| Symbol::new(name, range.clone())));
        parent.declare_variable("x", range());
        let parent = Rc::new(parent);
        let child = parent.new_child();
        assert!(child.symbol("x").is_some());
    }

    #[test]
    fn shadowing_in_child_does_not_affect_parent() {
        let mut parent = Scope::new().with_variable_maker(Rc::new(|name, range| Symbol::new(name, range.clone())));
        parent.declare_variable("x", range());
        let parent = Rc::new(parent);
        let mut child = parent.new_child();
        child.declare_variable("x", range());
        assert!(parent.symbol("x").is_some());
        assert!(child.symbol("x").is_some());
    }
}
