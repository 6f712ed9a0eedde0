//! Instruction and terminator payloads.

use super::{BlockId, Value};
use talus_diagnostics::Diagnostic;

/// A binary operator code, matching §4.4.5's precedence table one-for-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOpCode {
    /// `or`
    Or,
    /// `and`
    And,
    /// `is`
    Is,
    /// `is not`
    IsNot,
    /// `|`
    BitOr,
    /// `&`
    BitAnd,
    /// `^`
    ExclusiveOr,
    /// `<<` / `>>`
    Shift,
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
    /// string/sequence `++`
    Concat,
    /// `==`
    Equals,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
}

impl BinaryOpCode {
    /// The mnemonic used in debug output.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
            Self::Is => "is",
            Self::IsNot => "isnot",
            Self::BitOr => "bitor",
            Self::BitAnd => "bitand",
            Self::ExclusiveOr => "xor",
            Self::Shift => "shift",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::Concat => "concat",
            Self::Equals => "equals",
            Self::LessThan => "lessthan",
            Self::LessThanEqual => "lessthanequal",
            Self::GreaterThan => "greaterthan",
            Self::GreaterThanEqual => "greaterthanequal",
        }
    }
}

/// A unary operator code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpCode {
    /// logical `not`
    Not,
    /// arithmetic negation
    Negate,
    /// bitwise complement
    Complement,
}

impl UnaryOpCode {
    /// The mnemonic used in debug output.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Negate => "negate",
            Self::Complement => "complement",
        }
    }
}

/// A non-terminator (or terminator) instruction, produced by a [`super::Builder`]
/// method and appended to a basic block.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Instruction {
    /// A two-operand arithmetic/comparison/logic op.
    BinaryOp { code: BinaryOpCode, lhs: Value, rhs: Value },
    /// A single-operand op.
    UnaryOp { code: UnaryOpCode, operand: Value },
    /// Invokes `callee` with positional then named arguments.
    Call { callee: Value, positional: Vec<Value>, named: Vec<(String, Value)> },
    /// Converts `operand` to the named target representation.
    Convert { operand: Value, target: String },
    /// Reads a named attribute off `object`.
    GetAttr { object: Value, name: String },
    /// Reads an indexed element off `object`.
    GetIndex { object: Value, index: Value },
    /// Loads the current value bound to a name.
    Load { name: String },
    /// Binds a name to a value.
    Store { name: String, value: Value },
    /// Carries deferred diagnostics into the IR (§7, item 3): a
    /// `DiagnosticOp` that survives to code generation is a compile failure.
    Diagnostics(Vec<Diagnostic>),
}

impl Instruction {
    /// The instruction's mnemonic, for debug output.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::BinaryOp { code, .. } => code.mnemonic(),
            Self::UnaryOp { code, .. } => code.mnemonic(),
            Self::Call { .. } => "call",
            Self::Convert { .. } => "convert",
            Self::GetAttr { .. } => "getattr",
            Self::GetIndex { .. } => "getindex",
            Self::Load { .. } => "load",
            Self::Store { .. } => "store",
            Self::Diagnostics(_) => "diagnostics",
        }
    }

    /// The instruction's value operands, in argument-list order, for debug
    /// output. Operands that aren't `Value`s (names, diagnostics) are
    /// rendered separately via [`Instruction::extra`].
    pub fn operands(&self) -> Vec<Value> {
        match self {
            Self::BinaryOp { lhs, rhs, .. } => vec![*lhs, *rhs],
            Self::UnaryOp { operand, .. } => vec![*operand],
            Self::Call { callee, positional, named } => {
                let mut vals = vec![*callee];
                vals.extend(positional.iter().copied());
                vals.extend(named.iter().map(|(_, v)| *v));
                vals
            }
            Self::Convert { operand, .. } => vec![*operand],
            Self::GetAttr { object, .. } => vec![*object],
            Self::GetIndex { object, index } => vec![*object, *index],
            Self::Load { .. } | Self::Store { .. } | Self::Diagnostics(_) => vec![],
        }
    }

    /// Non-`Value` detail to render after the operand list (a bound name, a
    /// conversion target, a diagnostic count).
    pub fn extra(&self) -> Option<String> {
        match self {
            Self::Convert { target, .. } => Some(target.clone()),
            Self::GetAttr { name, .. } => Some(name.clone()),
            Self::Load { name } => Some(name.clone()),
            Self::Store { name, .. } => Some(name.clone()),
            Self::Diagnostics(diags) => Some(format!("{} diagnostic(s)", diags.len())),
            _ => None,
        }
    }
}

/// The single control-flow instruction ending a basic block.
#[derive(Debug, Clone)]
pub enum Terminator {
    /// Unconditional transfer to `target`.
    Jump(BlockId),
    /// Transfers to `true_target` if `cond` holds, `false_target` otherwise.
    Branch { cond: Value, true_target: BlockId, false_target: BlockId },
    /// Exits the routine with `value`.
    Return(Value),
}

impl Terminator {
    /// The terminator's mnemonic, for debug output.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Jump(_) => "jump",
            Self::Branch { .. } => "branch",
            Self::Return(_) => "return",
        }
    }

    /// The blocks control may transfer to.
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            Self::Jump(target) => vec![*target],
            Self::Branch { true_target, false_target, .. } => vec![*true_target, *false_target],
            Self::Return(_) => vec![],
        }
    }

    /// The terminator's value operands (condition/return value), for debug
    /// output. Jump targets print as blocks, appended separately.
    pub fn operands(&self) -> Vec<Value> {
        match self {
            Self::Jump(target) => vec![Value::Block(*target)],
            Self::Branch { cond, true_target, false_target } => {
                vec![*cond, Value::Block(*true_target), Value::Block(*false_target)]
            }
            Self::Return(value) => vec![*value],
        }
    }
}
