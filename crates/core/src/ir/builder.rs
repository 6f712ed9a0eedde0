//! Imperative instruction-builder API (§4.6, §6): holds a "current" block
//! and appends to it.

use super::{BinaryOpCode, BlockId, Instruction, Literal, Loop, LoopId, Routine, Terminator, UnaryOpCode, Value};
use talus_diagnostics::Diagnostic;

/// Builds instructions into one basic block of a [`Routine`] at a time.
///
/// `SwitchBasicBlock` repoints a `Builder` at a different block of the same
/// routine; this is how `if`/loop lowering weaves several blocks together
/// without needing a fresh builder per block.
pub struct Builder<'r> {
    routine: &'r mut Routine,
    current: BlockId,
}

impl<'r> Builder<'r> {
    /// Start building at `routine`'s entry block.
    pub fn new(routine: &'r mut Routine) -> Self {
        let current = routine.entry();
        Self { routine, current }
    }

    /// The block this builder currently appends to.
    pub fn current_block(&self) -> BlockId {
        self.current
    }

    /// Re-point the builder at `block` (§4.6.4). Subsequent appends target
    /// `block` instead.
    pub fn switch_basic_block(&mut self, block: BlockId) {
        self.current = block;
    }

    /// Allocate a new, empty block in the same routine (§4.6.2). If the
    /// current block belongs to a loop, the new block inherits that loop.
    pub fn new_basic_block(&mut self) -> BlockId {
        let loop_id = self.routine.block(self.current).loop_id();
        let id = self.routine.new_basic_block_inner(loop_id);
        if let Some(l) = loop_id {
            self.routine.loops[l.0].body.insert(id);
        }
        id
    }

    /// Allocate a new loop whose header is a fresh block (§4.6.3). The new
    /// loop's parent is the loop (if any) containing the current block.
    pub fn new_loop(&mut self) -> BlockId {
        let parent = self.routine.block(self.current).loop_id();
        let loop_id = self.routine.new_loop_inner(parent);
        self.routine.loop_(loop_id).header()
    }

    /// Look up a loop by id.
    pub fn loop_(&self, id: LoopId) -> &Loop {
        self.routine.loop_(id)
    }

    fn append(&mut self, instr: Instruction) -> Value {
        self.routine.append(self.current, instr)
    }

    fn terminate(&mut self, term: Terminator) -> Value {
        self.routine.terminate(self.current, term)
    }

    /// `lhs + rhs`
    pub fn add(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::Add, lhs, rhs })
    }

    /// `lhs - rhs`
    pub fn subtract(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::Subtract, lhs, rhs })
    }

    /// `lhs * rhs`
    pub fn multiply(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::Multiply, lhs, rhs })
    }

    /// `lhs / rhs`
    pub fn divide(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::Divide, lhs, rhs })
    }

    /// `lhs % rhs`
    pub fn modulo(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::Modulo, lhs, rhs })
    }

    /// `lhs & rhs`
    pub fn and(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::BitAnd, lhs, rhs })
    }

    /// `lhs | rhs`
    pub fn or(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::BitOr, lhs, rhs })
    }

    /// `lhs ^ rhs`
    pub fn exclusive_or(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::ExclusiveOr, lhs, rhs })
    }

    /// `!operand`
    pub fn not(&mut self, operand: Value) -> Value {
        self.append(Instruction::UnaryOp { code: UnaryOpCode::Not, operand })
    }

    /// `lhs << rhs` / `lhs >> rhs`
    pub fn shift(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::Shift, lhs, rhs })
    }

    /// `lhs ++ rhs`
    pub fn concat(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::Concat, lhs, rhs })
    }

    /// `lhs == rhs`
    pub fn equals(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::Equals, lhs, rhs })
    }

    /// `lhs < rhs`
    pub fn less_than(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::LessThan, lhs, rhs })
    }

    /// `lhs <= rhs`
    pub fn less_than_equal(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::LessThanEqual, lhs, rhs })
    }

    /// `lhs > rhs`
    pub fn greater_than(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::GreaterThan, lhs, rhs })
    }

    /// `lhs >= rhs`
    pub fn greater_than_equal(&mut self, lhs: Value, rhs: Value) -> Value {
        self.append(Instruction::BinaryOp { code: BinaryOpCode::GreaterThanEqual, lhs, rhs })
    }

    /// Calls `callee` with `positional` then `named` arguments.
    pub fn call(&mut self, callee: Value, positional: Vec<Value>, named: Vec<(String, Value)>) -> Value {
        self.append(Instruction::Call { callee, positional, named })
    }

    /// Converts `operand` to the representation named `target`.
    pub fn convert(&mut self, operand: Value, target: impl Into<String>) -> Value {
        self.append(Instruction::Convert { operand, target: target.into() })
    }

    /// Reads attribute `name` off `object`.
    pub fn get_attr(&mut self, object: Value, name: impl Into<String>) -> Value {
        self.append(Instruction::GetAttr { object, name: name.into() })
    }

    /// Reads the element at `index` off `object`.
    pub fn get_index(&mut self, object: Value, index: Value) -> Value {
        self.append(Instruction::GetIndex { object, index })
    }

    /// Loads the value currently bound to `name`.
    pub fn load(&mut self, name: impl Into<String>) -> Value {
        self.append(Instruction::Load { name: name.into() })
    }

    /// Binds `name` to `value`.
    pub fn store(&mut self, name: impl Into<String>, value: Value) -> Value {
        self.append(Instruction::Store { name: name.into(), value })
    }

    /// Terminates the current block with a conditional branch.
    pub fn branch(&mut self, cond: Value, true_target: BlockId, false_target: BlockId) -> Value {
        self.terminate(Terminator::Branch { cond, true_target, false_target })
    }

    /// Terminates the current block with an unconditional jump.
    pub fn jump(&mut self, target: BlockId) -> Value {
        self.terminate(Terminator::Jump(target))
    }

    /// Terminates the current block, returning `value` from the routine.
    pub fn ret(&mut self, value: Value) -> Value {
        self.terminate(Terminator::Return(value))
    }

    /// Appends a late-stage diagnostic pseudo-instruction (§7, item 3).
    pub fn diagnostics(&mut self, diagnostics: Vec<Diagnostic>) -> Value {
        self.append(Instruction::Diagnostics(diagnostics))
    }

    /// The `Void` singleton, as a value.
    pub fn void(&self) -> Value {
        Value::Literal(Literal::Void)
    }

    /// The `True` singleton, as a value.
    pub fn true_(&self) -> Value {
        Value::Literal(Literal::True)
    }

    /// The `False` singleton, as a value.
    pub fn false_(&self) -> Value {
        Value::Literal(Literal::False)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_then_append_panics() {
        let mut routine = Routine::new();
        let mut b = Builder::new(&mut routine);
        let target = b.new_basic_block();
        b.jump(target);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            b.not(Value::Literal(Literal::True));
        }));
        assert!(result.is_err());
    }

    #[test]
    fn jump_sets_terminator_to_expected_target() {
        let mut routine = Routine::new();
        let entry = routine.entry();
        let mut b = Builder::new(&mut routine);
        let target = b.new_basic_block();
        b.jump(target);
        match routine.block(entry).terminator() {
            Some(Terminator::Jump(t)) => assert_eq!(*t, target),
            other => panic!("expected Jump terminator, got {other:?}"),
        }
    }

    #[test]
    fn new_loop_parent_matches_innermost_enclosing_loop() {
        let mut routine = Routine::new();
        let mut b = Builder::new(&mut routine);
        let outer_header = b.new_loop();
        b.switch_basic_block(outer_header);
        let inner_header = b.new_loop();
        let inner_loop_id = routine.block(inner_header).loop_id().unwrap();
        let outer_loop_id = routine.block(outer_header).loop_id().unwrap();
        assert_eq!(routine.loop_(inner_loop_id).parent(), Some(outer_loop_id));
    }

    #[test]
    fn new_basic_block_inherits_current_loop() {
        let mut routine = Routine::new();
        let mut b = Builder::new(&mut routine);
        let header = b.new_loop();
        b.switch_basic_block(header);
        let body_block = b.new_basic_block();
        assert_eq!(routine.block(body_block).loop_id(), routine.block(header).loop_id());
        let loop_id = routine.block(header).loop_id().unwrap();
        assert!(routine.loop_(loop_id).blocks().any(|b| b == body_block));
    }
}
