//! Debug pretty-printer (§4.6.7): renders a routine's basic blocks in
//! traversal order, `%BB:II` value references, `blockBB:` headers.

use super::{Literal, Routine, Value};
use std::fmt::Write as _;

fn literal_str(lit: Literal) -> &'static str {
    match lit {
        Literal::Void => "void",
        Literal::True => "true",
        Literal::False => "false",
    }
}

fn print_value(out: &mut String, routine: &Routine, block_idx: &std::collections::HashMap<super::BlockId, usize>, val: Value) {
    match val {
        Value::Literal(lit) => {
            let _ = write!(out, "{}", literal_str(lit));
        }
        Value::Instr(block, idx) => {
            let _ = write!(out, "%{:02}:{:02}", block_idx[&block], idx + 1);
        }
        Value::Terminator(block) => {
            let n = routine.block(block).instructions().len();
            let _ = write!(out, "%{:02}:{:02}", block_idx[&block], n + 1);
        }
        Value::Block(block) => {
            let _ = write!(out, "block{:02}", block_idx[&block]);
        }
    }
}

/// Write `routine`'s body to `out` in the debug pretty-printed form.
pub fn debug_routine_body(routine: &Routine, out: &mut String) {
    let order = routine.basic_blocks();
    let block_idx: std::collections::HashMap<super::BlockId, usize> =
        order.iter().enumerate().map(|(i, b)| (*b, i)).collect();

    for (i, &block_id) in order.iter().enumerate() {
        let _ = writeln!(out, "block{i:02}:");
        let block = routine.block(block_id);
        for (ii, instr) in block.instructions().iter().enumerate() {
            let _ = write!(out, "    %{i:02}:{:02} = {}", ii + 1, instr.mnemonic());
            let operands = instr.operands();
            for (oi, op) in operands.iter().enumerate() {
                let _ = write!(out, "{}", if oi == 0 { " " } else { ", " });
                print_value(out, routine, &block_idx, *op);
            }
            if let Some(extra) = instr.extra() {
                let _ = write!(out, " {extra}");
            }
            out.push('\n');
        }
        if let Some(term) = block.terminator() {
            let ii = block.instructions().len() + 1;
            let _ = write!(out, "    %{i:02}:{ii:02} = {}", term.mnemonic());
            for (oi, op) in term.operands().iter().enumerate() {
                let _ = write!(out, "{}", if oi == 0 { " " } else { ", " });
                print_value(out, routine, &block_idx, *op);
            }
            out.push('\n');
        }
        out.push('\n');
    }
}

/// As [`debug_routine_body`], returning a fresh `String`.
pub fn debug_routine_body_str(routine: &Routine) -> String {
    let mut out = String::new();
    debug_routine_body(routine, &mut out);
    out
}
