pub use super::cpu_instruction::*;
pub use crate::memory::RAM as Memory;
pub use crate::operand::{Condition, Operand};
pub use crate::registers::{Register, RegisterPair, Registers};

mod arithmetic;
mod branch;
mod control;
mod inc_dec;
mod load_store;
mod logical;
mod rotate;
mod stack;
mod transfer;

pub use arithmetic::{adc, add, daa, dad, sbb, sub};
pub use branch::{call, jmp, ret, rst};
pub use control::{hlt, input, nop, output, rim};
pub use inc_dec::{dcr, dcx, inr, inx};
pub use load_store::{lda, ldax, lhld, shld, sta, stax};
pub use logical::{ana, cma, cmc, cmp, ora, stc, xra};
pub use rotate::{ral, rar, rlc, rrc};
pub use stack::{pop, push};
pub use transfer::{lxi, mov, mvi, xchg};

/// Where the program counter goes once a microcode is done.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Flow {
    Sequential,
    Jump(u16),
}

/*
 * The ALU group shares its microcodes between the register forms (source
 * in bits 0-2) and the immediate forms (source is the operand byte).
 */
fn alu_source(memory: &Memory, registers: &Registers, cpu_instruction: &CPUInstruction) -> u8 {
    match cpu_instruction.operand {
        Operand::Byte(v) => v[0],
        _ => registers.read_register(Register::source(cpu_instruction.opcode), memory),
    }
}

/// Conditional forms carry their condition in bits 3-5, the unconditional
/// ones (JMP, CALL, RET) always go.
fn condition_is_met(registers: &Registers, cpu_instruction: &CPUInstruction) -> bool {
    match cpu_instruction.opcode {
        0xc3 | 0xc9 | 0xcd => true,
        opcode => Condition::from_code(opcode).is_met(registers),
    }
}
