use super::*;

/// # PUSH - push a register pair (or the PSW) on the stack
pub fn push(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = registers.get_pair(RegisterPair::from_stack_code(cpu_instruction.opcode));
    registers.stack_push(memory, value);

    Flow::Sequential
}

/// # POP - pull a register pair (or the PSW) from the stack
///
/// POP PSW restores every flag, AC included.
pub fn pop(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = registers.stack_pull(memory);
    registers.set_pair(RegisterPair::from_stack_code(cpu_instruction.opcode), value);

    Flow::Sequential
}
