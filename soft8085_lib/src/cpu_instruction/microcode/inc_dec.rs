use super::*;

/// # INR - increment register (or M)
///
/// S, Z & P are updated, CY is left as is.
pub fn inr(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let register = Register::destination(cpu_instruction.opcode);
    let result = registers.read_register(register, memory).wrapping_add(1);
    registers.write_register(register, memory, result);
    registers.update_szp(result);

    Flow::Sequential
}

/// # DCR - decrement register (or M)
pub fn dcr(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let register = Register::destination(cpu_instruction.opcode);
    let result = registers.read_register(register, memory).wrapping_sub(1);
    registers.write_register(register, memory, result);
    registers.update_szp(result);

    Flow::Sequential
}

/// # INX - increment register pair, no flags
pub fn inx(_memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let pair = RegisterPair::from_code(cpu_instruction.opcode);
    registers.set_pair(pair, registers.get_pair(pair).wrapping_add(1));

    Flow::Sequential
}

/// # DCX - decrement register pair, no flags
pub fn dcx(_memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let pair = RegisterPair::from_code(cpu_instruction.opcode);
    registers.set_pair(pair, registers.get_pair(pair).wrapping_sub(1));

    Flow::Sequential
}
