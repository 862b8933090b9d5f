use super::*;

/// # MOV - copy a register (or M) into another
///
/// The M,M encoding is HLT and never reaches this microcode.
pub fn mov(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = registers.read_register(Register::source(cpu_instruction.opcode), memory);
    registers.write_register(Register::destination(cpu_instruction.opcode), memory, value);

    Flow::Sequential
}

/// # MVI - move immediate byte into a register (or M)
pub fn mvi(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    registers.write_register(
        Register::destination(cpu_instruction.opcode),
        memory,
        cpu_instruction.operand.byte(),
    );

    Flow::Sequential
}

/// # LXI - load a 16 bits immediate into BC, DE, HL or SP
pub fn lxi(_memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    registers.set_pair(
        RegisterPair::from_code(cpu_instruction.opcode),
        cpu_instruction.operand.word(),
    );

    Flow::Sequential
}

/// # XCHG - swap HL and DE
pub fn xchg(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    let de = registers.get_pair(RegisterPair::DE);
    let hl = registers.get_pair(RegisterPair::HL);
    registers.set_pair(RegisterPair::DE, hl);
    registers.set_pair(RegisterPair::HL, de);

    Flow::Sequential
}
