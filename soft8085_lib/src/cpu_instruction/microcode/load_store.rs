use super::*;

/// STAX & LDAX use bit 4 to pick BC or DE as the pointer.
fn indirect_pair(opcode: u8) -> RegisterPair {
    if opcode & 0x10 == 0 {
        RegisterPair::BC
    } else {
        RegisterPair::DE
    }
}

/// # STA - store accumulator at a direct address
pub fn sta(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    memory.poke(cpu_instruction.operand.word(), registers.accumulator);

    Flow::Sequential
}

/// # LDA - load accumulator from a direct address
pub fn lda(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    registers.accumulator = memory.peek(cpu_instruction.operand.word());

    Flow::Sequential
}

/// # SHLD - store L then H at a direct address
pub fn shld(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let address = cpu_instruction.operand.word();
    memory.poke(address, registers.register_l);
    memory.poke(address.wrapping_add(1), registers.register_h);

    Flow::Sequential
}

/// # LHLD - load L then H from a direct address
pub fn lhld(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let address = cpu_instruction.operand.word();
    registers.register_l = memory.peek(address);
    registers.register_h = memory.peek(address.wrapping_add(1));

    Flow::Sequential
}

/// # STAX - store accumulator at the address held by BC or DE
pub fn stax(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let address = registers.get_pair(indirect_pair(cpu_instruction.opcode));
    memory.poke(address, registers.accumulator);

    Flow::Sequential
}

/// # LDAX - load accumulator from the address held by BC or DE
pub fn ldax(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let address = registers.get_pair(indirect_pair(cpu_instruction.opcode));
    registers.accumulator = memory.peek(address);

    Flow::Sequential
}
