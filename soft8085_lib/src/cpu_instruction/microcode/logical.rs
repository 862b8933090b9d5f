use super::*;

fn store_logical(registers: &mut Registers, result: u8) {
    registers.accumulator = result;
    registers.set_cy_flag(false);
    registers.update_szp(result);
}

/// # ANA / ANI - logical AND with accumulator
pub fn ana(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = alu_source(memory, registers, cpu_instruction);
    let result = registers.accumulator & value;
    store_logical(registers, result);

    Flow::Sequential
}

/// # XRA / XRI - logical XOR with accumulator
pub fn xra(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = alu_source(memory, registers, cpu_instruction);
    let result = registers.accumulator ^ value;
    store_logical(registers, result);

    Flow::Sequential
}

/// # ORA / ORI - logical OR with accumulator
pub fn ora(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = alu_source(memory, registers, cpu_instruction);
    let result = registers.accumulator | value;
    store_logical(registers, result);

    Flow::Sequential
}

/// # CMP / CPI - compare with accumulator
///
/// Flags as a subtraction, the accumulator is left untouched.
pub fn cmp(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = alu_source(memory, registers, cpu_instruction);
    registers.set_cy_flag(registers.accumulator < value);
    registers.update_szp(registers.accumulator.wrapping_sub(value));

    Flow::Sequential
}

/// # CMA - complement accumulator
pub fn cma(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    registers.accumulator = !registers.accumulator;

    Flow::Sequential
}

/// # CMC - complement carry
pub fn cmc(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    registers.set_cy_flag(!registers.cy_flag_is_set());

    Flow::Sequential
}

/// # STC - set carry
pub fn stc(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    registers.set_cy_flag(true);

    Flow::Sequential
}
