use super::*;

/*
 * Rotations work on the accumulator only. RLC & RRC copy the bit leaving the
 * accumulator into CY, RAL & RAR rotate through CY as a ninth bit.
 */

/// # RLC - rotate accumulator left
pub fn rlc(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    let a = registers.accumulator;
    registers.accumulator = a.rotate_left(1);
    registers.set_cy_flag(a & 0x80 != 0);
    registers.update_szp(registers.accumulator);

    Flow::Sequential
}

/// # RRC - rotate accumulator right
pub fn rrc(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    let a = registers.accumulator;
    registers.accumulator = a.rotate_right(1);
    registers.set_cy_flag(a & 0x01 != 0);
    registers.update_szp(registers.accumulator);

    Flow::Sequential
}

/// # RAL - rotate accumulator left through carry
pub fn ral(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    let a = registers.accumulator;
    registers.accumulator = (a << 1) | u8::from(registers.cy_flag_is_set());
    registers.set_cy_flag(a & 0x80 != 0);
    registers.update_szp(registers.accumulator);

    Flow::Sequential
}

/// # RAR - rotate accumulator right through carry
pub fn rar(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    let a = registers.accumulator;
    registers.accumulator = (a >> 1) | if registers.cy_flag_is_set() { 0x80 } else { 0x00 };
    registers.set_cy_flag(a & 0x01 != 0);
    registers.update_szp(registers.accumulator);

    Flow::Sequential
}
