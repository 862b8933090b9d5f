use super::*;

/// Value read by IN, there is no device on the bus.
pub const INPUT_PORT_VALUE: u8 = 0xff;
/// Value read by RIM, no interrupt is ever pending nor masked.
pub const INTERRUPT_MASK_VALUE: u8 = 0x00;

/// # NOP - no operation
///
/// Also used for DI, EI, SIM and opcodes out of the instruction table.
pub fn nop(_memory: &mut Memory, _registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    Flow::Sequential
}

/// # HLT - halt the processor
pub fn hlt(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    registers.halted = true;

    Flow::Sequential
}

/// # IN - read from an input port
pub fn input(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    registers.accumulator = INPUT_PORT_VALUE;

    Flow::Sequential
}

/// # OUT - write to an output port
///
/// The port byte is consumed, nothing is written anywhere.
pub fn output(_memory: &mut Memory, _registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    Flow::Sequential
}

/// # RIM - read interrupt mask
pub fn rim(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    registers.accumulator = INTERRUPT_MASK_VALUE;

    Flow::Sequential
}
