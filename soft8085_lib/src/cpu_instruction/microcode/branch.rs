use super::*;

/// # JMP / Jcc - jump, unconditional or on condition
pub fn jmp(_memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    if condition_is_met(registers, cpu_instruction) {
        Flow::Jump(cpu_instruction.operand.word())
    } else {
        Flow::Sequential
    }
}

/// # CALL / Ccc - call a subroutine
///
/// The return address is the one of the instruction following the call.
pub fn call(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    if condition_is_met(registers, cpu_instruction) {
        registers.stack_push(memory, cpu_instruction.next_address());
        Flow::Jump(cpu_instruction.operand.word())
    } else {
        Flow::Sequential
    }
}

/// # RET / Rcc - return from subroutine
pub fn ret(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    if condition_is_met(registers, cpu_instruction) {
        Flow::Jump(registers.stack_pull(memory))
    } else {
        Flow::Sequential
    }
}

/// # RST - restart
///
/// Calls the vector held in bits 3-5 of the opcode (times 8).
pub fn rst(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    registers.stack_push(memory, cpu_instruction.next_address());

    Flow::Jump((cpu_instruction.opcode & 0x38) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_jmp() {
        let cpu_instruction =
            CPUInstruction::new(0x1000, 0xc3, "JMP", Operand::Word([0x50, 0x20]), jmp);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xc3, 0x50, 0x20]);
        let log_line = cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!("JMP".to_owned(), log_line.mnemonic);
        assert_eq!(0x2050, registers.program_counter);
    }

    #[test]
    fn test_jnz() {
        let cpu_instruction =
            CPUInstruction::new(0x1000, 0xc2, "JNZ", Operand::Word([0x50, 0x20]), jmp);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xc2, 0x50, 0x20]);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x2050, registers.program_counter);

        registers.program_counter = 0x1000;
        registers.set_z_flag(true);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x1003, registers.program_counter);
    }

    #[test]
    fn test_jpe_jm() {
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xea, 0x00, 0x30]);
        registers.set_p_flag(true);
        CPUInstruction::new(0x1000, 0xea, "JPE", Operand::Word([0x00, 0x30]), jmp)
            .execute(&mut memory, &mut registers);
        assert_eq!(0x3000, registers.program_counter);

        CPUInstruction::new(0x3000, 0xfa, "JM", Operand::Word([0x00, 0x40]), jmp)
            .execute(&mut memory, &mut registers);
        assert_eq!(0x3003, registers.program_counter);
    }

    #[test]
    fn test_call() {
        let cpu_instruction =
            CPUInstruction::new(0x1000, 0xcd, "CALL", Operand::Word([0x00, 0x20]), call);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xcd, 0x00, 0x20]);
        registers.stack_pointer = 0x3000;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x2000, registers.program_counter);
        assert_eq!(0x2ffe, registers.stack_pointer);
        assert_eq!(0x10, memory.peek(0x2fff));
        assert_eq!(0x03, memory.peek(0x2ffe));
    }

    #[test]
    fn test_cc_not_taken() {
        let cpu_instruction =
            CPUInstruction::new(0x1000, 0xdc, "CC", Operand::Word([0x00, 0x20]), call);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xdc, 0x00, 0x20]);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x1003, registers.program_counter);
        assert_eq!(0xffff, registers.stack_pointer);
    }

    #[test]
    fn test_ret() {
        let cpu_instruction = CPUInstruction::new(0x2000, 0xc9, "RET", Operand::None, ret);
        let (mut memory, mut registers) = get_stuff(0x2000, vec![0xc9]);
        registers.stack_pointer = 0x2ffe;
        memory.poke(0x2ffe, 0x03);
        memory.poke(0x2fff, 0x10);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x1003, registers.program_counter);
        assert_eq!(0x3000, registers.stack_pointer);
    }

    #[test]
    fn test_rnc_not_taken() {
        let cpu_instruction = CPUInstruction::new(0x2000, 0xd0, "RNC", Operand::None, ret);
        let (mut memory, mut registers) = get_stuff(0x2000, vec![0xd0]);
        registers.set_cy_flag(true);
        registers.stack_pointer = 0x2ffe;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x2001, registers.program_counter);
        assert_eq!(0x2ffe, registers.stack_pointer);
    }

    #[test]
    fn test_rst() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0xef, "RST 5", Operand::None, rst);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xef]);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x0028, registers.program_counter);
        assert_eq!(0xfffd, registers.stack_pointer);
        assert_eq!(0x10, memory.peek(0xfffe));
        assert_eq!(0x01, memory.peek(0xfffd));
    }
}
