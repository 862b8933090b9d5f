use super::*;

fn carry_in(registers: &Registers) -> u16 {
    u16::from(registers.cy_flag_is_set())
}

fn add_to_accumulator(registers: &mut Registers, value: u8, carry: u16) {
    let result = registers.accumulator as u16 + value as u16 + carry;
    registers.accumulator = result as u8;
    registers.set_cy_flag(result > 0xff);
    registers.update_szp(registers.accumulator);
}

fn sub_from_accumulator(registers: &mut Registers, value: u8, borrow: u16) {
    let subtrahend = value as u16 + borrow;
    registers.set_cy_flag((registers.accumulator as u16) < subtrahend);
    registers.accumulator = (registers.accumulator as u16).wrapping_sub(subtrahend) as u8;
    registers.update_szp(registers.accumulator);
}

/// # ADD / ADI - add to accumulator
pub fn add(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = alu_source(memory, registers, cpu_instruction);
    add_to_accumulator(registers, value, 0);

    Flow::Sequential
}

/// # ADC / ACI - add to accumulator with carry
pub fn adc(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = alu_source(memory, registers, cpu_instruction);
    let carry = carry_in(registers);
    add_to_accumulator(registers, value, carry);

    Flow::Sequential
}

/// # SUB / SUI - subtract from accumulator
///
/// CY is set when a borrow occurs.
pub fn sub(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = alu_source(memory, registers, cpu_instruction);
    sub_from_accumulator(registers, value, 0);

    Flow::Sequential
}

/// # SBB - subtract from accumulator with borrow
pub fn sbb(memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let value = alu_source(memory, registers, cpu_instruction);
    let borrow = carry_in(registers);
    sub_from_accumulator(registers, value, borrow);

    Flow::Sequential
}

/// # DAD - add a register pair to HL
///
/// Only CY is affected.
pub fn dad(_memory: &mut Memory, registers: &mut Registers, cpu_instruction: &CPUInstruction) -> Flow {
    let pair = RegisterPair::from_code(cpu_instruction.opcode);
    let result = registers.get_pair(RegisterPair::HL) as u32 + registers.get_pair(pair) as u32;
    registers.set_pair(RegisterPair::HL, result as u16);
    registers.set_cy_flag(result > 0xffff);

    Flow::Sequential
}

/// # DAA - decimal adjust accumulator
///
/// Each correction step also decides the final state of its own flag: AC
/// for the low nibble, CY for the high one.
pub fn daa(_memory: &mut Memory, registers: &mut Registers, _cpu_instruction: &CPUInstruction) -> Flow {
    let mut result = registers.accumulator as u16;

    if result & 0x0f > 0x09 || registers.ac_flag_is_set() {
        result += 0x06;
        registers.set_ac_flag(true);
    } else {
        registers.set_ac_flag(false);
    }

    if result & 0xf0 > 0x90 || registers.cy_flag_is_set() {
        result += 0x60;
        registers.set_cy_flag(true);
    } else {
        registers.set_cy_flag(false);
    }

    registers.accumulator = result as u8;
    registers.update_szp(registers.accumulator);

    Flow::Sequential
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_add() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x80, "ADD B", Operand::None, add);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x80]);
        registers.accumulator = 0x28;
        registers.register_b = 0x0a;
        let log_line = cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!("ADD B".to_owned(), log_line.mnemonic);
        assert_eq!(0x32, registers.accumulator);
        assert!(!registers.cy_flag_is_set());
        assert!(!registers.z_flag_is_set());
        assert!(!registers.s_flag_is_set());
        assert!(!registers.p_flag_is_set());
        assert_eq!(0x1001, registers.program_counter);
    }

    #[test]
    fn test_add_carry_out() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x87, "ADD A", Operand::None, add);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x87]);
        registers.accumulator = 0x80;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x00, registers.accumulator);
        assert!(registers.cy_flag_is_set());
        assert!(registers.z_flag_is_set());
        assert!(registers.p_flag_is_set());
    }

    #[test]
    fn test_adi() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0xc6, "ADI", Operand::Byte([0x01]), add);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xc6, 0x01]);
        registers.accumulator = 0x0f;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x10, registers.accumulator);
        assert!(!registers.s_flag_is_set());
        assert!(!registers.z_flag_is_set());
        assert!(!registers.p_flag_is_set());
        assert!(!registers.cy_flag_is_set());
        assert!(!registers.ac_flag_is_set());
        assert_eq!(0x1002, registers.program_counter);
    }

    #[test]
    fn test_adc_with_memory() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x8e, "ADC M", Operand::None, adc);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x8e]);
        registers.set_pair(RegisterPair::HL, 0x2000);
        memory.poke(0x2000, 0xff);
        registers.accumulator = 0x00;
        registers.set_cy_flag(true);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x00, registers.accumulator);
        assert!(registers.cy_flag_is_set());
        assert!(registers.z_flag_is_set());
    }

    #[test]
    fn test_aci() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0xce, "ACI", Operand::Byte([0x10]), adc);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xce, 0x10]);
        registers.accumulator = 0x70;
        registers.set_cy_flag(true);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x81, registers.accumulator);
        assert!(registers.s_flag_is_set());
        assert!(registers.p_flag_is_set());
        assert!(!registers.cy_flag_is_set());
    }

    #[test]
    fn test_sub_borrow() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x91, "SUB C", Operand::None, sub);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x91]);
        registers.accumulator = 0x02;
        registers.register_c = 0x03;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0xff, registers.accumulator);
        assert!(registers.cy_flag_is_set());
        assert!(registers.s_flag_is_set());
        assert!(registers.p_flag_is_set());
    }

    #[test]
    fn test_sub_itself() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x97, "SUB A", Operand::None, sub);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x97]);
        registers.accumulator = 0x3e;
        registers.set_cy_flag(true);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x00, registers.accumulator);
        assert!(!registers.cy_flag_is_set());
        assert!(registers.z_flag_is_set());
    }

    #[test]
    fn test_sui() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0xd6, "SUI", Operand::Byte([0x01]), sub);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0xd6, 0x01]);
        registers.accumulator = 0x10;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x0f, registers.accumulator);
        assert!(!registers.cy_flag_is_set());
        assert!(registers.p_flag_is_set());
        assert_eq!(0x1002, registers.program_counter);
    }

    #[test]
    fn test_sbb() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x98, "SBB B", Operand::None, sbb);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x98]);
        registers.accumulator = 0x05;
        registers.register_b = 0x05;
        registers.set_cy_flag(true);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0xff, registers.accumulator);
        assert!(registers.cy_flag_is_set());

        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x98]);
        registers.accumulator = 0x05;
        registers.register_b = 0x04;
        registers.set_cy_flag(true);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x00, registers.accumulator);
        assert!(!registers.cy_flag_is_set());
        assert!(registers.z_flag_is_set());
    }

    #[test]
    fn test_dad() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x09, "DAD B", Operand::None, dad);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x09]);
        registers.set_pair(RegisterPair::HL, 0xffff);
        registers.set_pair(RegisterPair::BC, 0x0002);
        registers.set_z_flag(true);
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x0001, registers.get_pair(RegisterPair::HL));
        assert!(registers.cy_flag_is_set());
        assert!(registers.z_flag_is_set());

        let cpu_instruction = CPUInstruction::new(0x1001, 0x39, "DAD SP", Operand::None, dad);
        registers.stack_pointer = 0x1000;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x1001, registers.get_pair(RegisterPair::HL));
        assert!(!registers.cy_flag_is_set());
    }

    #[test]
    fn test_daa() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x27, "DAA", Operand::None, daa);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x27]);
        registers.accumulator = 0x9b;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x01, registers.accumulator);
        assert!(registers.ac_flag_is_set());
        assert!(registers.cy_flag_is_set());
    }

    #[test]
    fn test_daa_no_adjustment() {
        let cpu_instruction = CPUInstruction::new(0x1000, 0x27, "DAA", Operand::None, daa);
        let (mut memory, mut registers) = get_stuff(0x1000, vec![0x27]);
        registers.accumulator = 0x42;
        cpu_instruction.execute(&mut memory, &mut registers);
        assert_eq!(0x42, registers.accumulator);
        assert!(!registers.ac_flag_is_set());
        assert!(!registers.cy_flag_is_set());
        assert!(registers.p_flag_is_set());
    }
}
