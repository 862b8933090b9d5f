use super::cpu_instruction::microcode::{self, Flow};
use super::cpu_instruction::{CPUInstruction, LogLine};
use super::memory::RAM as Memory;
use super::operand::{Condition, Operand};
use super::registers::{Register, RegisterPair, Registers};
use log::{info, trace, warn};
use std::fmt;

const ALU_MNEMONICS: [&str; 8] = ["ADD", "ADC", "SUB", "SBB", "ANA", "XRA", "ORA", "CMP"];

/*
 * operand_width
 * Number of bytes following the opcode. This is the only place where
 * instruction lengths are known: the decoder builds its operands from it and
 * the program counter advance derives from the operands.
 */
pub fn operand_width(opcode: u8) -> usize {
    match opcode {
        // MVI
        op if op & 0xc7 == 0x06 => 1,
        // ADI ACI SUI ANI XRI ORI CPI, IN & OUT
        0xc6 | 0xce | 0xd6 | 0xe6 | 0xee | 0xf6 | 0xfe | 0xdb | 0xd3 => 1,
        // LXI
        op if op & 0xcf == 0x01 => 2,
        // SHLD LHLD STA LDA JMP CALL
        0x22 | 0x2a | 0x32 | 0x3a | 0xc3 | 0xcd => 2,
        // Jcc & Ccc
        op if op & 0xc7 == 0xc2 || op & 0xc7 == 0xc4 => 2,
        _ => 0,
    }
}

fn read_operand(address: u16, opcode: u8, memory: &Memory) -> Operand {
    let first = memory.peek(address.wrapping_add(1));

    match operand_width(opcode) {
        1 => Operand::Byte([first]),
        2 => Operand::Word([first, memory.peek(address.wrapping_add(2))]),
        _ => Operand::None,
    }
}

/// Read the opcode at the given address and build the instruction.
pub fn resolve_opcode(address: u16, memory: &Memory) -> CPUInstruction {
    decode(address, memory.peek(address), memory)
}

/*
 * decode
 * Dispatch on the opcode bit patterns. Fixed opcodes come first so they are
 * not caught by the register or register pair ranges they sit in.
 */
fn decode(address: u16, opcode: u8, memory: &Memory) -> CPUInstruction {
    let operand = read_operand(address, opcode, memory);
    let dst = Register::destination(opcode);
    let src = Register::source(opcode);
    let pair = RegisterPair::from_code(opcode).name();
    let stack_pair = RegisterPair::from_stack_code(opcode).name();
    let condition = Condition::from_code(opcode).suffix();

    match opcode {
        0x00 => CPUInstruction::new(address, opcode, "NOP", operand, microcode::nop),
        0x02 | 0x12 => CPUInstruction::new(address, opcode, &format!("STAX {pair}"), operand, microcode::stax),
        0x0a | 0x1a => CPUInstruction::new(address, opcode, &format!("LDAX {pair}"), operand, microcode::ldax),
        0x07 => CPUInstruction::new(address, opcode, "RLC", operand, microcode::rlc),
        0x0f => CPUInstruction::new(address, opcode, "RRC", operand, microcode::rrc),
        0x17 => CPUInstruction::new(address, opcode, "RAL", operand, microcode::ral),
        0x1f => CPUInstruction::new(address, opcode, "RAR", operand, microcode::rar),
        0x20 => CPUInstruction::new(address, opcode, "RIM", operand, microcode::rim),
        0x22 => CPUInstruction::new(address, opcode, "SHLD", operand, microcode::shld),
        0x27 => CPUInstruction::new(address, opcode, "DAA", operand, microcode::daa),
        0x2a => CPUInstruction::new(address, opcode, "LHLD", operand, microcode::lhld),
        0x2f => CPUInstruction::new(address, opcode, "CMA", operand, microcode::cma),
        0x30 => CPUInstruction::new(address, opcode, "SIM", operand, microcode::nop),
        0x32 => CPUInstruction::new(address, opcode, "STA", operand, microcode::sta),
        0x37 => CPUInstruction::new(address, opcode, "STC", operand, microcode::stc),
        0x3a => CPUInstruction::new(address, opcode, "LDA", operand, microcode::lda),
        0x3f => CPUInstruction::new(address, opcode, "CMC", operand, microcode::cmc),
        0x76 => CPUInstruction::new(address, opcode, "HLT", operand, microcode::hlt),
        0xc3 => CPUInstruction::new(address, opcode, "JMP", operand, microcode::jmp),
        0xc9 => CPUInstruction::new(address, opcode, "RET", operand, microcode::ret),
        0xcd => CPUInstruction::new(address, opcode, "CALL", operand, microcode::call),
        0xc6 => CPUInstruction::new(address, opcode, "ADI", operand, microcode::add),
        0xce => CPUInstruction::new(address, opcode, "ACI", operand, microcode::adc),
        0xd6 => CPUInstruction::new(address, opcode, "SUI", operand, microcode::sub),
        0xe6 => CPUInstruction::new(address, opcode, "ANI", operand, microcode::ana),
        0xee => CPUInstruction::new(address, opcode, "XRI", operand, microcode::xra),
        0xf6 => CPUInstruction::new(address, opcode, "ORI", operand, microcode::ora),
        0xfe => CPUInstruction::new(address, opcode, "CPI", operand, microcode::cmp),
        0xd3 => CPUInstruction::new(address, opcode, "OUT", operand, microcode::output),
        0xdb => CPUInstruction::new(address, opcode, "IN", operand, microcode::input),
        0xeb => CPUInstruction::new(address, opcode, "XCHG", operand, microcode::xchg),
        0xf3 => CPUInstruction::new(address, opcode, "DI", operand, microcode::nop),
        0xfb => CPUInstruction::new(address, opcode, "EI", operand, microcode::nop),
        op if op & 0xcf == 0x01 => CPUInstruction::new(address, opcode, &format!("LXI {pair}"), operand, microcode::lxi),
        op if op & 0xcf == 0x03 => CPUInstruction::new(address, opcode, &format!("INX {pair}"), operand, microcode::inx),
        op if op & 0xcf == 0x09 => CPUInstruction::new(address, opcode, &format!("DAD {pair}"), operand, microcode::dad),
        op if op & 0xcf == 0x0b => CPUInstruction::new(address, opcode, &format!("DCX {pair}"), operand, microcode::dcx),
        op if op & 0xc7 == 0x04 => CPUInstruction::new(address, opcode, &format!("INR {dst}"), operand, microcode::inr),
        op if op & 0xc7 == 0x05 => CPUInstruction::new(address, opcode, &format!("DCR {dst}"), operand, microcode::dcr),
        op if op & 0xc7 == 0x06 => CPUInstruction::new(address, opcode, &format!("MVI {dst}"), operand, microcode::mvi),
        0x40..=0x7f => CPUInstruction::new(address, opcode, &format!("MOV {dst},{src}"), operand, microcode::mov),
        0x80..=0xbf => {
            let mnemonic = format!("{} {src}", ALU_MNEMONICS[((opcode >> 3) & 0b111) as usize]);
            let alu: fn(&mut Memory, &mut Registers, &CPUInstruction) -> Flow = match (opcode >> 3) & 0b111 {
                0 => microcode::add,
                1 => microcode::adc,
                2 => microcode::sub,
                3 => microcode::sbb,
                4 => microcode::ana,
                5 => microcode::xra,
                6 => microcode::ora,
                _ => microcode::cmp,
            };
            CPUInstruction::new(address, opcode, &mnemonic, operand, alu)
        }
        op if op & 0xc7 == 0xc0 => CPUInstruction::new(address, opcode, &format!("R{condition}"), operand, microcode::ret),
        op if op & 0xc7 == 0xc2 => CPUInstruction::new(address, opcode, &format!("J{condition}"), operand, microcode::jmp),
        op if op & 0xc7 == 0xc4 => CPUInstruction::new(address, opcode, &format!("C{condition}"), operand, microcode::call),
        op if op & 0xcf == 0xc1 => CPUInstruction::new(address, opcode, &format!("POP {stack_pair}"), operand, microcode::pop),
        op if op & 0xcf == 0xc5 => CPUInstruction::new(address, opcode, &format!("PUSH {stack_pair}"), operand, microcode::push),
        op if op & 0xc7 == 0xc7 => CPUInstruction::new(address, opcode, &format!("RST {}", (op >> 3) & 0b111), operand, microcode::rst),
        _ => CPUInstruction::unrecognized(address, opcode, microcode::nop),
    }
}

/// Mnemonic and formatted operand of the instruction an opcode starts at
/// the given address. Nothing is executed.
pub fn describe(opcode: u8, memory: &Memory, address: u16) -> (String, String) {
    let cpu_instruction = decode(address, opcode, memory);

    (cpu_instruction.mnemonic, cpu_instruction.operand.to_string())
}

pub fn execute_step(registers: &mut Registers, memory: &mut Memory) -> LogLine {
    let cpu_instruction = resolve_opcode(registers.program_counter, memory);

    if !cpu_instruction.recognized {
        warn!(
            "unrecognized opcode 0x{:02X} at address #0x{:04X}, executed as NOP",
            cpu_instruction.opcode, cpu_instruction.address
        );
    }

    let log_line = cpu_instruction.execute(memory, registers);
    trace!("{log_line}");

    log_line
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum RunStatus {
    Halted,
    StepCeilingReached,
    Stopped,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Halted => write!(f, "halted"),
            RunStatus::StepCeilingReached => write!(f, "did not halt"),
            RunStatus::Stopped => write!(f, "stopped"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: RunStatus,
    pub steps: usize,
    pub loglines: Vec<LogLine>,
}

/*
 * run_until
 * Execute instructions until the processor halts, the step ceiling is
 * reached or the stop predicate, checked after every step, says so.
 */
pub fn run_until<F>(
    registers: &mut Registers,
    memory: &mut Memory,
    max_steps: usize,
    mut stop: F,
) -> RunReport
where
    F: FnMut(&Registers, &Memory) -> bool,
{
    let mut loglines: Vec<LogLine> = Vec::new();

    let status = loop {
        if registers.halted {
            break RunStatus::Halted;
        }
        if loglines.len() >= max_steps {
            break RunStatus::StepCeilingReached;
        }
        loglines.push(execute_step(registers, memory));

        if !registers.halted && stop(registers, memory) {
            break RunStatus::Stopped;
        }
    };
    info!(
        "run {} after {} steps, PC=#0x{:04X}",
        status,
        loglines.len(),
        registers.program_counter
    );

    RunReport {
        status,
        steps: loglines.len(),
        loglines,
    }
}

/// Walk the memory one instruction at a time without executing anything.
pub struct MemoryParserIterator<'a> {
    address: Option<u16>,
    memory: &'a Memory,
}

impl<'a> MemoryParserIterator<'a> {
    pub fn new(address: u16, memory: &'a Memory) -> MemoryParserIterator<'a> {
        MemoryParserIterator {
            address: Some(address),
            memory,
        }
    }
}

impl<'a> Iterator for MemoryParserIterator<'a> {
    type Item = CPUInstruction;

    fn next(&mut self) -> Option<CPUInstruction> {
        let address = self.address?;
        let cpu_instruction = resolve_opcode(address, self.memory);
        let next = address as usize + 1 + cpu_instruction.operand.len();
        self.address = u16::try_from(next).ok();

        Some(cpu_instruction)
    }
}

pub fn disassemble(start: u16, count: usize, memory: &Memory) -> Vec<CPUInstruction> {
    MemoryParserIterator::new(start, memory).take(count).collect()
}
