use super::microcode::Flow;
use crate::memory::RAM as Memory;
use crate::operand::Operand;
use crate::registers::{RegisterPair, Registers};
use std::fmt;

pub type BoxedMicrocode = Box<dyn Fn(&mut Memory, &mut Registers, &CPUInstruction) -> Flow>;

pub struct CPUInstruction {
    pub address: u16,
    pub opcode: u8,
    pub mnemonic: String,
    pub operand: Operand,
    pub microcode: BoxedMicrocode,
    pub recognized: bool,
}

impl CPUInstruction {
    pub fn new(
        address: u16,
        opcode: u8,
        mnemonic: &str,
        operand: Operand,
        microcode: impl Fn(&mut Memory, &mut Registers, &CPUInstruction) -> Flow + 'static,
    ) -> CPUInstruction {
        CPUInstruction {
            address,
            opcode,
            mnemonic: mnemonic.to_owned(),
            operand,
            microcode: Box::new(microcode),
            recognized: true,
        }
    }

    /// An opcode outside the instruction table. It executes as a NOP.
    pub fn unrecognized(
        address: u16,
        opcode: u8,
        microcode: impl Fn(&mut Memory, &mut Registers, &CPUInstruction) -> Flow + 'static,
    ) -> CPUInstruction {
        CPUInstruction {
            recognized: false,
            ..CPUInstruction::new(address, opcode, "UNKNOWN", Operand::None, microcode)
        }
    }

    /// Address of the instruction right after this one.
    pub fn next_address(&self) -> u16 {
        self.address
            .wrapping_add(1)
            .wrapping_add(self.operand.len() as u16)
    }

    /*
     * execute
     * Run the microcode then move the program counter to the address it
     * asked for. Microcodes never touch the program counter themselves.
     */
    pub fn execute(&self, memory: &mut Memory, registers: &mut Registers) -> LogLine {
        registers.program_counter = match (self.microcode)(memory, registers, self) {
            Flow::Sequential => self.next_address(),
            Flow::Jump(target) => target,
        };

        LogLine::new(self, format_outcome(registers))
    }

    pub fn machine_code(&self) -> String {
        format_machine_code(self.opcode, &self.operand)
    }
}

impl fmt::Display for CPUInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#0x{:04X}: {: <11}{: <8} {: <6}",
            self.address,
            format!("({})", self.machine_code().to_lowercase()),
            self.mnemonic,
            self.operand
        )
    }
}

/// Opcode and operand bytes as they sit in memory: `3E 05`.
pub fn format_machine_code(opcode: u8, operand: &Operand) -> String {
    let mut bytes = vec![opcode];
    bytes.extend(operand.get_operands());

    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<String>>()
        .join(" ")
}

fn format_outcome(registers: &Registers) -> String {
    format!(
        "[A=0x{:02x}][BC=0x{:04x}][DE=0x{:04x}][HL=0x{:04x}][SP=0x{:04x}][S={}]",
        registers.accumulator,
        registers.get_pair(RegisterPair::BC),
        registers.get_pair(RegisterPair::DE),
        registers.get_pair(RegisterPair::HL),
        registers.stack_pointer,
        registers.format_status()
    )
}

/// One executed instruction, as kept in the run history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub address: u16,
    pub opcode: u8,
    pub mnemonic: String,
    pub operand: Operand,
    pub outcome: String,
    pub recognized: bool,
}

impl LogLine {
    pub fn new(cpu_instruction: &CPUInstruction, outcome: String) -> LogLine {
        LogLine {
            address: cpu_instruction.address,
            opcode: cpu_instruction.opcode,
            mnemonic: cpu_instruction.mnemonic.clone(),
            operand: cpu_instruction.operand,
            outcome,
            recognized: cpu_instruction.recognized,
        }
    }

    pub fn machine_code(&self) -> String {
        format_machine_code(self.opcode, &self.operand)
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#0x{:04X}: {: <11}{: <8} {: <6} {}",
            self.address,
            format!("({})", self.machine_code().to_lowercase()),
            self.mnemonic,
            self.operand,
            self.outcome
        )
    }
}
