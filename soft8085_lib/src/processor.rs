use super::cpu_instruction::LogLine;
use super::memory::{AddressableIO, MemoryError, RAM as Memory, MEMMAX};
use super::processing_unit::{describe, execute_step, run_until, RunReport};
use super::registers::Registers;
use log::debug;
use std::error;
use std::fmt;

pub type Result<T> = std::result::Result<T, ProcessorError>;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ProcessorError {
    AddressOutOfRange(usize),
    ValueOutOfRange(usize),
    ProgramTooLarge(usize, usize), // start address, program length
    Halted(u16),
    Memory(MemoryError),
}

impl fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ProcessorError::AddressOutOfRange(addr) => write!(
                f,
                "address 0x{:X} is out of range, address max is 0x{:04X}",
                addr, MEMMAX
            ),
            ProcessorError::ValueOutOfRange(value) => {
                write!(f, "value 0x{:X} does not fit in a byte", value)
            }
            ProcessorError::ProgramTooLarge(start, len) => write!(
                f,
                "a program of {} bytes loaded at #0x{:04X} runs past the end of memory",
                len, start
            ),
            ProcessorError::Halted(addr) => {
                write!(f, "processor is halted at #0x{:04X}", addr)
            }
            ProcessorError::Memory(e) => write!(f, "memory error: {}", e),
        }
    }
}

impl error::Error for ProcessorError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ProcessorError::Memory(e) => Some(e),
            _ => None,
        }
    }
}

impl std::convert::From<MemoryError> for ProcessorError {
    fn from(err: MemoryError) -> ProcessorError {
        ProcessorError::Memory(err)
    }
}

fn check_address(address: usize) -> Result<u16> {
    u16::try_from(address).map_err(|_| ProcessorError::AddressOutOfRange(address))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub sign: bool,
    pub zero: bool,
    pub auxiliary_carry: bool,
    pub parity: bool,
    pub carry: bool,
}

impl Flags {
    fn from_registers(registers: &Registers) -> Flags {
        Flags {
            sign: registers.s_flag_is_set(),
            zero: registers.z_flag_is_set(),
            auxiliary_carry: registers.ac_flag_is_set(),
            parity: registers.p_flag_is_set(),
            carry: registers.cy_flag_is_set(),
        }
    }
}

/// Full copy of the processor state, memory included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub registers: Registers,
    pub flags: Flags,
    pub halted: bool,
    pub memory: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(LogLine),
    Halted(LogLine),
    Unrecognized(LogLine),
}

impl StepOutcome {
    pub fn log_line(&self) -> &LogLine {
        match self {
            StepOutcome::Advanced(l) | StepOutcome::Halted(l) | StepOutcome::Unrecognized(l) => l,
        }
    }
}

/*
 * Processor
 * Owns the registers and the 64 KiB memory. Every administrative operation
 * validates its input before touching the state.
 */
#[derive(Debug, Default)]
pub struct Processor {
    registers: Registers,
    memory: Memory,
}

impl Processor {
    pub fn new() -> Processor {
        Processor::default()
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn reset(&mut self) -> Snapshot {
        debug!("reset");
        self.registers.initialize(0x0000);
        self.memory = Memory::new();

        self.get_state()
    }

    /// Copy the program in memory and point PC at its first byte. Registers
    /// and the rest of the memory are left as they are.
    pub fn load_program(&mut self, program: &[u8], start: usize) -> Result<Snapshot> {
        let address = check_address(start)?;

        if start + program.len() > MEMMAX + 1 {
            return Err(ProcessorError::ProgramTooLarge(start, program.len()));
        }
        self.memory.write(start, program)?;
        self.registers.program_counter = address;
        self.registers.halted = false;
        debug!("loaded {} bytes at #0x{:04X}", program.len(), address);

        Ok(self.get_state())
    }

    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.registers.halted {
            return Err(ProcessorError::Halted(self.registers.program_counter));
        }
        let log_line = execute_step(&mut self.registers, &mut self.memory);

        let outcome = if !log_line.recognized {
            StepOutcome::Unrecognized(log_line)
        } else if self.registers.halted {
            StepOutcome::Halted(log_line)
        } else {
            StepOutcome::Advanced(log_line)
        };

        Ok(outcome)
    }

    pub fn run(&mut self, max_steps: usize) -> RunReport {
        run_until(&mut self.registers, &mut self.memory, max_steps, |_, _| false)
    }

    /// Run with a stop predicate checked between two instructions.
    pub fn run_until<F>(&mut self, max_steps: usize, stop: F) -> RunReport
    where
        F: FnMut(&Registers, &Memory) -> bool,
    {
        run_until(&mut self.registers, &mut self.memory, max_steps, stop)
    }

    pub fn run_from(&mut self, address: usize, max_steps: usize) -> Result<RunReport> {
        self.goto_address(address)?;

        Ok(self.run(max_steps))
    }

    /// Move PC. A halted processor is ready to run again afterwards.
    pub fn goto_address(&mut self, address: usize) -> Result<()> {
        let address = check_address(address)?;
        self.registers.program_counter = address;
        self.registers.halted = false;
        debug!("goto #0x{:04X}", address);

        Ok(())
    }

    pub fn write_memory(&mut self, address: usize, value: usize) -> Result<()> {
        let address = check_address(address)?;
        let value = u8::try_from(value).map_err(|_| ProcessorError::ValueOutOfRange(value))?;
        self.memory.poke(address, value);
        debug!("write 0x{:02X} at #0x{:04X}", value, address);

        Ok(())
    }

    pub fn get_state(&self) -> Snapshot {
        Snapshot {
            registers: self.registers.clone(),
            flags: Flags::from_registers(&self.registers),
            halted: self.registers.halted,
            memory: self.memory.as_slice().to_vec(),
        }
    }

    pub fn describe_instruction(&self, address: usize) -> Result<(String, String)> {
        let address = check_address(address)?;

        Ok(describe(self.memory.peek(address), &self.memory, address))
    }
}
