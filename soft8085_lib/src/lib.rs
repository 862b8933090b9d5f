mod cpu_instruction;
pub mod memory;
mod operand;
mod processing_unit;
mod processor;
mod registers;

pub use cpu_instruction::{format_machine_code, CPUInstruction, LogLine};
pub use memory::AddressableIO;
pub use memory::RAM as Memory;
pub use operand::{Condition, Operand};
pub use processing_unit::*;
pub use processor::{Flags, Processor, ProcessorError, Snapshot, StepOutcome};
pub use registers::{Register, RegisterPair, Registers, STACK_INIT_ADDR};
