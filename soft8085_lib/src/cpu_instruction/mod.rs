#[allow(clippy::module_inception)]
mod cpu_instruction;
pub mod microcode;

pub use self::cpu_instruction::{format_machine_code, CPUInstruction, LogLine};
