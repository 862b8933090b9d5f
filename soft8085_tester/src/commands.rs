use anyhow::anyhow;
use soft8085_lib::{disassemble, Processor, RunReport, RunStatus, StepOutcome};

use crate::{
    until_condition::{Assignment, BooleanExpression},
    AppResult,
};

/// Instruction ceiling of a `run` when nothing else is configured.
pub const DEFAULT_MAX_STEPS: usize = 100_000;

const DUMP_LINE_WIDTH: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub enum OutputToken {
    Assertion {
        failure: Option<String>,
        description: String,
    },
    Marker {
        description: String,
    },
    Run {
        loglines: Vec<String>,
        status: RunStatus,
    },
    Setup(Vec<String>),
    View(Vec<String>),
}

pub trait Command {
    fn execute(&self, processor: &mut Processor) -> AppResult<OutputToken>;
}

#[derive(Debug)]
pub enum CliCommand {
    Assert(AssertCommand),
    Disassemble { start: usize, count: usize },
    Goto(usize),
    Load { address: usize, bytes: Vec<u8> },
    Marker(String),
    Memory(MemoryCommand),
    None,
    Registers(RegisterCommand),
    Reset,
    Run(RunCommand),
    Step,
}

impl CliCommand {
    /// Set the instruction ceiling of a `run` command, other commands are
    /// returned untouched.
    pub fn with_max_steps(self, max_steps: usize) -> Self {
        match self {
            Self::Run(command) => Self::Run(RunCommand {
                max_steps,
                ..command
            }),
            command => command,
        }
    }
}

impl Command for CliCommand {
    fn execute(&self, processor: &mut Processor) -> AppResult<OutputToken> {
        match self {
            Self::Assert(command) => command.execute(processor),
            Self::Disassemble { start, count } => {
                let start = u16::try_from(*start)
                    .map_err(|_| anyhow!("Address 0x{start:X} is out of memory range."))?;
                let lines = disassemble(start, *count, processor.memory())
                    .iter()
                    .map(|instruction| instruction.to_string())
                    .collect();

                Ok(OutputToken::View(lines))
            }
            Self::Goto(address) => {
                processor.goto_address(*address)?;

                Ok(OutputToken::Setup(vec![format!(
                    "program counter set to #0x{address:04X}"
                )]))
            }
            Self::Load { address, bytes } => {
                processor.load_program(bytes, *address)?;

                Ok(OutputToken::Setup(vec![format!(
                    "{} bytes loaded at #0x{address:04X}",
                    bytes.len()
                )]))
            }
            Self::Marker(description) => Ok(OutputToken::Marker {
                description: description.to_owned(),
            }),
            Self::Memory(command) => command.execute(processor),
            Self::None => Ok(OutputToken::Setup(Vec::new())),
            Self::Registers(command) => command.execute(processor),
            Self::Reset => {
                processor.reset();

                Ok(OutputToken::Setup(vec!["processor reset".to_string()]))
            }
            Self::Run(command) => command.execute(processor),
            Self::Step => {
                let outcome = processor.step()?;
                let status = match outcome {
                    StepOutcome::Halted(_) => RunStatus::Halted,
                    _ => RunStatus::Stopped,
                };

                Ok(OutputToken::Run {
                    loglines: vec![outcome.log_line().to_string()],
                    status,
                })
            }
        }
    }
}

#[derive(Debug)]
pub struct AssertCommand {
    pub condition: BooleanExpression,
    pub comment: String,
}

impl Command for AssertCommand {
    fn execute(&self, processor: &mut Processor) -> AppResult<OutputToken> {
        let token = OutputToken::Assertion {
            failure: self
                .condition
                .solve(processor.registers(), processor.memory()),
            description: self.comment.clone(),
        };

        Ok(token)
    }
}

#[derive(Debug)]
pub struct RunCommand {
    pub stop_condition: Option<BooleanExpression>,
    pub start_address: Option<usize>,
    pub max_steps: usize,
}

impl Command for RunCommand {
    fn execute(&self, processor: &mut Processor) -> AppResult<OutputToken> {
        if let Some(address) = self.start_address {
            processor.goto_address(address)?;
        }

        let report: RunReport = match &self.stop_condition {
            Some(condition) => processor.run_until(self.max_steps, |registers, memory| {
                condition.is_true(registers, memory)
            }),
            None => processor.run(self.max_steps),
        };
        let token = OutputToken::Run {
            loglines: report.loglines.iter().map(|l| l.to_string()).collect(),
            status: report.status,
        };

        Ok(token)
    }
}

#[derive(Debug)]
pub enum RegisterCommand {
    Set(Assignment),
    Show,
}

impl Command for RegisterCommand {
    fn execute(&self, processor: &mut Processor) -> AppResult<OutputToken> {
        let token = match self {
            Self::Set(assignment) => OutputToken::Setup(assignment.execute(processor.registers_mut())?),
            Self::Show => OutputToken::View(vec![format!("{:?}", processor.registers())]),
        };

        Ok(token)
    }
}

#[derive(Debug)]
pub enum MemoryCommand {
    Show { address: usize, lines: usize },
    Write { address: usize, bytes: Vec<u8> },
}

impl Command for MemoryCommand {
    fn execute(&self, processor: &mut Processor) -> AppResult<OutputToken> {
        let token = match self {
            Self::Show { address, lines } => {
                let content = processor.memory().as_slice();

                if *address >= content.len() {
                    return Err(anyhow!("Address 0x{address:X} is out of memory range."));
                }
                let end = content
                    .len()
                    .min(address.saturating_add(lines.saturating_mul(DUMP_LINE_WIDTH)));
                let dump = content[*address..end]
                    .chunks(DUMP_LINE_WIDTH)
                    .enumerate()
                    .map(|(i, chunk)| {
                        let bytes = chunk
                            .iter()
                            .map(|b| format!("{b:02x}"))
                            .collect::<Vec<String>>()
                            .join(" ");

                        format!("#0x{:04X}: {bytes}", address + i * DUMP_LINE_WIDTH)
                    })
                    .collect();

                OutputToken::View(dump)
            }
            Self::Write { address, bytes } => {
                if address.saturating_add(bytes.len()) > processor.memory().as_slice().len() {
                    return Err(anyhow!(
                        "Writing {} bytes at #0x{address:04X} runs past the end of memory.",
                        bytes.len()
                    ));
                }
                for (offset, byte) in bytes.iter().enumerate() {
                    processor.write_memory(address + offset, *byte as usize)?;
                }
                let message = match bytes.len() {
                    0 => "nothing was written".to_string(),
                    1 => "1 byte written".to_string(),
                    n => format!("{n} bytes written"),
                };

                OutputToken::Setup(vec![message])
            }
        };

        Ok(token)
    }
}
