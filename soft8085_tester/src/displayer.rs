use std::{io::Write, sync::mpsc::Receiver};

use soft8085_lib::RunStatus;

use crate::{AppResult, OutputToken};

pub trait Displayer {
    fn display(&mut self, receiver: Receiver<OutputToken>) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct CliDisplayer<T>
where
    T: Write,
{
    output: T,
    verbose: bool,
}

impl<T> CliDisplayer<T>
where
    T: Write,
{
    pub fn new(output: T, verbose: bool) -> Self {
        Self { output, verbose }
    }

    fn write_lines(&mut self, prefix: &str, lines: &[String]) -> AppResult<()> {
        for line in lines {
            self.output
                .write_all(format!("{prefix} {line}\n").as_bytes())?;
        }

        Ok(())
    }
}

impl<T> Displayer for CliDisplayer<T>
where
    T: Write,
{
    fn display(&mut self, receiver: Receiver<OutputToken>) -> AppResult<()> {
        let mut i: u32 = 0;

        while let Ok(token) = receiver.recv() {
            match token {
                OutputToken::Assertion {
                    failure,
                    description,
                } => {
                    i += 1;
                    let line = match failure {
                        None => format!("{i:02} → {description} ✅\n"),
                        Some(message) => format!("{i:02} → {description} ❌ {message}\n"),
                    };
                    self.output.write_all(line.as_bytes())?;
                }
                OutputToken::Marker { description } => {
                    self.output
                        .write_all(format!("♯ {description}\n").as_bytes())?;
                }
                OutputToken::Run { loglines, status } => {
                    if self.verbose {
                        self.write_lines("⚡", &loglines)?;
                    }
                    if status == RunStatus::StepCeilingReached {
                        self.output.write_all(
                            format!(
                                "⚠ program {status} after {} instructions\n",
                                loglines.len()
                            )
                            .as_bytes(),
                        )?;
                    }
                }
                OutputToken::Setup(lines) if self.verbose => {
                    self.write_lines("⚙", &lines)?;
                }
                OutputToken::View(lines) => {
                    self.write_lines("📄", &lines)?;
                }
                _ => (),
            }
        }

        Ok(())
    }
}
