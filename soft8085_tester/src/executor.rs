use std::{
    io::{BufRead, Lines},
    sync::mpsc::Sender,
};

use anyhow::anyhow;
use log::{debug, warn};
use soft8085_lib::Processor;

use crate::{AppResult, CliCommand, CliCommandParser, Command, OutputToken, DEFAULT_MAX_STEPS};

#[derive(Debug)]
struct CommandIterator<B>
where
    B: BufRead,
{
    iterator: Lines<B>,
}

impl<B> CommandIterator<B>
where
    B: BufRead,
{
    pub fn new(iterator: Lines<B>) -> Self {
        Self { iterator }
    }
}

impl<B> Iterator for CommandIterator<B>
where
    B: BufRead,
{
    type Item = AppResult<CliCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iterator.next().map(|result| {
            result
                .map_err(|e| anyhow!(e))
                .and_then(|line| CliCommandParser::from(&line))
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfiguration {
    pub stop_on_failure: bool,
    pub max_steps: usize,
}

impl Default for ExecutorConfiguration {
    fn default() -> Self {
        Self {
            stop_on_failure: true,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

#[derive(Debug, Default)]
pub struct Executor {
    configuration: ExecutorConfiguration,
}

impl Executor {
    pub fn new(configuration: ExecutorConfiguration) -> Self {
        Self { configuration }
    }

    /// Execute the script line by line against one processor, a marker
    /// starts over with a fresh one. Every output is sent to the displayer.
    pub fn run<T: BufRead>(self, buffer: T, sender: Sender<OutputToken>) -> AppResult<()> {
        let mut processor = Processor::new();

        for (index, result) in CommandIterator::new(buffer.lines()).enumerate() {
            let line_number = index + 1;
            let command = match result {
                Err(e) if self.configuration.stop_on_failure => {
                    return Err(e.context(format!("syntax error at line {line_number}")))
                }
                Err(e) => {
                    warn!("line {line_number} skipped: {e}");
                    continue;
                }
                Ok(c) => c.with_max_steps(self.configuration.max_steps),
            };

            if matches!(command, CliCommand::None) {
                continue;
            }
            if matches!(command, CliCommand::Marker(_)) {
                processor = Processor::new();
            }
            debug!("line {line_number}: {command:?}");

            let token = match command.execute(&mut processor) {
                Err(e) if self.configuration.stop_on_failure => {
                    return Err(e.context(format!("command failed at line {line_number}")))
                }
                Err(e) => {
                    warn!("line {line_number} failed: {e}");
                    continue;
                }
                Ok(token) => token,
            };
            let failed = matches!(token, OutputToken::Assertion { failure: Some(_), .. });

            sender.send(token)?;

            if failed && self.configuration.stop_on_failure {
                return Err(anyhow!("assertion failed at line {line_number}"));
            }
        }

        Ok(())
    }
}
