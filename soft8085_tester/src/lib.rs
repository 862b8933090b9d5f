mod commands;
mod config;
mod displayer;
mod executor;
mod pest_parser;
mod until_condition;

pub use commands::*;
pub use config::Config;
pub use displayer::{CliDisplayer, Displayer};
pub use executor::{Executor, ExecutorConfiguration};
pub use pest_parser::CliCommandParser;

pub type AppResult<T> = anyhow::Result<T>;
