use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
    sync::mpsc::channel,
    thread::spawn,
};

use ansi_term::Colour;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use soft8085_tester::{CliDisplayer, Config, Displayer, Executor, OutputToken};

/// 8085 code tester
/// This program allows step by step execution of an 8085 processor and
/// assertions on memory, registers or flags.
/// It takes a script as parameter (or standard input) to execute tests.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct CommandLineArguments {
    /// Test script file location ("-" to read from standard input)
    #[arg(short, long)]
    filepath: PathBuf,

    /// Do not stop execution when an assertion fails
    #[arg(short, long)]
    continue_on_failure: bool,

    /// Display not only assertion results but also setup commands output
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of instructions executed by a single run
    #[arg(short, long)]
    max_steps: Option<usize>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl CommandLineArguments {
    fn as_config(&self) -> Config {
        Config {
            max_steps: self.max_steps,
            continue_on_failure: self.continue_on_failure.then_some(true),
            verbose: self.verbose.then_some(true),
        }
    }
}

fn open_script(filepath: &PathBuf) -> Result<Box<dyn BufRead + Send>> {
    if filepath.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(filepath)
        .with_context(|| format!("Could not open script file {}", filepath.display()))?;

    Ok(Box::new(BufReader::new(file)))
}

fn execute(parameters: CommandLineArguments) -> Result<()> {
    let config = match &parameters.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .merge(parameters.as_config());
    info!("configuration: {config:?}");

    let script = open_script(&parameters.filepath)?;
    let executor = Executor::new(config.executor_configuration());
    let (sender, receiver) = channel::<OutputToken>();
    let mut displayer = CliDisplayer::new(io::stdout(), config.is_verbose());
    let handler = spawn(move || displayer.display(receiver));

    let result = executor.run(script, sender);
    handler
        .join()
        .map_err(|_| anyhow!("the display thread panicked"))??;

    result
}

fn main() {
    env_logger::init();
    let parameters = CommandLineArguments::parse();

    if let Err(e) = execute(parameters) {
        eprintln!("{}", Colour::Red.paint(format!("{e:#}")));
        std::process::exit(1);
    }
}
