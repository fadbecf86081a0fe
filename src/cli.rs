use clap::{Parser, Subcommand};
use stopwatch::console::Format;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about)]
pub struct Arguments {
    #[arg(short = 'v', long = None, env = "STOPWATCH_VERBOSITY", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[arg(short, long, env = "STOPWATCH_FORMAT", value_enum, default_value_t = Format::Text)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drive a lap stopwatch with commands read from standard input.
    Console,
    /// Replay a scripted session with random pauses.
    Demo(Demo),
}

#[derive(Debug, Parser)]
pub struct Demo {
    /// Record laps during the session.
    #[arg(short, long)]
    pub laps: bool,

    /// Pauses between steps last a random whole number of seconds below this.
    #[arg(short, long, env = "STOPWATCH_MAX_DELAY", default_value_t = 5)]
    pub max_delay: u64,
}
