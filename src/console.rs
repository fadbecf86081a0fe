use crate::clock::{Clock, MonotonicClock};
use crate::error::TransitionError;
use crate::lap::LapStopWatch;
use crate::report::Report;
use crate::state::State;
use serde_json::json;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Duration;

const HELP: &str = "commands: start, stop, reset, lap, elapsed, laps, show, help, quit";

/// A single line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    Lap,
    Elapsed,
    Laps,
    Show,
    Help,
    Quit,
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Reset => "reset",
            Command::Lap => "lap",
            Command::Elapsed => "elapsed",
            Command::Laps => "laps",
            Command::Show => "show",
            Command::Help => "help",
            Command::Quit => "quit",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0:?}")]
pub struct CommandParseError(pub String);

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "stop" => Ok(Command::Stop),
            "reset" => Ok(Command::Reset),
            "lap" => Ok(Command::Lap),
            "elapsed" => Ok(Command::Elapsed),
            "laps" => Ok(Command::Laps),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandParseError(s.trim().to_string())),
        }
    }
}

/// How replies are written back to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// The successful result of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Transition(State),
    Elapsed(Duration),
    Lap(Duration),
    Laps(Vec<Duration>),
    Report(Report),
    Help,
    Quit,
}

/// Drives a [`LapStopWatch`] from line-oriented commands.
pub struct Console<C = MonotonicClock> {
    watch: LapStopWatch<C>,
    format: Format,
}

impl<C: Clock> Console<C> {
    pub fn new(watch: LapStopWatch<C>, format: Format) -> Self {
        Self { watch, format }
    }

    pub fn watch(&self) -> &LapStopWatch<C> {
        &self.watch
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, TransitionError> {
        let reply = match command {
            Command::Start => {
                self.watch.start()?;
                Reply::Transition(self.watch.state())
            }
            Command::Stop => {
                self.watch.stop()?;
                Reply::Transition(self.watch.state())
            }
            Command::Reset => {
                self.watch.reset()?;
                Reply::Transition(self.watch.state())
            }
            Command::Lap => Reply::Lap(self.watch.lap()?),
            Command::Elapsed => Reply::Elapsed(self.watch.elapsed()),
            Command::Laps => Reply::Laps(self.watch.laps_elapsed_time()),
            Command::Show => Reply::Report(self.watch.report()),
            Command::Help => Reply::Help,
            Command::Quit => Reply::Quit,
        };

        Ok(reply)
    }

    /// Reads commands until `quit` or end of input, writing one reply per command.
    ///
    /// Rejected commands are reported and the session continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let rendered = match line.parse::<Command>() {
                Ok(command) => {
                    tracing::trace!(%command, "executing console command");

                    match self.execute(command) {
                        Ok(Reply::Quit) => break,
                        Ok(reply) => self.render(&reply)?,
                        Err(e) => self.render_error(&e),
                    }
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse a console command");
                    self.render_message(&e.to_string())
                }
            };

            writeln!(output, "{rendered}")?;
            output.flush()?;
        }

        Ok(())
    }

    pub fn render(&self, reply: &Reply) -> anyhow::Result<String> {
        let rendered = match self.format {
            Format::Text => match reply {
                Reply::Transition(state) => format!("ok: {state}"),
                Reply::Elapsed(elapsed) => format!("elapsed: {:.6}", elapsed.as_secs_f64()),
                Reply::Lap(lap) => format!("lap: {:.6}", lap.as_secs_f64()),
                Reply::Laps(laps) => {
                    let laps: Vec<String> = laps
                        .iter()
                        .map(|lap| format!("{:.6}", lap.as_secs_f64()))
                        .collect();
                    format!("laps: [{}]", laps.join(", "))
                }
                Reply::Report(report) => report.to_string(),
                Reply::Help | Reply::Quit => HELP.to_string(),
            },
            Format::Json => {
                let value = match reply {
                    Reply::Transition(state) => json!({ "state": state }),
                    Reply::Elapsed(elapsed) => json!({ "elapsed": elapsed.as_secs_f64() }),
                    Reply::Lap(lap) => json!({ "lap": lap.as_secs_f64() }),
                    Reply::Laps(laps) => {
                        let laps: Vec<f64> = laps.iter().map(Duration::as_secs_f64).collect();
                        json!({ "laps": laps })
                    }
                    Reply::Report(report) => serde_json::to_value(report)?,
                    Reply::Help | Reply::Quit => json!({ "help": HELP }),
                };
                serde_json::to_string(&value)?
            }
        };

        Ok(rendered)
    }

    fn render_error(&self, error: &TransitionError) -> String {
        match self.format {
            Format::Text => format!("error: {error}"),
            Format::Json => json!({
                "error": error.to_string(),
                "operation": error.operation,
                "state": error.state,
            })
            .to_string(),
        }
    }

    fn render_message(&self, message: &str) -> String {
        match self.format {
            Format::Text => format!("error: {message}"),
            Format::Json => json!({ "error": message }).to_string(),
        }
    }
}
