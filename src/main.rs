mod cli;
mod demo;

use crate::cli::{Arguments, Commands};
use clap::Parser;
use rand::Rng;
use std::io;
use std::time::Duration;
use stopwatch::console::Console;
use stopwatch::{LapStopWatch, StopWatch};
use tracing_log::LogTracer;

fn main() {
    let arguments = cli::Arguments::parse();
    set_log_level(&arguments).expect("Failed to configure logging");

    tracing::debug!(?arguments, "starting stopwatch");

    if let Err(e) = run(arguments) {
        tracing::error!(%e, "Unable to run the stopwatch");
        std::process::exit(1);
    }
}

fn set_log_level(arguments: &Arguments) -> anyhow::Result<()> {
    LogTracer::init()?;

    let level = match arguments.verbosity {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn run(arguments: Arguments) -> anyhow::Result<()> {
    match arguments.command {
        Commands::Console => {
            let mut console = Console::new(LapStopWatch::new(), arguments.format);
            console.run(io::stdin().lock(), io::stdout().lock())?;
        }
        Commands::Demo(options) => {
            let mut rng = rand::thread_rng();
            let max_delay = options.max_delay;
            let pause = move || {
                let seconds = pause_seconds(&mut rng, max_delay);
                tracing::info!(seconds, "sleeping");
                std::thread::sleep(Duration::from_secs(seconds));
            };

            let mut script = demo::Script::new(io::stdout().lock(), arguments.format, pause);
            if options.laps {
                script.laps(&mut LapStopWatch::new())?;
            } else {
                script.basic(&mut StopWatch::new())?;
            }
        }
    }

    Ok(())
}

/// A whole number of seconds below `max_delay`, or zero when it is zero.
fn pause_seconds(rng: &mut impl Rng, max_delay: u64) -> u64 {
    if max_delay == 0 {
        return 0;
    }

    rng.gen_range(0..max_delay)
}
