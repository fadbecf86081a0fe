use std::io::Write;
use std::time::Duration;
use stopwatch::console::Format;
use stopwatch::{Clock, LapStopWatch, Report, StopWatch};

/// Prints a scripted stopwatch session, pausing between steps.
pub struct Script<W, P> {
    output: W,
    format: Format,
    pause: P,
}

impl<W: Write, P: FnMut()> Script<W, P> {
    pub fn new(output: W, format: Format, pause: P) -> Self {
        Self {
            output,
            format,
            pause,
        }
    }

    pub fn basic<C: Clock>(&mut self, watch: &mut StopWatch<C>) -> anyhow::Result<()> {
        self.show(&watch.report())?;
        self.reading(watch.elapsed())?;
        self.say("starting...")?;
        watch.start()?;
        self.show(&watch.report())?;
        (self.pause)();
        self.reading(watch.elapsed())?;
        self.show(&watch.report())?;
        (self.pause)();
        self.reading(watch.elapsed())?;
        self.show(&watch.report())?;
        self.say("stopping...")?;
        watch.stop()?;
        self.reading(watch.elapsed())?;
        self.show(&watch.report())?;
        (self.pause)();
        self.reading(watch.elapsed())?;
        self.show(&watch.report())?;
        watch.start()?;
        self.show(&watch.report())?;
        (self.pause)();
        self.reading(watch.elapsed())?;
        watch.stop()?;
        self.say("resetting...")?;
        watch.reset()?;
        self.show(&watch.report())?;
        self.reading(watch.elapsed())?;

        Ok(())
    }

    pub fn laps<C: Clock>(&mut self, watch: &mut LapStopWatch<C>) -> anyhow::Result<()> {
        self.show(&watch.report())?;
        self.reading(watch.elapsed())?;
        self.say("starting...")?;
        watch.start()?;
        self.show(&watch.report())?;
        (self.pause)();
        self.reading(watch.elapsed())?;
        self.show(&watch.report())?;
        (self.pause)();
        watch.lap()?;
        self.reading(watch.elapsed())?;
        self.show(&watch.report())?;
        (self.pause)();
        watch.lap()?;
        self.reading(watch.elapsed())?;
        self.show(&watch.report())?;
        self.lap_readings(&watch.laps_elapsed_time())?;
        self.say("stopping...")?;
        watch.stop()?;
        self.reading(watch.elapsed())?;
        self.show(&watch.report())?;
        (self.pause)();
        self.reading(watch.elapsed())?;
        self.lap_readings(&watch.laps_elapsed_time())?;
        self.show(&watch.report())?;
        self.say("resetting...")?;
        watch.reset()?;
        self.show(&watch.report())?;
        self.reading(watch.elapsed())?;
        self.lap_readings(&watch.laps_elapsed_time())?;

        Ok(())
    }

    fn say(&mut self, message: &str) -> anyhow::Result<()> {
        match self.format {
            Format::Text => writeln!(self.output, "{message}")?,
            Format::Json => writeln!(self.output, "{}", serde_json::json!({ "message": message }))?,
        }
        Ok(())
    }

    fn reading(&mut self, elapsed: Duration) -> anyhow::Result<()> {
        let seconds = elapsed.as_secs_f64();
        match self.format {
            Format::Text => writeln!(self.output, "reading: {seconds:.6}")?,
            Format::Json => writeln!(self.output, "{}", serde_json::json!({ "reading": seconds }))?,
        }
        Ok(())
    }

    fn lap_readings(&mut self, laps: &[Duration]) -> anyhow::Result<()> {
        let laps: Vec<f64> = laps.iter().map(Duration::as_secs_f64).collect();
        match self.format {
            Format::Text => writeln!(self.output, "reading laps: {laps:?}")?,
            Format::Json => writeln!(self.output, "{}", serde_json::json!({ "laps": laps }))?,
        }
        Ok(())
    }

    fn show(&mut self, report: &Report) -> anyhow::Result<()> {
        match self.format {
            Format::Text => writeln!(self.output, "{report}")?,
            Format::Json => writeln!(self.output, "{}", serde_json::to_string(report)?)?,
        }
        Ok(())
    }
}
