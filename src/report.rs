use crate::state::State;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;

const WIDTH: usize = 18;

/// A point-in-time view of a watch, in seconds.
///
/// `Display` renders the diagnostic report: the state, both timestamps and one
/// line per recorded lap. Timestamps that have no meaning in the current state
/// are rendered as `-`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub state: State,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub elapsed: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub laps: Vec<f64>,
}

impl Report {
    pub(crate) fn new(
        state: State,
        start: Option<Duration>,
        end: Option<Duration>,
        elapsed: Duration,
        laps: &[Duration],
    ) -> Self {
        Self {
            state,
            start: start.map(|start| start.as_secs_f64()),
            end: end.map(|end| end.as_secs_f64()),
            elapsed: elapsed.as_secs_f64(),
            laps: laps.iter().map(Duration::as_secs_f64).collect(),
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "StopWatch State: {}", self.state)?;
        write!(f, "\nStart Time: ")?;
        write_seconds(f, self.start)?;
        write!(f, "\nEnd   Time: ")?;
        write_seconds(f, self.end)?;

        for (index, lap) in self.laps.iter().enumerate() {
            write!(f, "\nLap {}: {lap:WIDTH$.6}", index + 1)?;
        }

        Ok(())
    }
}

fn write_seconds(f: &mut Formatter<'_>, seconds: Option<f64>) -> std::fmt::Result {
    match seconds {
        Some(seconds) => write!(f, "{seconds:WIDTH$.6}"),
        None => write!(f, "{:>WIDTH$}", "-"),
    }
}
