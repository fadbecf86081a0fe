//! A stopwatch state machine, with a lap-splitting variant.
//!
//! [`StopWatch`] moves between init, running and stopped. [`LapStopWatch`]
//! adds an ordered log of lap durations. Both read time from a [`Clock`] and
//! accept explicit instants through their `_at` methods.

pub mod clock;
pub mod console;
pub mod error;
pub mod lap;
pub mod report;
pub mod state;
pub mod stopwatch;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::TransitionError;
pub use lap::LapStopWatch;
pub use report::Report;
pub use state::{Operation, State};
pub use stopwatch::StopWatch;
