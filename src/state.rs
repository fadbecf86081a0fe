use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The externally visible state of a watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Init,
    Running,
    #[serde(rename = "stop")]
    Stopped,
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::Init => "init",
            State::Running => "running",
            State::Stopped => "stop",
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A mutating operation, as named in transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Start,
    Stop,
    Reset,
    Lap,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Reset => "reset",
            Operation::Lap => "lap",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_state_is_named_stop() {
        assert_eq!(State::Stopped.to_string(), "stop");
        assert_eq!(serde_json::to_value(State::Stopped).unwrap(), "stop");
        assert_eq!(
            serde_json::from_str::<State>("\"stop\"").unwrap(),
            State::Stopped
        );
    }

    #[test]
    fn other_states_use_lowercase_names() {
        assert_eq!(State::Init.to_string(), "init");
        assert_eq!(serde_json::to_value(State::Running).unwrap(), "running");
    }
}
