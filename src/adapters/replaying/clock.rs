//! Replaying adapter for the `Clock` port.

use chrono::{DateTime, Utc};

use super::{next_output, replay_value};
use crate::cassette::config::SharedReplayer;
use crate::ports::Clock;

/// Serves recorded timestamps.
pub struct ReplayingClock {
    replayer: Option<SharedReplayer>,
}

impl ReplayingClock {
    /// Backed by `replayer`.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// No cassette; panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        replay_value(next_output(self.replayer.as_ref(), "clock", "now"), "clock::now")
    }
}
