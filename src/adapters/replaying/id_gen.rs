//! Replaying adapter for the `IdGenerator` port.

use super::{next_output, replay_value};
use crate::cassette::config::SharedReplayer;
use crate::ports::IdGenerator;

/// Serves recorded IDs.
pub struct ReplayingIdGenerator {
    replayer: Option<SharedReplayer>,
}

impl ReplayingIdGenerator {
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

impl IdGenerator for ReplayingIdGenerator {
    fn generate_id(&self) -> String {
        replay_value(
            next_output(self.replayer.as_ref(), "id_gen", "generate_id"),
            "id_gen::generate_id",
        )
    }
}
