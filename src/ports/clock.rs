//! Clock port.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Work-log timestamps go through this port so that replayed sessions
/// produce identical records.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
