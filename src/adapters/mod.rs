//! Port implementations.
//!
//! - `live`: real clock, disk, HTTP and chat API.
//! - `recording`: wrap a live adapter and capture each call into a cassette.
//! - `replaying`: serve calls from a cassette without side effects.

pub mod live;
pub mod recording;
pub mod replaying;
