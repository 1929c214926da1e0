//! Port implementations: live, replaying and recording.

pub mod live;
pub mod recording;
pub mod replaying;
