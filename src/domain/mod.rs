//! Domain layer: core analytics records and event-time math.

pub mod event_time;
pub mod model;

pub use event_time::{minutes_played, per_90, timestamp_to_seconds};
pub use model::{Competition, EnrichedEvent, LineupEntry, MatchEvent, MatchRecord};
