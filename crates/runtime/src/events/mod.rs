//! Topic-based event routing between the runtime and presentation layers.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{Event, LogEvent, RosterEvent, Topic, TurnEvent};
