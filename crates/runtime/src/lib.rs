//! Runtime orchestration for the deterministic combat simulation.
//!
//! This crate wires the combat engine, pacing strategies, and the event bus
//! into a cohesive runtime API. Consumers embed [`Runtime`] to drive
//! encounters, subscribe to presentation events, and submit player actions
//! through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus presentation layers consume
//! - [`pacing`] holds the injectable delay strategies
//! - the encounter worker stays internal to the crate
pub mod api;
pub mod events;
pub mod pacing;
pub mod runtime;

mod worker;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, LogEvent, RosterEvent, Topic, TurnEvent};
pub use pacing::{DelayStrategy, FixedDelay, NoDelay};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
