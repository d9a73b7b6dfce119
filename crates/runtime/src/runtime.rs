//! High-level runtime orchestrator.
//!
//! The runtime owns the encounter worker, wires up command/event channels,
//! and exposes a builder-based API for clients to assemble and drive an
//! encounter.

use std::sync::Arc;
use std::time::Duration;

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use combat_core::{CombatConfig, CombatState, Combatant};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::pacing::{DelayStrategy, FixedDelay};
use crate::worker::EncounterWorker;

/// Runtime configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Pause between automatically resolved turns (presentation pacing).
    pub turn_delay: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_TURN_DELAY: Duration = Duration::from_millis(500);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            turn_delay: Self::DEFAULT_TURN_DELAY,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates one combat encounter.
///
/// Design: the runtime owns the worker task and coordinates teardown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Creates a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Gets a cloneable handle to this runtime.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribes to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shuts the runtime down gracefully.
    ///
    /// Closes the command channel and joins the worker. If a pacing delay
    /// is pending at this point, its continuation is cancelled; the turn it
    /// belonged to never advances.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    allies: Vec<Combatant>,
    enemies: Vec<Combatant>,
    initiative_rng: Option<Box<dyn RngCore + Send>>,
    pacing: Option<Arc<dyn DelayStrategy>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            allies: Vec::new(),
            enemies: Vec::new(),
            initiative_rng: None,
            pacing: None,
        }
    }

    /// Overrides the runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds one ally to the roster.
    pub fn ally(mut self, combatant: Combatant) -> Self {
        self.allies.push(combatant);
        self
    }

    /// Adds allies to the roster, preserving order.
    pub fn allies(mut self, combatants: impl IntoIterator<Item = Combatant>) -> Self {
        self.allies.extend(combatants);
        self
    }

    /// Adds one enemy to the roster.
    pub fn enemy(mut self, combatant: Combatant) -> Self {
        self.enemies.push(combatant);
        self
    }

    /// Adds enemies to the roster, preserving order.
    pub fn enemies(mut self, combatants: impl IntoIterator<Item = Combatant>) -> Self {
        self.enemies.extend(combatants);
        self
    }

    /// Seeds the initiative rolls for a reproducible turn order.
    pub fn initiative_seed(self, seed: u64) -> Self {
        self.initiative_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Overrides the initiative random source entirely.
    pub fn initiative_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.initiative_rng = Some(Box::new(rng));
        self
    }

    /// Overrides the pacing strategy (defaults to a fixed real-time delay
    /// of [`RuntimeConfig::turn_delay`]).
    pub fn pacing(mut self, strategy: impl DelayStrategy + 'static) -> Self {
        self.pacing = Some(Arc::new(strategy));
        self
    }

    /// Assembles the session and spawns the encounter worker.
    ///
    /// Fails with a configuration error (empty roster, AI combatant
    /// without skills) before anything is spawned. Must be called from
    /// within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let mut rng: Box<dyn RngCore + Send> = self
            .initiative_rng
            .unwrap_or_else(|| Box::new(ChaCha8Rng::from_entropy()));

        let state =
            CombatState::assemble(self.allies, self.enemies, &self.config.combat, &mut rng)?;

        let pacing = self
            .pacing
            .unwrap_or_else(|| Arc::new(FixedDelay::new(self.config.turn_delay)));

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = EncounterWorker::new(state, pacing, command_rx, event_bus.clone());
        let worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            worker_handle,
        })
    }
}
