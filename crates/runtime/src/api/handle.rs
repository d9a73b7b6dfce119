//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! starting combat, submitting player actions, and streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{CombatState, PlayerAction};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::worker::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Starts the encounter.
    ///
    /// The call returns as soon as the worker accepts the request; the
    /// first turn resolves inside the worker task after the caller has
    /// yielded control, never during session construction. Starting twice,
    /// or starting after the encounter has ended, is refused.
    pub async fn start_combat(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::StartCombat { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Submits an action for the active player-controlled combatant.
    ///
    /// Only valid while the scheduler is awaiting player input; any other
    /// phase is refused without touching the encounter state.
    pub async fn submit_player_action(&self, action: PlayerAction) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SubmitPlayerAction {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Queries the current encounter state (read-only snapshot).
    pub async fn query_state(&self) -> Result<CombatState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribes to events from a specific topic.
    ///
    /// # Topics
    ///
    /// - [`Topic::Roster`] - initiative order and active-slot changes
    /// - [`Topic::Log`] - combat log growth
    /// - [`Topic::Turn`] - turn lifecycle (resolutions, awaited input, end)
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Returns a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
