//! Encounter worker that owns the authoritative [`CombatState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), steps the
//! combat engine, and publishes events for the presentation layer. All turn
//! resolution is funneled through this single task, so exactly one turn is
//! ever in flight and state-changing requests that arrive mid-resolution
//! are refused instead of interleaved.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use combat_core::{
    CombatEngine, CombatPhase, CombatState, PlayerAction, TurnError, TurnOutcome,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, LogEvent, RosterEvent, TurnEvent};
use crate::pacing::DelayStrategy;

/// Commands that can be sent to the encounter worker.
pub enum Command {
    /// Begin turn resolution. Acknowledged before the first turn resolves,
    /// so the caller regains control first.
    StartCombat { reply: oneshot::Sender<Result<()>> },
    /// Apply an action for the active player-controlled combatant.
    SubmitPlayerAction {
        action: PlayerAction,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current encounter state (read-only).
    QueryState { reply: oneshot::Sender<CombatState> },
}

/// Background task that processes encounter commands.
pub struct EncounterWorker {
    state: CombatState,
    pacing: Arc<dyn DelayStrategy>,
    command_rx: mpsc::Receiver<Command>,
    events: EventBus,
}

impl EncounterWorker {
    pub fn new(
        state: CombatState,
        pacing: Arc<dyn DelayStrategy>,
        command_rx: mpsc::Receiver<Command>,
        events: EventBus,
    ) -> Self {
        Self {
            state,
            pacing,
            command_rx,
            events,
        }
    }

    /// Main worker loop. Exits when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            if self.handle_command(command).await.is_break() {
                break;
            }
        }
        debug!("encounter worker shutting down");
    }

    async fn handle_command(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::StartCombat { reply } => {
                if self.state.turn.phase != CombatPhase::Idle {
                    let _ = reply.send(Err(self.invalid_phase(CombatPhase::Idle)));
                    return ControlFlow::Continue(());
                }
                // Acknowledge first: the caller yields before any turn runs.
                let _ = reply.send(Ok(()));
                debug!("combat started");
                self.publish_roster();
                self.drive().await
            }
            Command::SubmitPlayerAction { action, reply } => {
                let log_mark = self.state.log.len();
                let actor = self.state.active_combatant().map(|combatant| combatant.id);

                match CombatEngine::new(&mut self.state).submit_player_action(action) {
                    Ok(()) => {
                        let _ = reply.send(Ok(()));
                        self.publish_log_since(log_mark);
                        if let Some(actor) = actor {
                            self.events.publish(Event::Turn(TurnEvent::PlayerActionAccepted {
                                actor,
                                action,
                            }));
                        }
                        if let Err(error) = CombatEngine::new(&mut self.state).advance_turn() {
                            warn!(%error, "turn advance refused after player action");
                            return ControlFlow::Continue(());
                        }
                        self.publish_roster();
                        self.drive().await
                    }
                    Err(error) => {
                        warn!(%error, "player action refused");
                        let _ = reply.send(Err(error.into()));
                        ControlFlow::Continue(())
                    }
                }
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
                ControlFlow::Continue(())
            }
        }
    }

    /// Resolves turns until the scheduler suspends on player input, the
    /// encounter ends, or the session is torn down mid-delay.
    async fn drive(&mut self) -> ControlFlow<()> {
        loop {
            let log_mark = self.state.log.len();
            match CombatEngine::new(&mut self.state).resolve_current_turn() {
                Ok(TurnOutcome::ActorResolved {
                    actor,
                    target,
                    skill,
                    damage,
                }) => {
                    self.publish_log_since(log_mark);
                    self.events.publish(Event::Turn(TurnEvent::ActorResolved {
                        actor,
                        target,
                        skill,
                        damage,
                    }));

                    if self.pace().await.is_break() {
                        return ControlFlow::Break(());
                    }

                    if let Err(error) = CombatEngine::new(&mut self.state).advance_turn() {
                        warn!(%error, "turn advance refused");
                        return ControlFlow::Continue(());
                    }
                    self.publish_roster();
                }
                Ok(TurnOutcome::AwaitingPlayer { combatant }) => {
                    if let Some(combatant) = self.state.combatant(combatant).cloned() {
                        self.events
                            .publish(Event::Turn(TurnEvent::AwaitingPlayerInput { combatant }));
                    }
                    return ControlFlow::Continue(());
                }
                Ok(TurnOutcome::Ended { victor }) => {
                    debug!(%victor, "encounter ended");
                    self.events.publish(Event::Turn(TurnEvent::Ended { victor }));
                    return ControlFlow::Continue(());
                }
                Err(error) => {
                    warn!(%error, "turn resolution refused");
                    return ControlFlow::Continue(());
                }
            }
        }
    }

    /// Waits out the pacing delay while still answering commands.
    ///
    /// Read-only queries are served immediately. State-changing requests
    /// are refused against the current (resolving) phase without touching
    /// the session, so a queued button press can never advance a turn that
    /// is still in flight. A closed command channel breaks out entirely:
    /// the pending continuation is cancelled and the turn never advances.
    async fn pace(&mut self) -> ControlFlow<()> {
        let pacing = Arc::clone(&self.pacing);
        let delay = pacing.pause();
        tokio::pin!(delay);

        loop {
            tokio::select! {
                _ = &mut delay => return ControlFlow::Continue(()),
                command = self.command_rx.recv() => match command {
                    Some(Command::QueryState { reply }) => {
                        let _ = reply.send(self.state.clone());
                    }
                    Some(Command::StartCombat { reply }) => {
                        let _ = reply.send(Err(self.invalid_phase(CombatPhase::Idle)));
                    }
                    Some(Command::SubmitPlayerAction { reply, .. }) => {
                        let _ = reply
                            .send(Err(self.invalid_phase(CombatPhase::AwaitingPlayerInput)));
                    }
                    None => return ControlFlow::Break(()),
                },
            }
        }
    }

    fn invalid_phase(&self, expected: CombatPhase) -> RuntimeError {
        RuntimeError::Turn(TurnError::InvalidPhase {
            expected,
            actual: self.state.turn.phase,
        })
    }

    fn publish_roster(&self) {
        self.events.publish(Event::Roster(RosterEvent::Changed {
            order: self.state.roster.iter().cloned().collect(),
            current_index: self.state.turn.current_index,
        }));
    }

    fn publish_log_since(&self, mark: usize) {
        for entry in self.state.log.entries_since(mark) {
            self.events.publish(Event::Log(LogEvent::Appended {
                entry: entry.clone(),
            }));
        }
    }
}
