//! Event types for different topics.

use serde::{Deserialize, Serialize};

use combat_core::{Combatant, CombatantId, LogEntry, PlayerAction, Side};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Initiative order and active-slot changes.
    Roster,
    /// Combat log growth.
    Log,
    /// Turn lifecycle: resolutions, awaited input, encounter end.
    Turn,
}

/// Event wrapper that carries the topic and typed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Roster(RosterEvent),
    Log(LogEvent),
    Turn(TurnEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Roster(_) => Topic::Roster,
            Event::Log(_) => Topic::Log,
            Event::Turn(_) => Topic::Turn,
        }
    }
}

/// Events describing the turn-ordered roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RosterEvent {
    /// The initiative order or the active slot changed.
    ///
    /// Published once when combat starts and again after every turn
    /// advance. `order` is a snapshot; HP bars can be derived from the
    /// combatants' meters, which are always consistent with the clamping
    /// invariant.
    Changed {
        order: Vec<Combatant>,
        current_index: usize,
    },
}

/// Events describing combat log growth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogEvent {
    /// One entry was appended to the (append-only) combat log.
    Appended { entry: LogEntry },
}

/// Events describing the turn lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    /// An AI-controlled combatant's action resolved automatically.
    ActorResolved {
        actor: CombatantId,
        target: CombatantId,
        skill: String,
        damage: u32,
    },

    /// A submitted player action was accepted and applied.
    PlayerActionAccepted {
        actor: CombatantId,
        action: PlayerAction,
    },

    /// The active combatant is player-controlled; the scheduler is
    /// suspended until an action is submitted.
    AwaitingPlayerInput { combatant: Combatant },

    /// One side has no combatants left standing.
    Ended { victor: Side },
}
