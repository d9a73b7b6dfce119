//! Actions a player can submit for their combatant's turn.

use crate::state::CombatantId;

/// A player-chosen action, applied by the engine while the scheduler is in
/// the awaiting-input phase.
///
/// Effects are typed rather than opaque callbacks so they can be validated
/// against the current state before anything is mutated, logged uniformly,
/// and carried over the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    /// Strike `target` with the combatant's first configured skill.
    Attack { target: CombatantId },
    /// Hold ground. Affects only the combat log.
    Defend,
}
