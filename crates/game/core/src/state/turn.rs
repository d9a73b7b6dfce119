/// Phase of the turn-scheduling state machine.
///
/// `Ended` is terminal; it is entered when every combatant on one side is
/// defeated, and no further turn operations are accepted in it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    /// No turn is active; the next resolution may begin.
    Idle,
    /// An action is being carried out, possibly across a pacing delay.
    Resolving,
    /// The active combatant is player-controlled and an action is awaited.
    AwaitingPlayerInput,
    /// One side has been fully defeated.
    Ended,
}

/// Turn bookkeeping for an encounter.
///
/// `current_index` always stays within `[0, roster.len())`; advancing past
/// the last roster slot wraps to 0 and increments `round`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: CombatPhase,
    pub current_index: usize,
    pub round: u32,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            phase: CombatPhase::Idle,
            current_index: 0,
            round: 1,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
