use crate::ai::DecisionError;
use crate::state::{CombatPhase, CombatantId};

/// Errors that can occur during turn operations.
///
/// Every rejected call leaves the session state unchanged; callers may
/// retry once the preconditions hold.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// The operation is not valid in the current scheduling phase.
    #[error("expected the {expected} phase, but the encounter is {actual}")]
    InvalidPhase {
        expected: CombatPhase,
        actual: CombatPhase,
    },

    /// No combatant is able to act (empty roster or everyone defeated).
    #[error("no combatant is able to act")]
    NoActiveCombatant,

    /// The referenced combatant is not part of this encounter.
    #[error("combatant {0} is not part of this encounter")]
    UnknownCombatant(CombatantId),

    /// The chosen target is already out of the fight.
    #[error("combatant {0} is already defeated")]
    TargetDefeated(CombatantId),

    /// The acting combatant has no skill configured.
    #[error("'{name}' has no skill to act with")]
    NoUsableSkill { name: String },

    /// The AI decision policy could not produce an action.
    #[error(transparent)]
    Decision(#[from] DecisionError),
}
