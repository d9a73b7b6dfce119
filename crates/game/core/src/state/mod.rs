//! Authoritative encounter state representation.
//!
//! This module owns the data structures that describe combatants, turn
//! bookkeeping, and the combat log. Runtime layers clone or query this state
//! but mutate it exclusively through the engine.
mod combatant;
mod common;
mod error;
mod log;
mod turn;

use rand::Rng;

pub use bounded_vector::BoundedVec;
pub use combatant::{Attributes, Combatant, Controller, Side, Skill, SkillSet, Weapon};
pub use common::{CombatantId, ResourceMeter};
pub use error::SessionError;
pub use log::{CombatLog, LogEntry};
pub use turn::{CombatPhase, TurnState};

use crate::config::CombatConfig;
use crate::initiative;

/// Turn-ordered roster, fixed for the lifetime of a session.
pub type Roster = BoundedVec<Combatant, 0, { CombatConfig::MAX_ROSTER }>;

/// Canonical snapshot of one combat encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// Combatants in initiative order (speed descending, stable on ties).
    pub roster: Roster,
    /// Turn bookkeeping including the scheduling phase.
    pub turn: TurnState,
    /// Append-only narrative record.
    pub log: CombatLog,
}

impl CombatState {
    /// Builds a session from allies and enemies.
    ///
    /// Assigns identifiers in insertion order, rolls initiative for every
    /// combatant exactly once, sorts the roster by speed descending (stable
    /// on ties), and resets turn bookkeeping and the log.
    pub fn assemble<R: Rng>(
        allies: impl IntoIterator<Item = Combatant>,
        enemies: impl IntoIterator<Item = Combatant>,
        config: &CombatConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let mut combatants: Vec<Combatant> =
            allies.into_iter().chain(enemies).collect();

        if combatants.is_empty() {
            return Err(SessionError::EmptyRoster);
        }
        if combatants.len() > CombatConfig::MAX_ROSTER {
            return Err(SessionError::RosterFull {
                max: CombatConfig::MAX_ROSTER,
                requested: combatants.len(),
            });
        }
        for combatant in &combatants {
            if combatant.is_ai_controlled() && combatant.skills.is_empty() {
                return Err(SessionError::MissingSkills {
                    name: combatant.name.clone(),
                });
            }
        }

        for (index, combatant) in combatants.iter_mut().enumerate() {
            combatant.id = CombatantId(index as u32);
        }

        initiative::roll_speeds(&mut combatants, config.initiative_die, rng);
        initiative::sort_by_speed(&mut combatants);

        let mut roster = Roster::default();
        for combatant in combatants {
            // Capacity was validated above; a push failure here cannot happen.
            roster
                .push(combatant)
                .map_err(|_| SessionError::RosterFull {
                    max: CombatConfig::MAX_ROSTER,
                    requested: CombatConfig::MAX_ROSTER + 1,
                })?;
        }

        Ok(Self {
            roster,
            turn: TurnState::new(),
            log: CombatLog::new(),
        })
    }

    /// Returns a combatant by id.
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.iter().find(|combatant| combatant.id == id)
    }

    /// Returns a mutable combatant by id.
    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.roster.iter_mut().find(|combatant| combatant.id == id)
    }

    /// The combatant whose turn it currently is.
    pub fn active_combatant(&self) -> Option<&Combatant> {
        self.roster.iter().nth(self.turn.current_index)
    }

    /// Living combatants on `side`, in initiative order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.roster
            .iter()
            .filter(move |combatant| combatant.side == side && !combatant.is_defeated())
    }

    /// True when no combatant on `side` is left standing.
    pub fn side_defeated(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }

    /// The winning side, if the encounter has been decided.
    pub fn victor(&self) -> Option<Side> {
        if self.side_defeated(Side::Enemy) {
            Some(Side::Ally)
        } else if self.side_defeated(Side::Ally) {
            Some(Side::Enemy)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    fn fighter(name: &str, controller: Controller) -> Combatant {
        let mut combatant = Combatant::new(
            name,
            Side::Enemy,
            controller,
            20,
            Attributes::default(),
        );
        if controller == Controller::Ai {
            combatant = combatant.with_skill("slash", 1);
        }
        combatant
    }

    #[test]
    fn empty_roster_is_a_configuration_error() {
        let result = CombatState::assemble(
            Vec::<Combatant>::new(),
            Vec::new(),
            &CombatConfig::default(),
            &mut StepRng::new(0, 0),
        );
        assert_eq!(result.unwrap_err(), SessionError::EmptyRoster);
    }

    #[test]
    fn ai_combatant_without_skills_is_refused() {
        let mut silent = fighter("Mute", Controller::Ai);
        silent.skills = SkillSet::new();

        let result = CombatState::assemble(
            Vec::new(),
            [silent],
            &CombatConfig::default(),
            &mut StepRng::new(0, 0),
        );
        assert_eq!(
            result.unwrap_err(),
            SessionError::MissingSkills {
                name: "Mute".into()
            }
        );
    }

    #[test]
    fn identifiers_follow_insertion_order() {
        let state = CombatState::assemble(
            [fighter("first", Controller::Player)],
            [fighter("second", Controller::Ai)],
            &CombatConfig::default(),
            &mut StepRng::new(0, 0),
        )
        .unwrap();

        // Equal speeds, so the stable sort preserves insertion order.
        let ids: Vec<CombatantId> = state.roster.iter().map(|c| c.id).collect();
        assert_eq!(ids, [CombatantId(0), CombatantId(1)]);
    }
}
