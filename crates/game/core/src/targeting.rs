//! Target selection strategies.
//!
//! Strategies are pure: they inspect a candidate list and pick one, leaving
//! all mutation to the engine. The candidate list is supplied by the caller
//! and is expected to contain only combatants that are valid to strike.

use crate::state::Combatant;

/// Errors surfaced by target selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetingError {
    #[error("no candidates available for target selection")]
    NoCandidates,
}

/// Strategy for choosing which combatant to act against.
///
/// Implementations must be deterministic.
pub trait TargetSelector {
    /// Picks a target out of `candidates`.
    ///
    /// Fails with [`TargetingError::NoCandidates`] when the list is empty.
    fn select<'a>(&self, candidates: &[&'a Combatant]) -> Result<&'a Combatant, TargetingError>;

    /// Strategy name for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Target the candidate with the lowest current HP.
///
/// Scans left to right and replaces the running choice only on strictly
/// lower HP, so the first-seen candidate wins ties. A single-element list
/// always returns that element.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowestHitPoints;

impl TargetSelector for LowestHitPoints {
    fn select<'a>(&self, candidates: &[&'a Combatant]) -> Result<&'a Combatant, TargetingError> {
        let mut remaining = candidates.iter().copied();
        let mut choice = remaining.next().ok_or(TargetingError::NoCandidates)?;

        for candidate in remaining {
            if candidate.hp.current < choice.hp.current {
                choice = candidate;
            }
        }

        Ok(choice)
    }

    fn name(&self) -> &'static str {
        "lowest_hit_points"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Attributes, CombatantId, Controller, Side};

    fn victim(id: u32, hp: u32) -> Combatant {
        let mut combatant = Combatant::new(
            format!("victim-{id}"),
            Side::Ally,
            Controller::Player,
            20,
            Attributes::default(),
        );
        combatant.id = CombatantId(id);
        combatant.hp.damage(20 - hp.min(20));
        combatant
    }

    #[test]
    fn empty_candidate_list_is_refused() {
        assert_eq!(
            LowestHitPoints.select(&[]).unwrap_err(),
            TargetingError::NoCandidates
        );
    }

    #[test]
    fn single_candidate_is_always_chosen() {
        let only = victim(0, 17);
        let chosen = LowestHitPoints.select(&[&only]).unwrap();
        assert_eq!(chosen.id, CombatantId(0));
    }

    #[test]
    fn lowest_hp_wins_and_first_seen_breaks_ties() {
        let a = victim(0, 12);
        let b = victim(1, 5);
        let c = victim(2, 5);
        let d = victim(3, 19);

        let chosen = LowestHitPoints.select(&[&a, &b, &c, &d]).unwrap();
        assert_eq!(chosen.id, CombatantId(1));

        // Every other candidate has HP >= the chosen one.
        for candidate in [&a, &b, &c, &d] {
            assert!(candidate.hp.current >= chosen.hp.current);
        }
    }
}
