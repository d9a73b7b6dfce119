//! Action decision policy for AI-controlled combatants.
//!
//! Decisions are pure: given the acting combatant and the candidates it may
//! strike, produce a target and a skill without touching any state. The
//! engine applies the decision afterwards.

use crate::state::{Combatant, Skill};
use crate::targeting::{LowestHitPoints, TargetSelector, TargetingError};

/// Errors surfaced while deciding an AI action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    /// The acting combatant has no skill configured.
    #[error("'{name}' has no skill to act with")]
    NoSkills { name: String },

    #[error(transparent)]
    Targeting(#[from] TargetingError),
}

/// A decided action: who to strike and with what.
#[derive(Clone, Copy, Debug)]
pub struct AiDecision<'a> {
    pub target: &'a Combatant,
    pub skill: &'a Skill,
}

/// Decides the action for an AI-controlled combatant.
///
/// Targets the lowest-HP candidate and always uses the first configured
/// skill. The skill policy is deliberately a single point of change for
/// richer behavior later.
pub fn decide_action<'a>(
    actor: &'a Combatant,
    candidates: &[&'a Combatant],
) -> Result<AiDecision<'a>, DecisionError> {
    let skill = actor.skills.first().ok_or_else(|| DecisionError::NoSkills {
        name: actor.name.clone(),
    })?;
    let target = LowestHitPoints.select(candidates)?;

    Ok(AiDecision { target, skill })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Attributes, Controller, Side};

    fn brute(name: &str) -> Combatant {
        Combatant::new(
            name,
            Side::Enemy,
            Controller::Ai,
            20,
            Attributes::default(),
        )
        .with_skill("slash", 1)
        .with_skill("bash", 3)
    }

    #[test]
    fn first_skill_is_the_default_policy() {
        let actor = brute("Ogre");
        let prey = brute("Prey");
        let decision = decide_action(&actor, &[&prey]).unwrap();
        assert_eq!(decision.skill.name, "slash");
        assert_eq!(decision.target.name, "Prey");
    }

    #[test]
    fn decision_is_refused_without_skills() {
        let mut actor = brute("Ogre");
        actor.skills = crate::state::SkillSet::new();
        let prey = brute("Prey");

        let error = decide_action(&actor, &[&prey]).unwrap_err();
        assert_eq!(
            error,
            DecisionError::NoSkills {
                name: "Ogre".into()
            }
        );
    }

    #[test]
    fn empty_candidates_propagate_the_targeting_error() {
        let actor = brute("Ogre");
        let error = decide_action(&actor, &[]).unwrap_err();
        assert_eq!(
            error,
            DecisionError::Targeting(TargetingError::NoCandidates)
        );
    }
}
