//! Turn scheduling and combat resolution.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`CombatState`].
//! It drives the scheduling state machine (idle, resolving, awaiting player
//! input, ended) through explicit entry points so a host event loop or a
//! test harness can step the encounter one operation at a time. Pacing and
//! notification live in the runtime layer; everything here is synchronous
//! and deterministic.

mod errors;

pub use errors::TurnError;

use crate::action::PlayerAction;
use crate::ai;
use crate::state::{
    CombatPhase, CombatState, Combatant, CombatantId, Controller, LogEntry, Side,
};

/// Result of resolving the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// An AI-controlled combatant acted automatically. The caller should
    /// apply pacing and then advance the turn.
    ActorResolved {
        actor: CombatantId,
        target: CombatantId,
        skill: String,
        damage: u32,
    },
    /// The active combatant is player-controlled; the scheduler now waits
    /// for a submitted action and will not advance on its own.
    AwaitingPlayer { combatant: CombatantId },
    /// One side has no combatants left standing; the encounter is over.
    Ended { victor: Side },
}

/// Combat engine that manages turn scheduling and action resolution.
///
/// Every operation validates the scheduling phase first and leaves the
/// state untouched when the precondition fails, so a rejected call can
/// simply be reported back to the caller.
pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut CombatState) -> Self {
        Self { state }
    }

    /// Current scheduling phase.
    pub fn phase(&self) -> CombatPhase {
        self.state.turn.phase
    }

    /// Resolves the turn of the combatant at the current roster index.
    ///
    /// Valid only while the scheduler is idle. Defeated combatants are
    /// skipped. AI-controlled combatants act immediately (the caller paces
    /// and then calls [`CombatEngine::advance_turn`]); player-controlled
    /// combatants suspend the scheduler until
    /// [`CombatEngine::submit_player_action`] is called.
    pub fn resolve_current_turn(&mut self) -> Result<TurnOutcome, TurnError> {
        self.expect_phase(CombatPhase::Idle)?;

        if let Some(victor) = self.state.victor() {
            self.state.turn.phase = CombatPhase::Ended;
            return Ok(TurnOutcome::Ended { victor });
        }

        self.skip_defeated()?;

        let actor = self
            .state
            .active_combatant()
            .ok_or(TurnError::NoActiveCombatant)?
            .clone();

        match actor.controller {
            Controller::Ai => {
                self.state.turn.phase = CombatPhase::Resolving;
                self.resolve_ai_turn(&actor)
            }
            Controller::Player => {
                self.state.turn.phase = CombatPhase::AwaitingPlayerInput;
                Ok(TurnOutcome::AwaitingPlayer {
                    combatant: actor.id,
                })
            }
        }
    }

    /// Applies a player-submitted action for the active combatant.
    ///
    /// Valid only while the scheduler is awaiting player input; any other
    /// phase is rejected with [`TurnError::InvalidPhase`] and neither the
    /// turn pointer nor the log is touched. On success the scheduler moves
    /// to resolving and expects [`CombatEngine::advance_turn`] next.
    pub fn submit_player_action(&mut self, action: PlayerAction) -> Result<(), TurnError> {
        self.expect_phase(CombatPhase::AwaitingPlayerInput)?;

        let actor = self
            .state
            .active_combatant()
            .ok_or(TurnError::NoActiveCombatant)?
            .clone();

        match action {
            PlayerAction::Attack { target } => {
                let skill = actor
                    .skills
                    .first()
                    .ok_or_else(|| TurnError::NoUsableSkill {
                        name: actor.name.clone(),
                    })?
                    .clone();

                let victim = self
                    .state
                    .combatant(target)
                    .ok_or(TurnError::UnknownCombatant(target))?;
                if victim.is_defeated() {
                    return Err(TurnError::TargetDefeated(target));
                }
                let victim_name = victim.name.clone();

                let damage = actor.attack_power(&skill);
                let defeated = self.apply_damage(target, damage)?;

                self.append_log(format!(
                    "{} attacks {} for {} damage",
                    actor.name, victim_name, damage
                ));
                if defeated {
                    self.append_log(format!("{victim_name} is defeated"));
                }
            }
            PlayerAction::Defend => {
                self.append_log(format!("{} is defending", actor.name));
            }
        }

        self.state.turn.phase = CombatPhase::Resolving;
        Ok(())
    }

    /// Moves the turn pointer to the next roster slot, wrapping past the
    /// end of the roster back to the front.
    ///
    /// Valid only while resolving; this is the single driver of the turn
    /// loop, so a pacing delay that has not fired yet keeps the scheduler
    /// in the resolving phase and any further advance attempt is rejected.
    pub fn advance_turn(&mut self) -> Result<(), TurnError> {
        self.expect_phase(CombatPhase::Resolving)?;

        let len = self.state.roster.len();
        if len == 0 {
            return Err(TurnError::NoActiveCombatant);
        }

        self.state.turn.current_index = (self.state.turn.current_index + 1) % len;
        if self.state.turn.current_index == 0 {
            self.state.turn.round += 1;
        }
        self.state.turn.phase = CombatPhase::Idle;
        Ok(())
    }

    fn resolve_ai_turn(&mut self, actor: &Combatant) -> Result<TurnOutcome, TurnError> {
        let opponents: Vec<&Combatant> =
            self.state.living(actor.side.opponent()).collect();
        let decision = ai::decide_action(actor, &opponents).map_err(TurnError::Decision)?;

        let target_id = decision.target.id;
        let target_name = decision.target.name.clone();
        let skill_name = decision.skill.name.clone();
        let damage = actor.attack_power(decision.skill);

        let defeated = self.apply_damage(target_id, damage)?;

        self.append_log(format!(
            "{} hits {} with {} for {} damage",
            actor.name, target_name, skill_name, damage
        ));
        if defeated {
            self.append_log(format!("{target_name} is defeated"));
        }

        Ok(TurnOutcome::ActorResolved {
            actor: actor.id,
            target: target_id,
            skill: skill_name,
            damage,
        })
    }

    /// Moves the turn pointer off defeated combatants without leaving the
    /// idle phase. Bounded by the roster length.
    fn skip_defeated(&mut self) -> Result<(), TurnError> {
        let len = self.state.roster.len();
        for _ in 0..len {
            let active = self
                .state
                .active_combatant()
                .ok_or(TurnError::NoActiveCombatant)?;
            if !active.is_defeated() {
                return Ok(());
            }
            self.state.turn.current_index = (self.state.turn.current_index + 1) % len;
            if self.state.turn.current_index == 0 {
                self.state.turn.round += 1;
            }
        }
        Err(TurnError::NoActiveCombatant)
    }

    fn apply_damage(&mut self, target: CombatantId, amount: u32) -> Result<bool, TurnError> {
        let victim = self
            .state
            .combatant_mut(target)
            .ok_or(TurnError::UnknownCombatant(target))?;
        victim.hp.damage(amount);
        Ok(victim.is_defeated())
    }

    fn append_log(&mut self, text: String) {
        let round = self.state.turn.round;
        self.state.log.append(LogEntry { round, text });
    }

    fn expect_phase(&self, expected: CombatPhase) -> Result<(), TurnError> {
        let actual = self.state.turn.phase;
        if actual == expected {
            Ok(())
        } else {
            Err(TurnError::InvalidPhase { expected, actual })
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::config::CombatConfig;
    use crate::state::{Attributes, Weapon};

    fn warrior() -> Combatant {
        Combatant::new(
            "Warrior",
            Side::Ally,
            Controller::Player,
            20,
            Attributes::new(1, 1, 1, 1, 3),
        )
        .with_skill("slash", 1)
        .with_weapon(Weapon::new("short_sword", "Short Sword", 1))
    }

    fn skeleton(name: &str) -> Combatant {
        Combatant::new(
            name,
            Side::Enemy,
            Controller::Ai,
            20,
            Attributes::new(1, 1, 1, 1, 0),
        )
        .with_skill("slash", 1)
    }

    /// Warrior plus three skeletons, zero initiative rolls: speeds are
    /// [3, 0, 0, 0] and the warrior acts first.
    fn session() -> CombatState {
        CombatState::assemble(
            [warrior()],
            [skeleton("Skeleton A"), skeleton("Skeleton B"), skeleton("Skeleton C")],
            &CombatConfig::default(),
            &mut StepRng::new(0, 0),
        )
        .unwrap()
    }

    #[test]
    fn roster_is_sorted_descending_and_stable_on_ties() {
        let state = session();
        let names: Vec<&str> = state.roster.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Warrior", "Skeleton A", "Skeleton B", "Skeleton C"]);

        let speeds: Vec<u32> = state.roster.iter().map(|c| c.speed.unwrap()).collect();
        assert_eq!(speeds, [3, 0, 0, 0]);
    }

    #[test]
    fn advancing_roster_length_times_wraps_back_to_start() {
        let mut state = session();
        let start = state.turn.current_index;
        let len = state.roster.len();

        for _ in 0..len {
            state.turn.phase = CombatPhase::Resolving;
            CombatEngine::new(&mut state).advance_turn().unwrap();
        }
        assert_eq!(state.turn.current_index, start);
        assert_eq!(state.turn.round, 2);
    }

    #[test]
    fn player_turn_suspends_the_scheduler() {
        let mut state = session();
        let outcome = CombatEngine::new(&mut state)
            .resolve_current_turn()
            .unwrap();

        let warrior_id = state.roster.iter().next().unwrap().id;
        assert_eq!(outcome, TurnOutcome::AwaitingPlayer { combatant: warrior_id });
        assert_eq!(state.turn.phase, CombatPhase::AwaitingPlayerInput);
    }

    #[test]
    fn submitting_outside_awaiting_input_is_rejected_without_mutation() {
        let mut state = session();
        let index_before = state.turn.current_index;
        let log_before = state.log.len();

        let target = state.roster.iter().nth(1).unwrap().id;
        let err = CombatEngine::new(&mut state)
            .submit_player_action(PlayerAction::Attack { target })
            .unwrap_err();

        assert_eq!(
            err,
            TurnError::InvalidPhase {
                expected: CombatPhase::AwaitingPlayerInput,
                actual: CombatPhase::Idle,
            }
        );
        assert_eq!(state.turn.current_index, index_before);
        assert_eq!(state.log.len(), log_before);
    }

    #[test]
    fn player_attack_damages_the_chosen_target_and_logs() {
        let mut state = session();
        CombatEngine::new(&mut state).resolve_current_turn().unwrap();

        let target = state.roster.iter().nth(1).unwrap().id;
        CombatEngine::new(&mut state)
            .submit_player_action(PlayerAction::Attack { target })
            .unwrap();

        // slash power 1 + strength 1 + short sword 1
        let victim = state.combatant(target).unwrap();
        assert_eq!(victim.hp.current, 17);
        assert_eq!(state.log.len(), 1);
        assert_eq!(
            state.log.last().unwrap().text,
            "Warrior attacks Skeleton A for 3 damage"
        );
        assert_eq!(state.turn.phase, CombatPhase::Resolving);

        CombatEngine::new(&mut state).advance_turn().unwrap();
        assert_eq!(state.turn.current_index, 1);
        assert_eq!(state.turn.phase, CombatPhase::Idle);
    }

    #[test]
    fn ai_turn_strikes_the_lowest_hp_opponent() {
        // Two allies with uneven wounds, one fast AI enemy.
        let healthy = warrior();
        let mut wounded = warrior();
        wounded.name = "Scout".into();
        wounded.hp.damage(12);
        let mut ogre = skeleton("Ogre");
        ogre.attributes.agility = 9;

        let mut state = CombatState::assemble(
            [healthy, wounded],
            [ogre],
            &CombatConfig::default(),
            &mut StepRng::new(0, 0),
        )
        .unwrap();

        let outcome = CombatEngine::new(&mut state)
            .resolve_current_turn()
            .unwrap();

        let scout = state
            .roster
            .iter()
            .find(|c| c.name == "Scout")
            .unwrap();
        match outcome {
            TurnOutcome::ActorResolved { target, damage, .. } => {
                assert_eq!(target, scout.id);
                assert_eq!(damage, 2); // slash 1 + strength 1
                assert_eq!(scout.hp.current, 6); // 20 - 12 - 2
            }
            other => panic!("expected an AI resolution, got {other:?}"),
        }
        assert_eq!(state.log.len(), 1);
    }

    #[test]
    fn defeated_combatants_are_skipped() {
        let mut state = session();

        // Knock out the first skeleton; the turn pointer must jump over it.
        let skipped = state.roster.iter().nth(1).unwrap().id;
        state.combatant_mut(skipped).unwrap().hp.damage(20);

        CombatEngine::new(&mut state).resolve_current_turn().unwrap();
        CombatEngine::new(&mut state)
            .submit_player_action(PlayerAction::Defend)
            .unwrap();
        CombatEngine::new(&mut state).advance_turn().unwrap();
        assert_eq!(state.turn.current_index, 1);

        let outcome = CombatEngine::new(&mut state)
            .resolve_current_turn()
            .unwrap();
        // Skeleton B (index 2) acts, not the defeated Skeleton A.
        assert_eq!(state.turn.current_index, 2);
        match outcome {
            TurnOutcome::ActorResolved { actor, .. } => {
                assert_eq!(state.combatant(actor).unwrap().name, "Skeleton B");
            }
            other => panic!("expected an AI resolution, got {other:?}"),
        }
    }

    #[test]
    fn encounter_ends_when_one_side_falls() {
        let mut champion = skeleton("Champion");
        champion.side = Side::Ally;
        champion.attributes.agility = 9;
        let mut prey = skeleton("Prey");
        prey.hp = crate::state::ResourceMeter::full(1);

        let mut state = CombatState::assemble(
            [champion],
            [prey],
            &CombatConfig::default(),
            &mut StepRng::new(0, 0),
        )
        .unwrap();

        // Champion one-shots Prey.
        CombatEngine::new(&mut state).resolve_current_turn().unwrap();
        CombatEngine::new(&mut state).advance_turn().unwrap();

        let outcome = CombatEngine::new(&mut state)
            .resolve_current_turn()
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Ended { victor: Side::Ally });
        assert_eq!(state.turn.phase, CombatPhase::Ended);

        // Terminal: no further turn operations are accepted.
        let err = CombatEngine::new(&mut state)
            .resolve_current_turn()
            .unwrap_err();
        assert!(matches!(err, TurnError::InvalidPhase { .. }));
    }
}
