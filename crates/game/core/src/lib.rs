//! Deterministic combat rules and data types shared across clients.
//!
//! `combat-core` defines the canonical encounter rules (combatants,
//! initiative, targeting, the turn-scheduling state machine) and exposes
//! pure APIs that can be reused by both the runtime and test harnesses.
//! All state mutation flows through [`engine::CombatEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod action;
pub mod ai;
pub mod config;
pub mod engine;
pub mod initiative;
pub mod state;
pub mod targeting;

pub use action::PlayerAction;
pub use ai::{AiDecision, DecisionError};
pub use config::CombatConfig;
pub use engine::{CombatEngine, TurnError, TurnOutcome};
pub use state::{
    Attributes, BoundedVec, CombatLog, CombatPhase, CombatState, Combatant, CombatantId,
    Controller, LogEntry, ResourceMeter, Roster, SessionError, Side, Skill, SkillSet, TurnState,
    Weapon,
};
pub use targeting::{LowestHitPoints, TargetSelector, TargetingError};
