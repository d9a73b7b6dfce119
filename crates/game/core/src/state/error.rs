//! Session construction errors.

/// Errors that occur while assembling an encounter session.
///
/// All of these indicate configuration problems on the caller's side; the
/// session is not created and nothing is mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    /// Neither allies nor enemies were supplied.
    #[error("cannot assemble an encounter with an empty roster")]
    EmptyRoster,

    /// The combined roster exceeds the fixed session capacity.
    #[error("roster is full (max: {max}, requested: {requested})")]
    RosterFull { max: usize, requested: usize },

    /// An AI-controlled combatant has no skill to act with.
    #[error("AI-controlled combatant '{name}' has no skills configured")]
    MissingSkills { name: String },
}
