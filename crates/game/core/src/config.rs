/// Encounter configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Upper bound of the initiative roll; speed is
    /// `agility + uniform(0..=initiative_die)`.
    pub initiative_die: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of combatants in one encounter.
    pub const MAX_ROSTER: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INITIATIVE_DIE: u32 = 10;

    pub fn new() -> Self {
        Self {
            initiative_die: Self::DEFAULT_INITIATIVE_DIE,
        }
    }

    pub fn with_initiative_die(initiative_die: u32) -> Self {
        Self { initiative_die }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
