//! Initiative rolls and turn-order sorting.
//!
//! Speed is derived once per session as `agility + uniform(0..=die_sides)`
//! and is immutable afterwards. Turn order is the roster sorted by speed
//! descending; combatants with equal speed keep their pre-sort relative
//! order (stable sort), so insertion order is the tie-break.

use rand::Rng;

use crate::state::Combatant;

/// Rolls speed for every combatant that doesn't have one yet.
///
/// Combatants whose speed is already set are left alone, so a session can
/// never re-roll initiative mid-encounter.
pub fn roll_speeds<R: Rng>(combatants: &mut [Combatant], die_sides: u32, rng: &mut R) {
    for combatant in combatants {
        if combatant.speed.is_none() {
            let agility = combatant.attributes.agility.max(0) as u32;
            combatant.speed = Some(agility + rng.gen_range(0..=die_sides));
        }
    }
}

/// Stable-sorts combatants by speed descending.
pub fn sort_by_speed(combatants: &mut [Combatant]) {
    combatants.sort_by(|a, b| b.speed.cmp(&a.speed));
}
