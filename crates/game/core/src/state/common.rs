use std::fmt;

/// Unique identifier for a combatant within an encounter.
///
/// Identifiers are assigned in roster insertion order before initiative is
/// rolled, so they double as the tie-break key for equal speeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Integer resource meter (health, mana) tracked per combatant.
///
/// `current` never exceeds `maximum` and never falls below zero; every
/// mutation goes through [`ResourceMeter::damage`] or [`ResourceMeter::heal`],
/// which clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a meter filled to its maximum.
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Reduces the meter, clamping at zero. Returns the new current value.
    pub fn damage(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Restores the meter, clamping at the maximum. Returns the new current value.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current
    }

    /// Fill ratio as an integer percentage in `[0, 100]`, for status bars.
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 0;
        }
        (self.current as u64 * 100 / self.maximum as u64) as u32
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_clamps_for_arbitrary_delta_sequences() {
        let mut meter = ResourceMeter::full(20);

        // Alternating over-damage and over-heal never escapes [0, maximum].
        let deltas: [(bool, u32); 9] = [
            (true, 10),
            (false, 3),
            (true, 50),
            (false, 7),
            (false, 100),
            (true, 1),
            (true, 0),
            (false, 0),
            (true, 19),
        ];
        for (is_damage, amount) in deltas {
            if is_damage {
                meter.damage(amount);
            } else {
                meter.heal(amount);
            }
            assert!(meter.current <= meter.maximum);
            assert!(meter.percent() <= 100);
        }
    }

    #[test]
    fn new_clamps_current_to_maximum() {
        let meter = ResourceMeter::new(35, 20);
        assert_eq!(meter.current, 20);
        assert_eq!(meter.percent(), 100);
    }

    #[test]
    fn percent_of_empty_maximum_is_zero() {
        assert_eq!(ResourceMeter::new(0, 0).percent(), 0);
    }
}
