use super::common::{CombatantId, ResourceMeter};

/// Which side of the encounter a combatant fights on.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    /// The side this one fights against.
    pub fn opponent(self) -> Side {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Who decides a combatant's action each turn.
///
/// AI-controlled combatants act automatically when their turn comes up;
/// player-controlled combatants suspend the scheduler until an action is
/// submitted from outside.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Ai,
    Player,
}

/// Core attribute block.
///
/// Only agility (initiative) and strength (damage) feed into rules today;
/// the rest are carried for future formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub magic: i32,
    pub agility: i32,
}

impl Attributes {
    pub fn new(strength: i32, dexterity: i32, constitution: i32, magic: i32, agility: i32) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            magic,
            agility,
        }
    }
}

/// A named combat technique with a flat power value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    pub power: u32,
}

impl Skill {
    pub fn new(name: impl Into<String>, power: u32) -> Self {
        Self {
            name: name.into(),
            power,
        }
    }
}

/// Ordered collection of a combatant's skills.
///
/// The first skill is the default action policy for AI combatants. Must be
/// non-empty for any combatant capable of acting on its own.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSet {
    skills: Vec<Skill>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, skill: Skill) {
        self.skills.push(skill);
    }

    pub fn first(&self) -> Option<&Skill> {
        self.skills.first()
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }
}

/// An equipped weapon contributing a flat strength bonus.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub id: String,
    pub name: String,
    pub strength_bonus: i32,
}

impl Weapon {
    pub fn new(id: impl Into<String>, name: impl Into<String>, strength_bonus: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            strength_bonus,
        }
    }
}

/// A participant in the encounter.
///
/// Combatants are owned by the roster and mutated only by resolution of
/// their own or targeting actions. `speed` stays `None` until initiative is
/// rolled during session assembly and is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub controller: Controller,
    pub level: u32,
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    pub attributes: Attributes,
    pub skills: SkillSet,
    pub weapon: Option<Weapon>,
    pub speed: Option<u32>,
}

impl Combatant {
    /// Default mana pool for combatants that don't override it.
    pub const DEFAULT_MP: u32 = 30;

    pub fn new(
        name: impl Into<String>,
        side: Side,
        controller: Controller,
        max_hp: u32,
        attributes: Attributes,
    ) -> Self {
        Self {
            id: CombatantId(0),
            name: name.into(),
            side,
            controller,
            level: 1,
            hp: ResourceMeter::full(max_hp),
            mp: ResourceMeter::full(Self::DEFAULT_MP),
            attributes,
            skills: SkillSet::new(),
            weapon: None,
            speed: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_skill(mut self, name: impl Into<String>, power: u32) -> Self {
        self.skills.add(Skill::new(name, power));
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_mp(mut self, maximum: u32) -> Self {
        self.mp = ResourceMeter::full(maximum);
        self
    }

    pub fn is_defeated(&self) -> bool {
        self.hp.is_depleted()
    }

    pub fn is_ai_controlled(&self) -> bool {
        self.controller == Controller::Ai
    }

    /// Effective strength after equipment bonuses.
    pub fn effective_strength(&self) -> i32 {
        let bonus = self.weapon.as_ref().map_or(0, |weapon| weapon.strength_bonus);
        self.attributes.strength + bonus
    }

    /// Damage dealt when striking with `skill`: skill power plus effective
    /// strength, floored at the skill's own power.
    pub fn attack_power(&self, skill: &Skill) -> u32 {
        skill.power + self.effective_strength().max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_bonus_feeds_attack_power() {
        let slash = Skill::new("slash", 1);
        let bare = Combatant::new(
            "Warrior",
            Side::Ally,
            Controller::Player,
            20,
            Attributes::new(1, 1, 1, 1, 3),
        );
        let armed = bare
            .clone()
            .with_weapon(Weapon::new("short_sword", "Short Sword", 1));

        assert_eq!(bare.attack_power(&slash), 2);
        assert_eq!(armed.attack_power(&slash), 3);
    }

    #[test]
    fn negative_strength_cannot_reduce_power_below_skill() {
        let skill = Skill::new("bite", 4);
        let mut weakling = Combatant::new(
            "Ghoul",
            Side::Enemy,
            Controller::Ai,
            10,
            Attributes::default(),
        );
        weakling.attributes.strength = -5;
        assert_eq!(weakling.attack_power(&skill), 4);
    }
}
