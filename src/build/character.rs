use crate::error::PlannerError;

/// hero type shared vessels are bound to instead of a single class
pub const HERO_TYPE_ALL: i64 = 11;

/// the ten playable classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Character {
    Wylder = 0,
    Guardian = 1,
    Ironeye = 2,
    Duchess = 3,
    Raider = 4,
    Revenant = 5,
    Recluse = 6,
    Executor = 7,
    Scholar = 8,
    Undertaker = 9,
}

impl Character {
    pub const ALL: [Character; 10] = [
        Character::Wylder,
        Character::Guardian,
        Character::Ironeye,
        Character::Duchess,
        Character::Raider,
        Character::Revenant,
        Character::Recluse,
        Character::Executor,
        Character::Scholar,
        Character::Undertaker,
    ];

    /// hero type as the vessel table encodes it (1-based)
    pub fn hero_type(&self) -> i64 {
        *self as i64 + 1
    }

    /// id of the class name in the NPC name document
    pub fn npc_name_id(&self) -> i64 {
        match self {
            Character::Wylder => 100000,
            Character::Guardian => 100030,
            Character::Ironeye => 100050,
            Character::Duchess => 100010,
            Character::Raider => 100040,
            Character::Revenant => 100090,
            Character::Recluse => 100070,
            Character::Executor => 100060,
            Character::Scholar => 110000,
            Character::Undertaker => 110010,
        }
    }

    /// index into the effect table's per-class allow flags
    pub fn allow_index(&self) -> usize {
        *self as usize
    }
}

impl std::str::FromStr for Character {
    type Err = PlannerError;

    fn from_str(name: &str) -> Result<Character, PlannerError> {
        Character::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| PlannerError::UnknownCharacterClass(name.to_string()))
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Character::Wylder => write!(f, "Wylder"),
            Character::Guardian => write!(f, "Guardian"),
            Character::Ironeye => write!(f, "Ironeye"),
            Character::Duchess => write!(f, "Duchess"),
            Character::Raider => write!(f, "Raider"),
            Character::Revenant => write!(f, "Revenant"),
            Character::Recluse => write!(f, "Recluse"),
            Character::Executor => write!(f, "Executor"),
            Character::Scholar => write!(f, "Scholar"),
            Character::Undertaker => write!(f, "Undertaker"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_types_are_one_based() {
        assert_eq!(Character::Wylder.hero_type(), 1);
        assert_eq!(Character::Undertaker.hero_type(), 10);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("wylder".parse::<Character>().unwrap(), Character::Wylder);
        assert_eq!("RECLUSE".parse::<Character>().unwrap(), Character::Recluse);
    }

    #[test]
    fn unknown_class_errors() {
        assert!(matches!(
            "Tarnished".parse::<Character>(),
            Err(PlannerError::UnknownCharacterClass(_))
        ));
    }
}
