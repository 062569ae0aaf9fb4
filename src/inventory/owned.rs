use crate::EffectId;
use crate::Handle;
use crate::RelicId;
use crate::data::Color;
use crate::is_empty_effect;

/// relic quality derived from the count of filled primary effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RelicTier {
    Grand,
    Polished,
    Delicate,
}

impl From<usize> for RelicTier {
    fn from(effect_count: usize) -> RelicTier {
        match effect_count {
            n if n >= 3 => RelicTier::Grand,
            2 => RelicTier::Polished,
            _ => RelicTier::Delicate,
        }
    }
}

impl std::fmt::Display for RelicTier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RelicTier::Grand => write!(f, "Grand"),
            RelicTier::Polished => write!(f, "Polished"),
            RelicTier::Delicate => write!(f, "Delicate"),
        }
    }
}

/// content-based identity of a relic, stable across handle reassignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub real_id: RelicId,
    pub effects: [EffectId; 3],
    pub curses: [EffectId; 3],
}

/// a relic owned by the player, canonicalized from save data
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OwnedRelic {
    #[serde(rename = "ga_handle")]
    pub handle: Handle,
    pub item_id: u32,
    pub real_id: RelicId,
    pub color: Color,
    pub effects: [EffectId; 3],
    pub curses: [EffectId; 3],
    pub is_deep: bool,
    pub name: String,
    pub tier: RelicTier,
}

impl OwnedRelic {
    pub fn effect_count(&self) -> usize {
        self.effects.iter().filter(|&&e| !is_empty_effect(e)).count()
    }

    pub fn curse_count(&self) -> usize {
        self.curses.iter().filter(|&&c| !is_empty_effect(c)).count()
    }

    /// filled primary effects followed by filled curses
    pub fn all_effects(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.effects
            .iter()
            .chain(self.curses.iter())
            .copied()
            .filter(|&e| !is_empty_effect(e))
    }

    pub fn filled_effects(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.effects.iter().copied().filter(|&e| !is_empty_effect(e))
    }

    pub fn filled_curses(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.curses.iter().copied().filter(|&c| !is_empty_effect(c))
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            real_id: self.real_id,
            effects: self.effects,
            curses: self.curses,
        }
    }
}
