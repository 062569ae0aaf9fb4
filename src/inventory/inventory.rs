use super::groups;
use super::owned::OwnedRelic;
use super::owned::RelicTier;
use super::raw::RawRelic;
use crate::data::Color;
use crate::data::GameData;
use std::collections::HashSet;

/// queryable collection of a character's owned relics
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RelicInventory {
    pub relics: Vec<OwnedRelic>,
}

impl RelicInventory {
    /// canonicalize raw save records against the reference data.
    ///
    /// unique-category real ids keep their first occurrence only, as do
    /// exact fingerprint duplicates. rows the reference data marks
    /// colorless are not real relics and are skipped; unknown real ids
    /// keep a placeholder name and default to Red.
    pub fn from_raw(raw: &[RawRelic], data: &GameData) -> RelicInventory {
        let mut relics = Vec::new();
        let mut seen_unique = HashSet::new();
        let mut seen_fingerprints = HashSet::new();
        for record in raw {
            let real_id = record.real_id();
            if groups::is_unique_relic(real_id) && !seen_unique.insert(real_id) {
                continue;
            }
            let color = match data.relic_color_code(real_id) {
                None => Color::Red,
                Some(code) => match Color::from_code(code) {
                    Some(color) => color,
                    None => continue,
                },
            };
            let name = data
                .relic_name(real_id)
                .unwrap_or_else(|| format!("Relic {}", real_id));
            let relic = OwnedRelic {
                handle: record.handle,
                item_id: record.item_id,
                real_id,
                color,
                effects: record.effects,
                curses: record.curses,
                is_deep: groups::is_deep_relic(real_id),
                name,
                tier: RelicTier::from(
                    record
                        .effects
                        .iter()
                        .filter(|&&e| !crate::is_empty_effect(e))
                        .count(),
                ),
            };
            if !seen_fingerprints.insert(relic.fingerprint()) {
                continue;
            }
            relics.push(relic);
        }
        RelicInventory { relics }
    }

    pub fn from_owned(relics: Vec<OwnedRelic>) -> RelicInventory {
        RelicInventory { relics }
    }

    pub fn len(&self) -> usize {
        self.relics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relics.is_empty()
    }

    pub fn by_color(&self, color: Color) -> impl Iterator<Item = &OwnedRelic> + '_ {
        self.relics.iter().filter(move |r| r.color == color)
    }

    pub fn standard(&self) -> impl Iterator<Item = &OwnedRelic> + '_ {
        self.relics.iter().filter(|r| !r.is_deep)
    }

    pub fn deep(&self) -> impl Iterator<Item = &OwnedRelic> + '_ {
        self.relics.iter().filter(|r| r.is_deep)
    }

    /// relics eligible for a slot: matching deep flag, matching color
    /// unless the slot is White
    pub fn candidates(&self, slot_color: Color, deep_slot: bool) -> Vec<&OwnedRelic> {
        self.relics
            .iter()
            .filter(|r| r.is_deep == deep_slot)
            .filter(|r| slot_color.admits(r.color))
            .collect()
    }
}
