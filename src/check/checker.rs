use super::reason::InvalidReason;
use crate::EffectId;
use crate::RelicId;
use crate::data::GameData;
use crate::inventory::RelicGroup;
use crate::is_empty_effect;

/// plausible real-id range for anything resembling a relic
const RELIC_RANGE: (RelicId, RelicId) = (100, 2_013_322);

/// the six orderings an effect triple can occupy on a relic
const SEQUENCES: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// pure relic validity checking over the reference pool data. effects are
/// passed as the six-wide `[e1, e2, e3, curse1, curse2, curse3]` array the
/// save parser produces.
pub struct RelicChecker<'a> {
    data: &'a GameData,
}

impl<'a> RelicChecker<'a> {
    pub fn new(data: &'a GameData) -> RelicChecker<'a> {
        RelicChecker { data }
    }

    // ------------------------------------------------------------------
    // primary validation
    // ------------------------------------------------------------------

    /// first reason the relic is invalid, or None when it checks out
    pub fn check_invalidity(&self, relic: RelicId, effects: &[EffectId; 6]) -> Option<InvalidReason> {
        if RelicGroup::Illegal.contains(relic) {
            return Some(InvalidReason::InIllegalRange);
        }
        if !(RELIC_RANGE.0..=RELIC_RANGE.1).contains(&relic) {
            return Some(InvalidReason::InvalidItem);
        }
        if let Some(reason) = self.check_pools(relic, effects) {
            return Some(reason);
        }
        let curse_bound = effects[..3]
            .iter()
            .filter(|&&e| self.data.effect_needs_curse(e))
            .count();
        let curses_given = effects[3..].iter().filter(|&&c| !is_empty_effect(c)).count();
        if curse_bound > curses_given {
            return Some(InvalidReason::CursesNotEnough);
        }
        let mut seen_compat: Vec<Option<EffectId>> = Vec::new();
        for (index, &effect) in effects.iter().enumerate() {
            if is_empty_effect(effect) {
                continue;
            }
            let compat = self.data.effect_compat_id(effect);
            if compat.is_some() && seen_compat.contains(&compat) {
                return Some(if index < 3 {
                    InvalidReason::EffectConflict
                } else {
                    InvalidReason::CurseConflict
                });
            }
            seen_compat.push(compat);
        }
        let mut ordered = effects[..3]
            .iter()
            .map(|&e| (self.sort_key(e), e))
            .collect::<Vec<((i64, EffectId), EffectId)>>();
        ordered.sort_by_key(|(key, _)| *key);
        for (index, (_, effect)) in ordered.iter().enumerate() {
            if *effect != effects[index] {
                return Some(InvalidReason::EffectsNotSorted);
            }
        }
        None
    }

    /// pool membership over the six orderings: fine when any ordering is
    /// fully valid, otherwise the canonical ordering's first failure
    fn check_pools(&self, relic: RelicId, effects: &[EffectId; 6]) -> Option<InvalidReason> {
        let rows = self.check_sequences(relic, effects, true);
        let (_, last) = rows.last()?;
        if last.len() == 1 && last[0] == Some(InvalidReason::ValidationError) {
            return Some(InvalidReason::ValidationError);
        }
        if last.iter().all(Option::is_none) {
            return None;
        }
        let (_, first) = rows.first()?;
        first.iter().flatten().next().copied()
    }

    /// check all six effect orderings against the relic's pools. each row
    /// holds one Option<InvalidReason> per slot (three primaries, three
    /// curses); stop_on_valid returns as soon as a fully valid row is
    /// found.
    pub fn check_sequences(
        &self,
        relic: RelicId,
        effects: &[EffectId; 6],
        stop_on_valid: bool,
    ) -> Vec<([usize; 3], Vec<Option<InvalidReason>>)> {
        let Some(pools) = self.data.relic_pools_seq(relic) else {
            return vec![([0, 1, 2], vec![Some(InvalidReason::ValidationError)])];
        };
        let mut results = Vec::new();
        for sequence in SEQUENCES {
            let ordered_effects = sequence.map(|i| effects[i]);
            let ordered_curses = sequence.map(|i| effects[i + 3]);
            let mut row: Vec<Option<InvalidReason>> = Vec::with_capacity(6);
            for slot in 0..3 {
                let effect = ordered_effects[slot];
                let pool = pools[slot];
                row.push(if pool == -1 {
                    if is_empty_effect(effect) {
                        None
                    } else {
                        Some(InvalidReason::EffectMustBeEmpty)
                    }
                } else if is_empty_effect(effect) {
                    None
                } else if !self.data.pool_rollable_effects(pool).contains(&effect) {
                    Some(InvalidReason::EffectNotInRollablePool)
                } else {
                    None
                });
            }
            for slot in 0..3 {
                let curse = ordered_curses[slot];
                let effect = ordered_effects[slot];
                let pool = pools[slot + 3];
                row.push(if pool == -1 {
                    if is_empty_effect(curse) {
                        None
                    } else {
                        Some(InvalidReason::CurseMustBeEmpty)
                    }
                } else if is_empty_effect(curse) {
                    if self.data.effect_needs_curse(effect) {
                        Some(InvalidReason::CurseRequiredByEffect)
                    } else {
                        None
                    }
                } else if !self.data.pool_rollable_effects(pool).contains(&curse) {
                    Some(InvalidReason::CurseNotInRollablePool)
                } else {
                    None
                });
            }
            let valid = row.iter().all(Option::is_none);
            results.push((sequence, row));
            if stop_on_valid && valid {
                return results;
            }
        }
        results
    }

    // ------------------------------------------------------------------
    // strict validity
    // ------------------------------------------------------------------

    /// true when no permutation gives every effect non-zero weight in its
    /// specific deep pool slot (broader than normal invalidity, which
    /// merges the deep pools)
    pub fn is_strict_invalid(&self, relic: RelicId, effects: &[EffectId; 6]) -> bool {
        if self.check_invalidity(relic, effects).is_some() {
            return false;
        }
        let Some(pools) = self.data.relic_pools_seq(relic) else {
            return false;
        };
        if !pools[..3].iter().any(|p| crate::DEEP_POOLS.contains(p)) {
            return false;
        }
        for sequence in SEQUENCES {
            let ordered = sequence.map(|i| effects[i]);
            let valid = (0..3).all(|slot| {
                let effect = ordered[slot];
                let pool = pools[slot];
                is_empty_effect(effect)
                    || !crate::DEEP_POOLS.contains(&pool)
                    || self.data.pool_effects_strict(pool).contains(&effect)
            });
            if valid {
                return false;
            }
        }
        true
    }

    /// human-readable account of a strict invalidity, naming the pools an
    /// effect would need
    pub fn strict_invalid_reason(&self, relic: RelicId, effects: &[EffectId; 6]) -> Option<String> {
        if !self.is_strict_invalid(relic, effects) {
            return None;
        }
        let pools = self.data.relic_pools_seq(relic)?;
        let pool_name = |pool: i64| match pool {
            2_000_000 => "Pool A".to_string(),
            2_100_000 => "Pool B".to_string(),
            2_200_000 => "Pool C".to_string(),
            other => other.to_string(),
        };
        let mut problems = Vec::new();
        for (slot, &effect) in effects[..3].iter().enumerate() {
            if is_empty_effect(effect) {
                continue;
            }
            let pool = pools[slot];
            if !crate::DEEP_POOLS.contains(&pool) {
                continue;
            }
            if self.data.pool_effects_strict(pool).contains(&effect) {
                continue;
            }
            let name = self.data.effect_name(effect);
            let valid_pools = crate::DEEP_POOLS
                .iter()
                .filter(|&&p| self.data.pool_effects_strict(p).contains(&effect))
                .map(|&p| pool_name(p))
                .collect::<Vec<String>>();
            if valid_pools.is_empty() {
                problems.push(format!("'{}' has 0 weight in all deep pools", name));
            } else {
                problems.push(format!(
                    "'{}' needs {} but slot {} uses {}",
                    name,
                    valid_pools.join("/"),
                    slot + 1,
                    pool_name(pool)
                ));
            }
        }
        if problems.is_empty() {
            Some("No valid permutation exists".to_string())
        } else {
            Some(problems.join("; "))
        }
    }

    // ------------------------------------------------------------------
    // effect ordering
    // ------------------------------------------------------------------

    /// sort effects by override id, keeping curses paired with the
    /// primaries that need them
    pub fn sort_effects(&self, effects: &[EffectId; 6]) -> [EffectId; 6] {
        let mut curses = effects[3..]
            .iter()
            .map(|&c| (self.sort_key(c), c))
            .collect::<Vec<((i64, EffectId), EffectId)>>();
        curses.sort_by_key(|(key, _)| *key);
        let mut sorted_curses = curses.into_iter().map(|(_, c)| c).collect::<Vec<EffectId>>();
        let mut pairs = Vec::with_capacity(3);
        for &effect in &effects[..3] {
            let curse = if self.data.effect_needs_curse(effect) {
                sorted_curses.remove(0)
            } else {
                sorted_curses.pop().expect("three curse slots")
            };
            pairs.push((self.sort_key(effect), effect, curse));
        }
        pairs.sort_by_key(|(key, _, _)| *key);
        [
            pairs[0].1, pairs[1].1, pairs[2].1, pairs[0].2, pairs[1].2, pairs[2].2,
        ]
    }

    pub fn has_valid_order(&self, relic: RelicId, effects: &[EffectId; 6]) -> bool {
        self.valid_order(relic, effects).is_some()
    }

    /// sorted effects if any permutation passes the rollable-pool check
    pub fn valid_order(&self, relic: RelicId, effects: &[EffectId; 6]) -> Option<[EffectId; 6]> {
        let rows = self.check_sequences(relic, effects, true);
        let (_, last) = rows.last()?;
        if last.iter().all(Option::is_none) {
            Some(self.sort_effects(effects))
        } else {
            None
        }
    }

    /// sorted effects if any permutation passes the strict-pool check
    pub fn strictly_valid_order(&self, relic: RelicId, effects: &[EffectId; 6]) -> Option<[EffectId; 6]> {
        let pools = self.data.relic_pools_seq(relic)?;
        for sequence in SEQUENCES {
            let ordered_effects = sequence.map(|i| effects[i]);
            let ordered_curses = sequence.map(|i| effects[i + 3]);
            let mut valid = true;
            for slot in 0..3 {
                let effect = ordered_effects[slot];
                let curse = ordered_curses[slot];
                let pool = pools[slot];
                let curse_pool = pools[slot + 3];
                if is_empty_effect(effect) {
                    continue;
                }
                if !self.data.pool_effects_strict(pool).contains(&effect) {
                    valid = false;
                    break;
                }
                if self.data.effect_needs_curse(effect) {
                    if curse_pool == -1 || is_empty_effect(curse) {
                        valid = false;
                        break;
                    }
                    if !self.data.pool_effects_strict(curse_pool).contains(&curse) {
                        valid = false;
                        break;
                    }
                }
                if !is_empty_effect(curse) && curse_pool == -1 {
                    valid = false;
                    break;
                }
            }
            if valid {
                return Some(self.sort_effects(effects));
            }
        }
        None
    }

    /// the ordering key the game sorts effect slots by: override id first,
    /// then the raw id; empty slots sort last
    fn sort_key(&self, effect: EffectId) -> (i64, EffectId) {
        if is_empty_effect(effect) {
            (i64::MAX, effect)
        } else {
            let sort_id = self
                .data
                .effect_exclusivity_id(effect)
                .map(|id| id as i64)
                .unwrap_or(-1);
            (sort_id, effect)
        }
    }
}
