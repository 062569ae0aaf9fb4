use super::assembly::build_result;
use super::result::VesselResult;
use super::search;
use super::search::Assignment;
use super::search::Candidates;
use crate::Handle;
use crate::build::BuildDefinition;
use crate::data::GameData;
use crate::data::Vessel;
use crate::error::Result;
use crate::inventory::OwnedRelic;
use crate::inventory::RelicInventory;
use crate::score::Scorer;
use std::collections::HashMap;

/// finds optimal relic assignments for vessel slots. one vessel at a
/// time; the multi-vessel pass iterates every vessel admissible for the
/// character and ranks globally.
pub struct Optimizer<'a> {
    data: &'a GameData,
}

impl<'a> Optimizer<'a> {
    pub fn new(data: &'a GameData) -> Optimizer<'a> {
        Optimizer { data }
    }

    /// best assignments for one vessel, up to `top_n` distinct results.
    /// a vessel a pinned relic cannot fit is excluded entirely.
    pub fn optimize(
        &self,
        build: &BuildDefinition,
        inventory: &RelicInventory,
        vessel: &Vessel,
        top_n: usize,
    ) -> Vec<VesselResult> {
        let slots = build.slot_count();
        let scorer = Scorer::new(self.data, build);
        let Some((pinned, slot_owner)) = self.assign_pins(build, inventory, vessel, slots) else {
            return Vec::new();
        };
        let free_slots = (0..slots).filter(|i| slot_owner[*i].is_none()).collect::<Vec<usize>>();
        let mut candidates: Vec<Candidates> = Vec::with_capacity(free_slots.len());
        for &slot in &free_slots {
            let mut scored = inventory
                .candidates(vessel.slot_colors[slot], slot >= 3)
                .into_iter()
                .filter(|r| !scorer.has_blacklisted_effect(r))
                .filter(|r| !pinned.contains_key(&r.handle))
                .map(|r| (scorer.pre_score(r), r))
                .collect::<Candidates>();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            candidates.push(scored);
        }
        let raw_free: Vec<Assignment> = if free_slots.is_empty() {
            vec![Vec::new()]
        } else {
            let total = candidates.iter().map(Vec::len).sum::<usize>();
            if total <= crate::BACKTRACK_MAX_CANDIDATES
                && free_slots.len() <= crate::BACKTRACK_MAX_FREE_SLOTS
            {
                search::backtrack_solve(&scorer, self.data, &candidates, top_n)
            } else {
                search::greedy_solve(&scorer, self.data, &candidates, top_n)
            }
        };
        // merge free-slot results back into full-width assignments
        raw_free
            .into_iter()
            .map(|free| {
                let mut full: Assignment = vec![(None, 0); slots];
                for (position, &slot) in free_slots.iter().enumerate() {
                    full[slot] = free[position];
                }
                for (slot, owner) in slot_owner.iter().enumerate() {
                    if let Some(handle) = owner {
                        full[slot] = (Some(pinned[handle]), 0);
                    }
                }
                build_result(self.data, &scorer, &full, vessel)
            })
            .collect()
    }

    /// optimize every vessel admissible for the named character and rank
    /// globally: results meeting requirements first, then by score.
    pub fn optimize_all_vessels(
        &self,
        build: &BuildDefinition,
        inventory: &RelicInventory,
        character: &str,
        top_n: usize,
        max_per_vessel: usize,
    ) -> Result<Vec<VesselResult>> {
        let hero_type = character.parse::<crate::build::Character>()?.hero_type();
        let mut results = Vec::new();
        for vessel in self.data.vessels_for_hero(hero_type) {
            results.extend(self.optimize(build, inventory, &vessel, max_per_vessel));
        }
        results.sort_by(|a, b| {
            b.meets_requirements
                .cmp(&a.meets_requirements)
                .then(b.total_score.cmp(&a.total_score))
        });
        results.truncate(top_n);
        Ok(results)
    }

    /// walk pinned handles in order, giving each the first unfilled slot
    /// whose deep flag matches and whose color admits the relic. pins
    /// absent from inventory are skipped; a pin with no fitting slot
    /// excludes the vessel (None).
    fn assign_pins<'inv>(
        &self,
        build: &BuildDefinition,
        inventory: &'inv RelicInventory,
        vessel: &Vessel,
        slots: usize,
    ) -> Option<(HashMap<Handle, &'inv OwnedRelic>, Vec<Option<Handle>>)> {
        let mut slot_owner: Vec<Option<Handle>> = vec![None; slots];
        if build.pinned_relics.is_empty() {
            return Some((HashMap::new(), slot_owner));
        }
        let pinned = inventory
            .relics
            .iter()
            .filter(|r| build.pinned_relics.contains(&r.handle))
            .map(|r| (r.handle, r))
            .collect::<HashMap<Handle, &OwnedRelic>>();
        for handle in &build.pinned_relics {
            let Some(relic) = pinned.get(handle) else {
                continue;
            };
            let fit = (0..slots)
                .filter(|&slot| slot_owner[slot].is_none())
                .filter(|&slot| relic.is_deep == (slot >= 3))
                .find(|&slot| vessel.slot_colors[slot].admits(relic.color));
            match fit {
                Some(slot) => slot_owner[slot] = Some(*handle),
                None => {
                    log::debug!(
                        "pinned relic {:#x} does not fit vessel {}",
                        handle,
                        vessel.name
                    );
                    return None;
                }
            }
        }
        Some((pinned, slot_owner))
    }
}
