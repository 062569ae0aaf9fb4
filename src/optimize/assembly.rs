use super::result::MissingRequirement;
use super::result::SlotAssignment;
use super::result::VesselResult;
use crate::EffectId;
use crate::Score;
use crate::build::TierKey;
use crate::data::GameData;
use crate::data::StackingType;
use crate::data::Vessel;
use crate::inventory::OwnedRelic;
use crate::score::BreakdownEntry;
use crate::score::OverrideStatus;
use crate::score::Scorer;
use crate::score::VesselState;
use std::collections::HashMap;
use std::collections::HashSet;

type SlotResult = (Option<OwnedRelic>, Score, Vec<BreakdownEntry>);

/// re-walk a solver assignment slot by slot with a fresh state, computing
/// each placed relic's contextual score and breakdown, then run the
/// tier-family direction correction and the requirements check
pub(super) fn build_result(
    data: &GameData,
    scorer: &Scorer,
    assignment: &[(Option<&OwnedRelic>, Score)],
    vessel: &Vessel,
) -> VesselResult {
    let slots = assignment.len();
    let mut slot_results: Vec<SlotResult> = Vec::with_capacity(slots);
    let mut assigned_effects: HashSet<EffectId> = HashSet::new();
    let mut state = VesselState::default();
    let mut total_score = 0;
    for (relic, _) in assignment {
        match relic {
            Some(relic) => {
                let score = scorer.context_score(relic, &state);
                let breakdown = scorer.breakdown(relic, Some(&state));
                for effect in relic.all_effects() {
                    assigned_effects.insert(effect);
                    if let Some(text) = data.effect_text_id(effect) {
                        assigned_effects.insert(text);
                    }
                }
                state.place(relic, data);
                total_score += score;
                slot_results.push((Some((*relic).clone()), score, breakdown));
            }
            None => slot_results.push((None, 0, Vec::new())),
        }
    }
    let total_score = fix_tier_family_direction(data, scorer, &mut slot_results, total_score);
    let missing = missing_requirements(data, scorer, &assigned_effects);
    let assignments = slot_results
        .into_iter()
        .enumerate()
        .map(|(index, (relic, score, breakdown))| SlotAssignment {
            slot_index: index,
            slot_color: vessel.slot_colors[index],
            is_deep: index >= 3,
            relic,
            score,
            breakdown,
        })
        .collect();
    VesselResult {
        vessel_id: vessel.id,
        vessel_name: vessel.name.clone(),
        vessel_character: vessel.character.clone(),
        unlock_flag: vessel.unlock_flag,
        slot_colors: vessel.slot_colors,
        assignments,
        total_score,
        meets_requirements: missing.is_empty(),
        missing_requirements: missing,
    }
}

/// left-to-right scoring lets a no-stack base in an early slot block a
/// higher-magnitude unique variant in a later one, but the variant always
/// overrides the base. for each real tier-family group holding both, zero
/// every base and restore each distinct variant in slot order; duplicate
/// variants past the first stay redundant.
fn fix_tier_family_direction(
    data: &GameData,
    scorer: &Scorer,
    slot_results: &mut [SlotResult],
    mut total_score: Score,
) -> Score {
    // compat id of the group -> (slot, entry, effect, stacking type)
    let mut groups: HashMap<EffectId, Vec<(usize, usize, EffectId, StackingType)>> = HashMap::new();
    for (slot, (relic, _, breakdown)) in slot_results.iter().enumerate() {
        if relic.is_none() {
            continue;
        }
        for (index, entry) in breakdown.iter().enumerate() {
            let scored = entry.tier.map(|t| t.scored()).unwrap_or(false);
            if !scored {
                continue;
            }
            let Some(compat) = data.effect_compat_id(entry.effect_id) else {
                continue;
            };
            if !data.is_self_referencing(compat) {
                continue;
            }
            let stype = data.stacking_type(entry.effect_id);
            if stype == StackingType::NoStack || stype == StackingType::Unique {
                groups
                    .entry(compat)
                    .or_default()
                    .push((slot, index, entry.effect_id, stype));
            }
        }
    }
    for members in groups.values() {
        let has_base = members.iter().any(|(_, _, _, s)| *s == StackingType::NoStack);
        let has_variant = members.iter().any(|(_, _, _, s)| *s == StackingType::Unique);
        if !(has_base && has_variant) {
            continue;
        }
        // every base is redundant while a variant is present
        for (slot, index, _, stype) in members {
            if *stype != StackingType::NoStack {
                continue;
            }
            let (_, slot_score, breakdown) = &mut slot_results[*slot];
            let entry = &mut breakdown[*index];
            let old = entry.score;
            if old > 0 {
                entry.suppress(OverrideStatus::Overridden);
                *slot_score -= old;
                total_score -= old;
            }
        }
        // restore each distinct variant in slot order
        let mut ordered = members.clone();
        ordered.sort_by_key(|(slot, _, _, _)| *slot);
        let mut restored: HashSet<EffectId> = HashSet::new();
        for (slot, index, effect, stype) in ordered {
            if stype != StackingType::Unique {
                continue;
            }
            if !restored.insert(effect) {
                continue; // duplicate of an already-scored variant
            }
            let (_, slot_score, breakdown) = &mut slot_results[slot];
            let entry = &mut breakdown[index];
            if !entry.redundant {
                continue; // already scoring, e.g. the variant came first
            }
            let Some((_, weight)) = scorer.resolve_tier(effect) else {
                continue;
            };
            if weight <= 0 {
                continue;
            }
            entry.restore(weight);
            *slot_score += weight;
            total_score += weight;
        }
    }
    total_score
}

/// a result meets requirements when every required effect id is covered
/// (directly, via text alias, or by display-name equivalence) and every
/// required family has at least one assigned member
fn missing_requirements(
    data: &GameData,
    scorer: &Scorer,
    assigned: &HashSet<EffectId>,
) -> Vec<MissingRequirement> {
    let build = scorer.build();
    let required = build.effects_in(TierKey::Required);
    let mut covered: HashSet<EffectId> = required
        .iter()
        .copied()
        .filter(|id| assigned.contains(id))
        .collect();
    // display-name equivalence rescues alias ids the direct and text-id
    // checks missed
    let uncovered_names: HashMap<String, EffectId> = required
        .iter()
        .filter(|id| !covered.contains(id))
        .map(|&id| (data.effect_name(id), id))
        .filter(|(name, _)| name != "Empty" && !name.starts_with("Effect "))
        .collect();
    if !uncovered_names.is_empty() {
        for &effect in assigned {
            if let Some(&required_id) = uncovered_names.get(&data.effect_name(effect)) {
                covered.insert(required_id);
            }
        }
    }
    let mut missing: Vec<MissingRequirement> = required
        .iter()
        .filter(|id| !covered.contains(id))
        .map(|&id| MissingRequirement::Effect(id))
        .collect();
    for family in build.families_in(TierKey::Required) {
        let ids = data.family_effect_ids(family);
        if ids.is_disjoint(assigned) {
            missing.push(MissingRequirement::Family(family.clone()));
        }
    }
    missing
}
