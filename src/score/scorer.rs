use super::breakdown::BreakdownEntry;
use super::breakdown::OverrideStatus;
use super::state::VesselState;
use crate::EffectId;
use crate::Score;
use crate::build::BuildDefinition;
use crate::build::TierKey;
use crate::data::GameData;
use crate::data::StackingType;
use crate::inventory::OwnedRelic;
use std::collections::HashMap;

/// tier bonus for relics with more filled effect slots (a tiebreaker)
fn effect_count_bonus(count: usize) -> Score {
    crate::EFFECT_COUNT_BONUS[count.min(crate::EFFECT_COUNT_BONUS.len() - 1)]
}

/// scores relics against one build with effect-stacking awareness.
/// construct per (data, build) pair; the display-name tier cache is built
/// up front.
pub struct Scorer<'a> {
    data: &'a GameData,
    build: &'a BuildDefinition,
    name_tiers: HashMap<String, TierKey>,
}

impl<'a> Scorer<'a> {
    pub fn new(data: &'a GameData, build: &'a BuildDefinition) -> Scorer<'a> {
        let mut name_tiers = HashMap::new();
        for tier in TierKey::ALL {
            for &effect in build.effects_in(tier) {
                let name = data.effect_name(effect);
                if name != "Empty" && !name.starts_with("Effect ") {
                    name_tiers.entry(name).or_insert(tier);
                }
            }
        }
        Scorer {
            data,
            build,
            name_tiers,
        }
    }

    pub fn build(&self) -> &BuildDefinition {
        self.build
    }

    // ------------------------------------------------------------------
    // tier resolution
    // ------------------------------------------------------------------

    /// resolution ladder: direct id in a tier list, tier via the text
    /// alias, tier via display name, then the family tier with magnitude
    /// scaling where the tier wants it
    pub fn resolve_tier(&self, effect: EffectId) -> Option<(TierKey, Score)> {
        let tier = self
            .build
            .tier_of_effect(effect)
            .or_else(|| {
                let text = self.data.effect_text_id(effect)?;
                if text != effect {
                    self.build.tier_of_effect(text)
                } else {
                    None
                }
            })
            .or_else(|| {
                self.name_tiers
                    .get(&self.data.effect_name(effect))
                    .copied()
            });
        if let Some(tier) = tier {
            return Some((tier, self.build.effective_weight(tier)));
        }
        let family = self.data.effect_family(effect)?.to_string();
        let tier = self.build.tier_of_family(&family)?;
        let weight = self.build.effective_weight(tier);
        let weight = if tier.magnitude_weighted() {
            self.data.family_magnitude_weight(effect, weight)
        } else {
            weight
        };
        Some((tier, weight))
    }

    // ------------------------------------------------------------------
    // blacklist gate
    // ------------------------------------------------------------------

    /// a relic carrying any blacklisted effect (by id, text alias,
    /// display name, or family) is filtered out before scoring
    pub fn has_blacklisted_effect(&self, relic: &OwnedRelic) -> bool {
        let ids = self.build.effects_in(TierKey::Blacklist);
        let families = self.build.families_in(TierKey::Blacklist);
        if ids.is_empty() && families.is_empty() {
            return false;
        }
        let names = ids
            .iter()
            .map(|&id| self.data.effect_name(id))
            .filter(|n| n != "Empty" && !n.starts_with("Effect "))
            .collect::<Vec<String>>();
        for effect in relic.all_effects() {
            if ids.contains(&effect) {
                return true;
            }
            if let Some(text) = self.data.effect_text_id(effect) {
                if text != effect && ids.contains(&text) {
                    return true;
                }
            }
            if !names.is_empty() {
                let name = self.data.effect_name(effect);
                if names.contains(&name) {
                    return true;
                }
            }
            if !families.is_empty() {
                if let Some(family) = self.data.effect_family(effect) {
                    if families.iter().any(|f| f == family) {
                        return true;
                    }
                }
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // scoring
    // ------------------------------------------------------------------

    /// context-free pre-score used for the initial sort and pruning. the
    /// effect-count bonus is a tiebreaker between relevant relics; a
    /// relic matching nothing in the build stays at zero.
    pub fn pre_score(&self, relic: &OwnedRelic) -> Score {
        let mut score = 0;
        let mut relevant = false;
        for effect in relic.all_effects() {
            if let Some((tier, weight)) = self.resolve_tier(effect) {
                if tier.scored() {
                    score += weight;
                    relevant = true;
                }
            }
        }
        if relevant {
            score += effect_count_bonus(relic.effect_count());
        }
        score
    }

    /// weight of one effect under the accumulated vessel state; zero when
    /// its stacking type says it is redundant there
    fn stacking_score(&self, effect: EffectId, weight: Score, state: &VesselState) -> Score {
        let compat = self.data.effect_compat_id(effect);
        let text = self.data.effect_text_id(effect);
        match self.data.stacking_type(effect) {
            StackingType::Stack => weight,
            StackingType::Unique => {
                if state.placed.contains(&effect) {
                    return 0;
                }
                if let Some(text) = text {
                    if state.placed.contains(&text) {
                        return 0;
                    }
                }
                if let Some(compat) = compat {
                    if state.no_stack_compat.contains(&compat) {
                        return 0;
                    }
                }
                weight
            }
            StackingType::NoStack => {
                if let Some(exclusivity) = self.data.effect_exclusivity_id(effect) {
                    if state.exclusivity.contains(&exclusivity)
                        || state.no_stack_exclusivity.contains(&exclusivity)
                    {
                        return 0;
                    }
                }
                if let Some(compat) = compat {
                    if state.no_stack_compat.contains(&compat) {
                        return 0;
                    }
                } else if state.placed.contains(&effect) {
                    return 0;
                }
                if let Some(text) = text {
                    if state.placed.contains(&text) {
                        return 0;
                    }
                }
                weight
            }
        }
    }

    /// score a relic given what earlier slots already placed, including
    /// the excess-curse penalty past the build's tolerance
    pub fn context_score(&self, relic: &OwnedRelic, state: &VesselState) -> Score {
        let mut score = 0;
        let mut relevant = false;
        for effect in relic.all_effects() {
            if let Some((tier, weight)) = self.resolve_tier(effect) {
                if tier.scored() {
                    score += self.stacking_score(effect, weight, state);
                    relevant = true;
                }
            }
        }
        for curse in relic.filled_curses() {
            if state.curse_count(curse) >= self.build.curse_max {
                score += crate::CURSE_EXCESS_PENALTY;
            }
        }
        if relevant {
            score += effect_count_bonus(relic.effect_count());
        }
        score
    }

    // ------------------------------------------------------------------
    // breakdown
    // ------------------------------------------------------------------

    fn classify_override(&self, effect: EffectId, state: &VesselState) -> OverrideStatus {
        if state.placed.contains(&effect) {
            return OverrideStatus::Duplicate;
        }
        if let Some(text) = self.data.effect_text_id(effect) {
            if state.placed.contains(&text) {
                return OverrideStatus::Duplicate;
            }
        }
        OverrideStatus::Overridden
    }

    /// per-effect scoring detail; pass the vessel state to mark redundant
    /// entries, or None for a context-free view
    pub fn breakdown(&self, relic: &OwnedRelic, state: Option<&VesselState>) -> Vec<BreakdownEntry> {
        let mut entries = Vec::new();
        let effects = relic
            .filled_effects()
            .map(|e| (e, false))
            .chain(relic.filled_curses().map(|c| (c, true)));
        for (effect, is_curse) in effects {
            let resolved = self.resolve_tier(effect);
            let tier = resolved.map(|(tier, _)| tier);
            let base_score = resolved.map(|(_, weight)| weight).unwrap_or(0);
            let mut override_status = None;
            if let (Some(state), Some((tier, weight))) = (state, resolved) {
                if tier.scored() {
                    let contextual = self.stacking_score(effect, weight, state);
                    if contextual == 0 && base_score != 0 {
                        override_status = Some(self.classify_override(effect, state));
                    }
                }
            }
            entries.push(BreakdownEntry {
                effect_id: effect,
                name: self.data.effect_name(effect),
                tier,
                score: if override_status.is_some() { 0 } else { base_score },
                is_curse,
                redundant: override_status.is_some(),
                override_status,
            });
        }
        entries
    }
}
