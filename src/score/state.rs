use crate::EffectId;
use crate::data::GameData;
use crate::data::StackingType;
use crate::inventory::OwnedRelic;
use std::collections::HashMap;
use std::collections::HashSet;

/// accumulating vessel state the contextual scorer reads: which effect
/// ids (and text aliases) are placed, which exclusivity groups are taken,
/// which of those came from no-stack effects, which no-stack tier-family
/// bases are down, and how often each curse occurs.
#[derive(Debug, Clone, Default)]
pub struct VesselState {
    pub placed: HashSet<EffectId>,
    pub exclusivity: HashSet<EffectId>,
    pub no_stack_exclusivity: HashSet<EffectId>,
    pub no_stack_compat: HashSet<EffectId>,
    pub curse_counts: HashMap<EffectId, u32>,
}

/// undo log of one relic placement: exactly the elements whose insertion
/// was new, so the backtracker can push and pop symmetrically
#[derive(Debug, Default)]
pub struct Placement {
    placed: Vec<EffectId>,
    exclusivity: Vec<EffectId>,
    no_stack_exclusivity: Vec<EffectId>,
    no_stack_compat: Vec<EffectId>,
    curses: Vec<EffectId>,
}

impl VesselState {
    pub fn curse_count(&self, curse: EffectId) -> u32 {
        self.curse_counts.get(&curse).copied().unwrap_or(0)
    }

    /// grow the state with a relic's additions.
    ///
    /// per primary and curse effect: the id and its text alias join the
    /// placed set; an exclusivity id joins the exclusivity set, and also
    /// the no-stack variant when the effect itself is no-stack. a
    /// self-referencing no-stack base marks its compatibility id as down.
    /// a variant pointing at a real no-stack tier-family base adds the
    /// base id to the placed set only, never to no-stack-compatibility,
    /// which would wrongly block sibling variants.
    pub fn place(&mut self, relic: &OwnedRelic, data: &GameData) -> Placement {
        let mut log = Placement::default();
        for effect in relic.all_effects() {
            let stype = data.stacking_type(effect);
            let compat = data.effect_compat_id(effect);
            if self.placed.insert(effect) {
                log.placed.push(effect);
            }
            if let Some(text) = data.effect_text_id(effect) {
                if text != effect && self.placed.insert(text) {
                    log.placed.push(text);
                }
            }
            if let Some(exclusivity) = data.effect_exclusivity_id(effect) {
                if self.exclusivity.insert(exclusivity) {
                    log.exclusivity.push(exclusivity);
                }
                if stype == StackingType::NoStack && self.no_stack_exclusivity.insert(exclusivity)
                {
                    log.no_stack_exclusivity.push(exclusivity);
                }
            }
            if stype == StackingType::NoStack && compat == Some(effect) {
                if self.no_stack_compat.insert(effect) {
                    log.no_stack_compat.push(effect);
                }
            } else if let Some(base) = compat {
                if base != effect
                    && data.is_self_referencing(base)
                    && data.stacking_type(base) == StackingType::NoStack
                    && self.placed.insert(base)
                {
                    log.placed.push(base);
                }
            }
        }
        for curse in relic.filled_curses() {
            *self.curse_counts.entry(curse).or_insert(0) += 1;
            log.curses.push(curse);
        }
        log
    }

    pub fn unplace(&mut self, log: &Placement) {
        for effect in &log.placed {
            self.placed.remove(effect);
        }
        for exclusivity in &log.exclusivity {
            self.exclusivity.remove(exclusivity);
        }
        for exclusivity in &log.no_stack_exclusivity {
            self.no_stack_exclusivity.remove(exclusivity);
        }
        for compat in &log.no_stack_compat {
            self.no_stack_compat.remove(compat);
        }
        for curse in &log.curses {
            if let Some(count) = self.curse_counts.get_mut(curse) {
                *count -= 1;
                if *count == 0 {
                    self.curse_counts.remove(curse);
                }
            }
        }
    }
}
