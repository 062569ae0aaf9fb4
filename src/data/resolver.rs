use super::color::Color;
use super::family::Families;
use super::family::Family;
use super::family::FamilyMember;
use super::family::FamilyRank;
use super::family::split_magnitude;
use super::language;
use super::params::EffectTable;
use super::pools::PoolTable;
use super::relics::RelicTable;
use super::stacking::StackingRules;
use super::stacking::StackingType;
use super::stacking::normalize;
use super::stacking::strip_parenthetical;
use super::text::FmgText;
use super::vessels::Vessel;
use super::vessels::VesselTable;
use crate::EffectId;
use crate::PoolId;
use crate::RelicId;
use crate::build::Character;
use crate::build::HERO_TYPE_ALL;
use crate::error::PlannerError;
use crate::error::Result;
use crate::is_empty_effect;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

/// one entry of the deduplicated effects catalogue served to collaborators
#[derive(Debug, Clone, serde::Serialize)]
pub struct EffectInfo {
    pub id: EffectId,
    pub name: String,
    pub alias_ids: Vec<EffectId>,
    pub compatibility_id: Option<EffectId>,
    pub is_debuff: bool,
    pub allowed: BTreeMap<String, bool>,
    pub source: Option<String>,
}

/// loads all static reference tables at construction and serves pure
/// queries afterwards. construct once and share by reference; the
/// stacking and family caches initialize on first query behind OnceLock
/// so later concurrent readers are safe.
pub struct GameData {
    effects: EffectTable,
    pools: PoolTable,
    relics: RelicTable,
    vessels: VesselTable,
    relic_names: FmgText,
    effect_names: FmgText,
    goods_names: FmgText,
    scene_relics: HashSet<RelicId>,
    rules: StackingRules,
    character_names: Vec<String>,
    stacking: OnceLock<HashMap<EffectId, StackingType>>,
    families: OnceLock<Families>,
}

impl GameData {
    pub fn load(resources: &Path, lang: &str) -> Result<GameData> {
        let param = resources.join("param");
        if !param.is_dir() {
            return Err(PlannerError::MissingResource(param.display().to_string()));
        }
        let text = resources.join("text").join(language::resolve(lang));
        let effects = EffectTable::load(&param.join("AttachEffectParam.csv"))?;
        let pools = PoolTable::load(&param.join("AttachEffectTableParam.csv"))?;
        let relics = RelicTable::load(&param.join("EquipParamAntique.csv"))?;
        let vessels = VesselTable::load(&param.join("AntiqueStandParam.csv"))?;
        let (relic_names, dlc_relic_ids) = FmgText::load_merged(&text, "AntiqueName")?;
        let (effect_names, _) = FmgText::load_merged(&text, "AttachEffectName")?;
        let (npc_names, _) = FmgText::load_merged(&text, "NpcName")?;
        let (goods_names, _) = FmgText::load_merged(&text, "GoodsName")?;
        let rules = StackingRules::load(&resources.join("json").join("stacking_rules.json"))?;
        let character_names = Character::ALL
            .iter()
            .map(|c| {
                npc_names
                    .get(c.npc_name_id())
                    .map(str::to_string)
                    .unwrap_or_else(|| c.to_string())
            })
            .collect();
        log::info!(
            "loaded game data: {} effects, {} relic rows",
            effects.len(),
            relics.ids().count()
        );
        Ok(GameData {
            effects,
            pools,
            relics,
            vessels,
            relic_names,
            effect_names,
            goods_names,
            scene_relics: dlc_relic_ids.into_iter().collect(),
            rules,
            character_names,
            stacking: OnceLock::new(),
            families: OnceLock::new(),
        })
    }

    // ------------------------------------------------------------------
    // effect queries
    // ------------------------------------------------------------------

    /// display name for an effect. sentinels resolve to "Empty", ids with
    /// no name anywhere to "Effect {id}"; neither ever fails.
    pub fn effect_name(&self, effect: EffectId) -> String {
        if is_empty_effect(effect) {
            return "Empty".to_string();
        }
        if let Some(name) = self.effect_names.get(effect as i64) {
            return name.to_string();
        }
        if let Some(text) = self.effect_text_id(effect) {
            if let Some(name) = self.effect_names.get(text as i64) {
                return name.to_string();
            }
        }
        format!("Effect {}", effect)
    }

    /// canonical text alias; several parameter ids may share one
    pub fn effect_text_id(&self, effect: EffectId) -> Option<EffectId> {
        if is_empty_effect(effect) {
            return None;
        }
        self.effects.get(effect)?.text
    }

    /// the stacking group
    pub fn effect_compat_id(&self, effect: EffectId) -> Option<EffectId> {
        if is_empty_effect(effect) {
            return None;
        }
        self.effects.get(effect)?.compatibility
    }

    /// the mutual-exclusion group, stronger than compatibility
    pub fn effect_exclusivity_id(&self, effect: EffectId) -> Option<EffectId> {
        if is_empty_effect(effect) {
            return None;
        }
        self.effects.get(effect)?.exclusivity
    }

    pub fn effect_is_debuff(&self, effect: EffectId) -> bool {
        self.effects.get(effect).map(|p| p.debuff).unwrap_or(false)
    }

    pub fn effect_allowed_for(&self, effect: EffectId, character: Character) -> bool {
        self.effects
            .get(effect)
            .map(|p| p.allowed[character.allow_index()])
            .unwrap_or(true)
    }

    /// an identifier is a real tier-family base only when it resolves back
    /// to itself; the mega-group sentinel never does
    pub fn is_self_referencing(&self, effect: EffectId) -> bool {
        self.effect_compat_id(effect) == Some(effect)
    }

    // ------------------------------------------------------------------
    // stacking resolution
    // ------------------------------------------------------------------

    /// stacking type of an effect: canonical-name rule, source override,
    /// text-id fallback, then the no_stack default. unknown effects in the
    /// class-specific compatibility group promote to unique so only exact
    /// duplicates block.
    pub fn stacking_type(&self, effect: EffectId) -> StackingType {
        let cache = self.stacking.get_or_init(|| self.build_stacking());
        let mut resolved = cache.get(&effect).copied();
        if resolved.is_none() {
            if let Some(text) = self.effect_text_id(effect) {
                if text != effect {
                    resolved = cache.get(&text).copied();
                }
            }
        }
        let resolved = resolved.unwrap_or(StackingType::NoStack);
        if resolved == StackingType::NoStack
            && self.effect_compat_id(effect) == Some(crate::CLASS_GROUP_COMPAT)
        {
            StackingType::Unique
        } else {
            resolved
        }
    }

    fn build_stacking(&self) -> HashMap<EffectId, StackingType> {
        let mut cache = HashMap::new();
        if self.rules.is_empty() {
            return cache;
        }
        // pass 1: direct name-document match
        for (id, name) in self.sorted_effect_names() {
            let Ok(effect) = EffectId::try_from(id) else {
                continue;
            };
            if !self.effects.contains(effect) {
                continue;
            }
            if let Some(stype) = self.resolve_rule(effect, &normalize(name)) {
                cache.insert(effect, stype);
            }
        }
        // pass 2: parameters resolved through their text alias
        for effect in self.effects.ids() {
            if cache.contains_key(&effect) || effect == 0 {
                continue;
            }
            let name = self.effect_name(effect);
            if name == "Empty" || name.starts_with("Effect ") {
                continue;
            }
            if let Some(stype) = self.resolve_rule(effect, &normalize(&name)) {
                cache.insert(effect, stype);
            }
        }
        cache
    }

    /// source overrides win: a name carrying a {regular, deep} pair takes
    /// the deep assignment iff the effect appears in any deep pool
    fn resolve_rule(&self, effect: EffectId, normalized: &str) -> Option<StackingType> {
        if let Some(entry) = self.rules.source_override(normalized) {
            let stype = if self.is_deep_pool_effect(effect) {
                entry.deep
            } else {
                entry.regular
            };
            if stype.is_some() {
                return stype;
            }
        }
        self.rules.lookup(normalized)
    }

    // ------------------------------------------------------------------
    // families
    // ------------------------------------------------------------------

    pub fn effect_family(&self, effect: EffectId) -> Option<&str> {
        self.family_rank(effect).map(|(base, _, _)| base.as_str())
    }

    pub fn family_rank(&self, effect: EffectId) -> Option<&FamilyRank> {
        let families = self.families();
        families.rank_of(effect).or_else(|| {
            let text = self.effect_text_id(effect)?;
            if text != effect {
                families.rank_of(text)
            } else {
                None
            }
        })
    }

    /// scale a tier weight by the effect's rank within its family
    pub fn family_magnitude_weight(&self, effect: EffectId, base_weight: crate::Score) -> crate::Score {
        match self.family_rank(effect) {
            Some(rank) => self.families().magnitude_weight(rank, base_weight),
            None => base_weight,
        }
    }

    pub fn family_effect_ids(&self, base: &str) -> HashSet<EffectId> {
        self.families()
            .get(base)
            .map(Family::effect_ids)
            .unwrap_or_default()
    }

    pub fn family_bases(&self) -> Vec<String> {
        self.families().bases().map(str::to_string).collect()
    }

    pub fn families(&self) -> &Families {
        self.families.get_or_init(|| self.build_families())
    }

    /// families exist where at least two members share a `<base> +<k>`
    /// name and any magnitude is positive. rule names seed the groups,
    /// name-document scraping adds the rest, then ids resolve over two
    /// passes and unresolvable members (and the families they leave
    /// short) are pruned.
    fn build_families(&self) -> Families {
        let mut groups: BTreeMap<String, Vec<(String, u32)>> = BTreeMap::new();
        for name in self.rules.names() {
            let trimmed = name.trim_end();
            let clean = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
            let (base, magnitude) = split_magnitude(clean);
            groups
                .entry(base.to_string())
                .or_default()
                .push((clean.to_string(), magnitude));
        }
        let mut families: BTreeMap<String, Family> = BTreeMap::new();
        for (base, mut members) in groups {
            if members.len() >= 2 && members.iter().any(|(_, m)| *m > 0) {
                members.sort_by_key(|(_, m)| *m);
                families.insert(base, family_of(members));
            }
        }
        // discover additional families from the name document
        let known = families.keys().map(|b| normalize(b)).collect::<HashSet<_>>();
        let mut scraped: BTreeMap<String, Vec<(String, u32)>> = BTreeMap::new();
        for (id, raw) in self.sorted_effect_names() {
            let name = raw.split_whitespace().collect::<Vec<&str>>().join(" ");
            if name.is_empty() {
                continue;
            }
            let Ok(effect) = EffectId::try_from(id) else {
                continue;
            };
            if !self.effects.contains(effect) {
                continue;
            }
            let (base, magnitude) = split_magnitude(&name);
            scraped
                .entry(base.to_string())
                .or_default()
                .push((name.clone(), magnitude));
        }
        for (base, members) in scraped {
            if known.contains(&normalize(&base)) {
                continue;
            }
            let mut seen = HashSet::new();
            let mut unique = members
                .into_iter()
                .filter(|(name, _)| seen.insert(name.clone()))
                .collect::<Vec<(String, u32)>>();
            if unique.len() >= 2 && unique.iter().any(|(_, m)| *m > 0) {
                unique.sort_by_key(|(_, m)| *m);
                families.insert(base, family_of(unique));
            }
        }
        // normalized member name -> (base, member index)
        let mut lookup: HashMap<String, Vec<(String, usize)>> = HashMap::new();
        for (base, family) in &families {
            for (index, member) in family.members.iter().enumerate() {
                lookup
                    .entry(normalize(&member.name))
                    .or_default()
                    .push((base.clone(), index));
            }
        }
        let find = |normalized: &str| {
            lookup
                .get(normalized)
                .or_else(|| lookup.get(strip_parenthetical(normalized)))
        };
        // pass 1: direct name-document match
        let mut matched = HashSet::new();
        for (id, name) in self.sorted_effect_names() {
            let Ok(effect) = EffectId::try_from(id) else {
                continue;
            };
            if !self.effects.contains(effect) {
                continue;
            }
            if let Some(hits) = find(&normalize(name)) {
                matched.insert(effect);
                for (base, index) in hits.clone() {
                    if let Some(family) = families.get_mut(&base) {
                        family.members[index].effect_ids.push(effect);
                    }
                }
            }
        }
        // pass 2: parameters resolved through their text alias
        for effect in self.effects.ids() {
            if matched.contains(&effect) || effect == 0 {
                continue;
            }
            let name = self.effect_name(effect);
            if name == "Empty" || name.starts_with("Effect ") {
                continue;
            }
            if let Some(hits) = find(&normalize(&name)) {
                for (base, index) in hits.clone() {
                    if let Some(family) = families.get_mut(&base) {
                        family.members[index].effect_ids.push(effect);
                    }
                }
            }
        }
        // prune unresolved members, then families left with fewer than two
        for family in families.values_mut() {
            family.members.retain(|m| !m.effect_ids.is_empty());
        }
        families.retain(|_, family| family.members.len() >= 2);
        let mut by_effect: HashMap<EffectId, FamilyRank> = HashMap::new();
        for (base, family) in &families {
            let total = family.members.len() as u32;
            for (index, member) in family.members.iter().enumerate() {
                for effect in &member.effect_ids {
                    by_effect.insert(*effect, (base.clone(), index as u32 + 1, total));
                }
            }
        }
        Families {
            families,
            by_effect,
        }
    }

    fn sorted_effect_names(&self) -> Vec<(i64, &str)> {
        let mut entries = self.effect_names.entries().collect::<Vec<(i64, &str)>>();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    // ------------------------------------------------------------------
    // pool queries
    // ------------------------------------------------------------------

    pub fn pool_effects(&self, pool: PoolId) -> Vec<EffectId> {
        self.pools.pool_effects(pool)
    }

    pub fn pool_rollable_effects(&self, pool: PoolId) -> Vec<EffectId> {
        self.pools.pool_rollable_effects(pool)
    }

    pub fn pool_effects_strict(&self, pool: PoolId) -> Vec<EffectId> {
        self.pools.pool_effects_strict(pool)
    }

    pub fn effect_pools(&self, effect: EffectId) -> Vec<PoolId> {
        self.pools.effect_pools(effect)
    }

    pub fn effect_rollable_pools(&self, effect: EffectId) -> Vec<PoolId> {
        self.pools.effect_rollable_pools(effect)
    }

    /// the effect appears in any of the three deep relic pools
    pub fn is_deep_pool_effect(&self, effect: EffectId) -> bool {
        if is_empty_effect(effect) {
            return false;
        }
        self.pools
            .effect_pools(effect)
            .iter()
            .any(|p| crate::DEEP_POOLS.contains(p))
    }

    /// the effect rolls nowhere outside the deep pools
    pub fn is_deep_only_effect(&self, effect: EffectId) -> bool {
        if is_empty_effect(effect) {
            return false;
        }
        self.pools
            .effect_pools(effect)
            .iter()
            .all(|&p| crate::DEEP_POOLS.contains(&p) || p == effect as PoolId)
    }

    /// the effect rolls only from the curse-bound deep pool, so a curse
    /// slot must accompany it
    pub fn effect_needs_curse(&self, effect: EffectId) -> bool {
        if is_empty_effect(effect) {
            return false;
        }
        let pools = self.pools.effect_rollable_pools(effect);
        let bound = pools.iter().any(|&p| p == crate::CURSE_BOUND_POOL);
        let free = pools
            .iter()
            .any(|&p| crate::DEEP_POOLS.contains(&p) && p != crate::CURSE_BOUND_POOL);
        bound && !free
    }

    // ------------------------------------------------------------------
    // relic queries
    // ------------------------------------------------------------------

    /// color code column, present only for known relic rows
    pub fn relic_color_code(&self, relic: RelicId) -> Option<i64> {
        self.relics.get(relic).map(|r| r.color_code)
    }

    pub fn relic_color(&self, relic: RelicId) -> Option<Color> {
        Color::from_code(self.relic_color_code(relic)?)
    }

    pub fn relic_name(&self, relic: RelicId) -> Option<String> {
        self.relic_names.get(relic).map(str::to_string)
    }

    /// patch-added relics, named only by the dlc name document
    pub fn is_scene_relic(&self, relic: RelicId) -> bool {
        self.scene_relics.contains(&relic)
    }

    /// the six pool ids of a relic: three primary then three curse
    pub fn relic_pools_seq(&self, relic: RelicId) -> Option<[PoolId; 6]> {
        self.relics.get(relic).map(|r| r.pools)
    }

    pub fn relic_slot_counts(&self, relic: RelicId) -> Option<(usize, usize)> {
        self.relics.get(relic).map(|r| r.slot_counts())
    }

    pub fn relic_ids(&self) -> Vec<RelicId> {
        self.relics.ids().collect()
    }

    // ------------------------------------------------------------------
    // vessel and character queries
    // ------------------------------------------------------------------

    pub fn vessel(&self, id: i64) -> Option<Vessel> {
        self.vessels.get(id).and_then(|row| self.compose_vessel(row))
    }

    /// vessels available to a hero: its own plus the shared ones; rows
    /// with no usable name or color layout are skipped
    pub fn vessels_for_hero(&self, hero_type: i64) -> Vec<Vessel> {
        self.vessels
            .rows()
            .filter(|row| !row.disabled)
            .filter(|row| row.hero_type == hero_type || row.hero_type == HERO_TYPE_ALL)
            .filter_map(|row| self.compose_vessel(row))
            .collect()
    }

    fn compose_vessel(&self, row: &super::vessels::VesselRow) -> Option<Vessel> {
        let name = self.goods_names.get(row.goods_id)?.to_string();
        let mut slot_colors = [Color::Red; 6];
        for (i, code) in row.slots.iter().enumerate() {
            slot_colors[i] = Color::from_code(*code)?;
        }
        let character = if row.hero_type == HERO_TYPE_ALL {
            "All".to_string()
        } else {
            self.character_display_name(row.hero_type)?
        };
        Some(Vessel {
            id: row.id,
            name,
            character,
            hero_type: row.hero_type,
            slot_colors,
            unlock_flag: row.unlock_flag,
        })
    }

    /// localized class name for a 1-based hero type
    pub fn character_display_name(&self, hero_type: i64) -> Option<String> {
        let index = usize::try_from(hero_type.checked_sub(1)?).ok()?;
        self.character_names.get(index).cloned()
    }

    // ------------------------------------------------------------------
    // effects catalogue
    // ------------------------------------------------------------------

    /// all nameable effects, deduplicated by display name with the
    /// canonical id (the one matching its own text alias) preferred.
    /// source-overridden names keep a separate entry for their deep-pool
    /// variant.
    pub fn all_effects(&self) -> Vec<EffectInfo> {
        let mut results: Vec<EffectInfo> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for effect in self.effects.ids() {
            if effect == 0 {
                continue;
            }
            let name = self.effect_name(effect).trim().to_string();
            if name == "Empty" || name.starts_with("Effect ") {
                continue;
            }
            let param = self.effects.get(effect).expect("iterated from table");
            let mut source = None;
            let mut key = name.clone();
            if self.rules.is_override_name(&name) && self.is_deep_pool_effect(effect) {
                source = Some("deep".to_string());
                key = format!("{}||deep", name);
            }
            if let Some(&index) = seen.get(&key) {
                if param.text == Some(effect) {
                    // new canonical: demote the old id to the alias list
                    let old = results[index].id;
                    results[index].alias_ids.push(old);
                    results[index].id = effect;
                } else {
                    results[index].alias_ids.push(effect);
                }
                continue;
            }
            seen.insert(key, results.len());
            let allowed = Character::ALL
                .iter()
                .map(|c| (c.to_string(), param.allowed[c.allow_index()]))
                .collect::<BTreeMap<String, bool>>();
            results.push(EffectInfo {
                id: effect,
                name,
                alias_ids: Vec::new(),
                compatibility_id: param.compatibility,
                is_debuff: param.debuff,
                allowed,
                source,
            });
        }
        results
    }
}

fn family_of(members: Vec<(String, u32)>) -> Family {
    Family {
        members: members
            .into_iter()
            .map(|(name, magnitude)| FamilyMember {
                name,
                magnitude,
                effect_ids: Vec::new(),
            })
            .collect(),
    }
}
