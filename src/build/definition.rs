use super::character::Character;
use super::tier::TierKey;
use crate::EffectId;
use crate::Handle;
use crate::Score;
use std::collections::BTreeMap;

/// user-defined build configuration. field names are the stable wire
/// schema consumed by collaborators. the character is carried as a name
/// and validated against the playable classes only when a caller needs
/// the class.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BuildDefinition {
    pub id: String,
    pub name: String,
    pub character: String,
    #[serde(default)]
    pub tiers: BTreeMap<TierKey, Vec<EffectId>>,
    #[serde(default)]
    pub family_tiers: BTreeMap<TierKey, Vec<String>>,
    #[serde(default = "default_include_deep")]
    pub include_deep: bool,
    #[serde(default = "default_curse_max")]
    pub curse_max: u32,
    #[serde(default)]
    pub tier_weights: Option<BTreeMap<TierKey, Score>>,
    #[serde(default)]
    pub pinned_relics: Vec<Handle>,
}

fn default_include_deep() -> bool {
    true
}

fn default_curse_max() -> u32 {
    1
}

impl BuildDefinition {
    pub fn new(id: &str, name: &str, character: Character) -> BuildDefinition {
        BuildDefinition {
            id: id.to_string(),
            name: name.to_string(),
            character: character.to_string(),
            tiers: BTreeMap::new(),
            family_tiers: BTreeMap::new(),
            include_deep: true,
            curse_max: 1,
            tier_weights: None,
            pinned_relics: Vec::new(),
        }
    }

    /// the playable class named by the build
    pub fn class(&self) -> crate::error::Result<Character> {
        self.character.parse()
    }

    /// default tier weight merged with any per-build override
    pub fn effective_weight(&self, tier: TierKey) -> Score {
        self.tier_weights
            .as_ref()
            .and_then(|weights| weights.get(&tier).copied())
            .unwrap_or_else(|| tier.default_weight())
    }

    pub fn effects_in(&self, tier: TierKey) -> &[EffectId] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn families_in(&self, tier: TierKey) -> &[String] {
        self.family_tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tier_of_effect(&self, effect: EffectId) -> Option<TierKey> {
        TierKey::ALL
            .into_iter()
            .find(|tier| self.effects_in(*tier).contains(&effect))
    }

    pub fn tier_of_family(&self, family: &str) -> Option<TierKey> {
        TierKey::ALL
            .into_iter()
            .find(|tier| self.families_in(*tier).iter().any(|f| f == family))
    }

    pub fn slot_count(&self) -> usize {
        if self.include_deep { 6 } else { 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> BuildDefinition {
        let mut build = BuildDefinition::new("b1", "Test", Character::Wylder);
        build.tiers.insert(TierKey::Required, vec![10, 11]);
        build.tiers.insert(TierKey::Avoid, vec![12]);
        build
            .family_tiers
            .insert(TierKey::Preferred, vec!["Vigor".to_string()]);
        build
    }

    #[test]
    fn tier_lookups() {
        let build = build();
        assert_eq!(build.tier_of_effect(10), Some(TierKey::Required));
        assert_eq!(build.tier_of_effect(12), Some(TierKey::Avoid));
        assert_eq!(build.tier_of_effect(99), None);
        assert_eq!(build.tier_of_family("Vigor"), Some(TierKey::Preferred));
        assert_eq!(build.tier_of_family("Mind"), None);
    }

    #[test]
    fn weight_overrides_merge_with_defaults() {
        let mut build = build();
        assert_eq!(build.effective_weight(TierKey::Required), 100);
        build.tier_weights = Some(BTreeMap::from([(TierKey::Required, 200)]));
        assert_eq!(build.effective_weight(TierKey::Required), 200);
        assert_eq!(build.effective_weight(TierKey::Preferred), 50);
    }

    #[test]
    fn serde_round_trip() {
        let build = build();
        let json = serde_json::to_string(&build).unwrap();
        let back: BuildDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back.effects_in(TierKey::Required), &[10, 11]);
        assert_eq!(back.class().unwrap(), Character::Wylder);
        assert!(back.include_deep);
        assert_eq!(back.curse_max, 1);
    }

    #[test]
    fn unknown_class_surfaces_at_use() {
        let json = r#"{"id":"x","name":"X","character":"Tarnished"}"#;
        let build: BuildDefinition = serde_json::from_str(json).unwrap();
        assert!(matches!(
            build.class(),
            Err(crate::error::PlannerError::UnknownCharacterClass(_))
        ));
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let json = r#"{"id":"x","name":"X","character":"Duchess"}"#;
        let build: BuildDefinition = serde_json::from_str(json).unwrap();
        assert!(build.include_deep);
        assert_eq!(build.curse_max, 1);
        assert!(build.pinned_relics.is_empty());
        assert_eq!(build.slot_count(), 6);
    }
}
