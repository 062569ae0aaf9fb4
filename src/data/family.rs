use crate::EffectId;
use crate::Score;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;

/// one magnitude step of a family, e.g. "Vigor +2"
#[derive(Debug, Clone)]
pub struct FamilyMember {
    pub name: String,
    pub magnitude: u32,
    pub effect_ids: Vec<EffectId>,
}

/// a magnitude-ordered group of effects sharing a base name
#[derive(Debug, Clone, Default)]
pub struct Family {
    pub members: Vec<FamilyMember>,
}

impl Family {
    pub fn effect_ids(&self) -> HashSet<EffectId> {
        self.members
            .iter()
            .flat_map(|m| m.effect_ids.iter().copied())
            .collect()
    }
}

/// rank of an effect within its family: `(base, rank, cardinality)` with
/// rank 1-based in ascending magnitude
pub type FamilyRank = (String, u32, u32);

#[derive(Debug, Default)]
pub struct Families {
    pub(super) families: BTreeMap<String, Family>,
    pub(super) by_effect: HashMap<EffectId, FamilyRank>,
}

impl Families {
    pub fn get(&self, base: &str) -> Option<&Family> {
        self.families.get(base)
    }

    pub fn rank_of(&self, effect: EffectId) -> Option<&FamilyRank> {
        self.by_effect.get(&effect)
    }

    pub fn bases(&self) -> impl Iterator<Item = &str> + '_ {
        self.families.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Family)> + '_ {
        self.families.iter().map(|(base, fam)| (base.as_str(), fam))
    }

    /// magnitude-scaled weight: a +2 of a three-step family earns two
    /// thirds of the tier weight, the top step earns it all
    pub fn magnitude_weight(&self, rank: &FamilyRank, base_weight: Score) -> Score {
        let (_, rank, total) = rank;
        if *total == 0 {
            base_weight
        } else {
            (base_weight as i64 * *rank as i64 / *total as i64) as Score
        }
    }
}

/// split `<base> +<k>[%]` into its base name and magnitude; names without
/// the suffix are magnitude zero
pub fn split_magnitude(name: &str) -> (&str, u32) {
    let trimmed = name.trim_end();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if let Some(at) = trimmed.rfind(" +") {
        let digits = &trimmed[at + 2..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(magnitude) = digits.parse::<u32>() {
                return (trimmed[..at].trim_end(), magnitude);
            }
        }
    }
    (trimmed, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_magnitude_suffix() {
        assert_eq!(split_magnitude("Vigor +2"), ("Vigor", 2));
        assert_eq!(split_magnitude("Damage Negation +5%"), ("Damage Negation", 5));
        assert_eq!(split_magnitude("HP Restore"), ("HP Restore", 0));
        assert_eq!(split_magnitude("Plus +"), ("Plus +", 0));
    }

    #[test]
    fn magnitude_weight_scales_by_rank() {
        let families = Families::default();
        assert_eq!(
            families.magnitude_weight(&("Vigor".to_string(), 1, 3), 100),
            33
        );
        assert_eq!(
            families.magnitude_weight(&("Vigor".to_string(), 3, 3), 100),
            100
        );
    }
}
