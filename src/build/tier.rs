use crate::Score;

/// the fixed tier keys a build assigns effects to, in display order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TierKey {
    Required,
    Preferred,
    NiceToHave,
    Bonus,
    Avoid,
    Blacklist,
}

/// immutable definition of a single build tier
#[derive(Debug, Clone, Copy)]
pub struct TierConfig {
    pub key: TierKey,
    pub display_name: &'static str,
    pub weight: Score,
    pub scored: bool,
    pub magnitude_weighted: bool,
    pub is_must_have: bool,
    pub is_exclusion: bool,
}

pub const TIERS: [TierConfig; 6] = [
    TierConfig {
        key: TierKey::Required,
        display_name: "Essential",
        weight: 100,
        scored: true,
        magnitude_weighted: true,
        is_must_have: true,
        is_exclusion: false,
    },
    TierConfig {
        key: TierKey::Preferred,
        display_name: "Preferred",
        weight: 50,
        scored: true,
        magnitude_weighted: true,
        is_must_have: false,
        is_exclusion: false,
    },
    TierConfig {
        key: TierKey::NiceToHave,
        display_name: "Nice-to-Have",
        weight: 25,
        scored: true,
        magnitude_weighted: true,
        is_must_have: false,
        is_exclusion: false,
    },
    TierConfig {
        key: TierKey::Bonus,
        display_name: "Bonus",
        weight: 10,
        scored: true,
        magnitude_weighted: true,
        is_must_have: false,
        is_exclusion: false,
    },
    TierConfig {
        key: TierKey::Avoid,
        display_name: "Avoid",
        weight: -20,
        scored: true,
        magnitude_weighted: false,
        is_must_have: false,
        is_exclusion: false,
    },
    TierConfig {
        key: TierKey::Blacklist,
        display_name: "Excluded",
        weight: 0,
        scored: false,
        magnitude_weighted: false,
        is_must_have: false,
        is_exclusion: true,
    },
];

impl TierKey {
    pub const ALL: [TierKey; 6] = [
        TierKey::Required,
        TierKey::Preferred,
        TierKey::NiceToHave,
        TierKey::Bonus,
        TierKey::Avoid,
        TierKey::Blacklist,
    ];

    pub fn config(&self) -> &'static TierConfig {
        TIERS.iter().find(|t| t.key == *self).expect("tier in schema")
    }

    pub fn default_weight(&self) -> Score {
        self.config().weight
    }

    pub fn scored(&self) -> bool {
        self.config().scored
    }

    pub fn magnitude_weighted(&self) -> bool {
        self.config().magnitude_weighted
    }
}

impl std::fmt::Display for TierKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TierKey::Required => write!(f, "required"),
            TierKey::Preferred => write!(f, "preferred"),
            TierKey::NiceToHave => write!(f, "nice_to_have"),
            TierKey::Bonus => write!(f, "bonus"),
            TierKey::Avoid => write!(f, "avoid"),
            TierKey::Blacklist => write!(f, "blacklist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_consistent() {
        assert_eq!(TIERS.len(), TierKey::ALL.len());
        for key in TierKey::ALL {
            assert_eq!(key.config().key, key);
        }
    }

    #[test]
    fn blacklist_is_the_only_exclusion() {
        let exclusions = TIERS.iter().filter(|t| t.is_exclusion).collect::<Vec<_>>();
        assert_eq!(exclusions.len(), 1);
        assert_eq!(exclusions[0].key, TierKey::Blacklist);
        assert!(!exclusions[0].scored);
    }

    #[test]
    fn required_is_the_only_must_have() {
        let musts = TIERS.iter().filter(|t| t.is_must_have).collect::<Vec<_>>();
        assert_eq!(musts.len(), 1);
        assert_eq!(musts[0].key, TierKey::Required);
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        assert_eq!(
            serde_json::to_string(&TierKey::NiceToHave).unwrap(),
            "\"nice_to_have\""
        );
    }
}
