use crate::RelicId;

/// relic id ranges by acquisition category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelicGroup {
    Store102,
    Store103,
    Unique1,
    Unique2,
    Illegal,
    Reward(u8),
    Deep102,
    Deep103,
}

impl RelicGroup {
    pub fn range(&self) -> (RelicId, RelicId) {
        match self {
            RelicGroup::Store102 => (100, 199),
            RelicGroup::Store103 => (200, 299),
            RelicGroup::Unique1 => (1_000, 2_100),
            RelicGroup::Unique2 => (10_000, 19_999),
            RelicGroup::Illegal => (20_000, 30_035),
            RelicGroup::Reward(n) => {
                let lo = 1_000_000 + 1_000 * *n as RelicId;
                (lo, lo + 999)
            }
            RelicGroup::Deep102 => (2_000_000, 2_009_999),
            RelicGroup::Deep103 => (2_010_000, 2_019_999),
        }
    }

    pub fn contains(&self, real_id: RelicId) -> bool {
        let (lo, hi) = self.range();
        (lo..=hi).contains(&real_id)
    }

    pub fn of(real_id: RelicId) -> Option<RelicGroup> {
        Self::all().into_iter().find(|g| g.contains(real_id))
    }

    pub fn all() -> Vec<RelicGroup> {
        let mut groups = vec![
            RelicGroup::Store102,
            RelicGroup::Store103,
            RelicGroup::Unique1,
            RelicGroup::Unique2,
            RelicGroup::Illegal,
        ];
        groups.extend((0..10).map(RelicGroup::Reward));
        groups.push(RelicGroup::Deep102);
        groups.push(RelicGroup::Deep103);
        groups
    }
}

/// unique-category relics appear at most once per inventory
pub fn is_unique_relic(real_id: RelicId) -> bool {
    RelicGroup::Unique1.contains(real_id) || RelicGroup::Unique2.contains(real_id)
}

/// deep relics occupy only deep vessel slots
pub fn is_deep_relic(real_id: RelicId) -> bool {
    RelicGroup::Deep102.contains(real_id) || RelicGroup::Deep103.contains(real_id)
}
