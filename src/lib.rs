pub mod build;
pub mod check;
pub mod data;
pub mod error;
pub mod inventory;
pub mod optimize;
pub mod save;
pub mod score;

/// dimensional analysis types
pub type EffectId = u32;
pub type Handle = u32;
pub type RelicId = i64;
pub type PoolId = i64;
pub type Score = i32;

/// sentinel for an empty effect slot in save data
pub const EMPTY_EFFECT: EffectId = 0xFFFF_FFFF;

/// an effect slot counts as filled only when it is neither sentinel
pub fn is_empty_effect(effect: EffectId) -> bool {
    effect == EMPTY_EFFECT || effect == 0
}

// user-data blob layout parameters
const ITEM_SLOT_COUNT: usize = 5120;
const ITEM_ARRAY_OFFSET: usize = 0x14;
const NAME_OFFSET_FROM_ITEMS: usize = 0x94;
const NAME_MAX_CHARS: usize = 16;
const ENTRY_TABLE_OFFSET_FROM_NAME: usize = 0x5B8;
const ENTRY_STRIDE: usize = 12;
const ENTRY_COUNT_MIN: u32 = 1;
const ENTRY_COUNT_MAX: u32 = 3065;
const ACTIVE_COUNT_TOLERANCE: usize = 20;

// stacking resolution sentinels
const MEGA_GROUP_COMPAT: EffectId = 100;
const CLASS_GROUP_COMPAT: EffectId = 900;
const DEEP_POOLS: [PoolId; 3] = [2_000_000, 2_100_000, 2_200_000];
const CURSE_BOUND_POOL: PoolId = 2_000_000;

// scoring parameters
const CURSE_EXCESS_PENALTY: Score = -200;
const EFFECT_COUNT_BONUS: [Score; 4] = [0, 0, 2, 5];

// solver parameters
const BACKTRACK_MAX_CANDIDATES: usize = 200;
const BACKTRACK_MAX_FREE_SLOTS: usize = 6;
const BACKTRACK_DEADLINE_MS: u64 = 2_000;
