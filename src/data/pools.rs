use crate::DEEP_POOLS;
use crate::EffectId;
use crate::PoolId;
use crate::error::Result;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;

/// one (pool, effect) membership row with its two weight columns
#[derive(Debug, Clone)]
pub struct PoolRow {
    pub pool: PoolId,
    pub effect: EffectId,
    pub base_weight: i64,
    pub dlc_weight: i64,
}

impl PoolRow {
    /// an effect is rollable when its effective weight is non-zero:
    /// the dlc column wins unless it defers to base with -1
    pub fn rollable(&self) -> bool {
        self.dlc_weight > 0 || (self.dlc_weight == -1 && self.base_weight != 0)
    }
}

/// pool membership table with per-pool and per-effect indices
#[derive(Debug, Default)]
pub struct PoolTable {
    rows: Vec<PoolRow>,
    by_pool: HashMap<PoolId, Vec<usize>>,
    by_effect: HashMap<EffectId, Vec<usize>>,
}

#[derive(Debug, serde::Deserialize)]
struct Row {
    #[serde(rename = "ID")]
    pool: i64,
    #[serde(rename = "attachEffectId")]
    effect: i64,
    #[serde(rename = "chanceWeight", default)]
    base_weight: i64,
    #[serde(rename = "chanceWeight_dlc", default = "minus_one")]
    dlc_weight: i64,
}

fn minus_one() -> i64 {
    -1
}

impl PoolTable {
    pub fn load(path: &Path) -> Result<PoolTable> {
        let mut table = PoolTable::default();
        let mut reader = csv::Reader::from_path(path)?;
        for row in reader.deserialize::<Row>() {
            let row = row?;
            let Ok(effect) = u32::try_from(row.effect) else {
                continue;
            };
            let index = table.rows.len();
            table.by_pool.entry(row.pool).or_default().push(index);
            table.by_effect.entry(effect).or_default().push(index);
            table.rows.push(PoolRow {
                pool: row.pool,
                effect,
                base_weight: row.base_weight,
                dlc_weight: row.dlc_weight,
            });
        }
        Ok(table)
    }

    /// every effect listed in a pool, rollable or not
    pub fn pool_effects(&self, pool: PoolId) -> Vec<EffectId> {
        if pool == -1 {
            return Vec::new();
        }
        self.indices(pool).map(|r| r.effect).collect()
    }

    /// rollable effects of one specific pool, no deep-pool merging
    pub fn pool_effects_strict(&self, pool: PoolId) -> Vec<EffectId> {
        if pool == -1 {
            return Vec::new();
        }
        self.indices(pool).filter(|r| r.rollable()).map(|r| r.effect).collect()
    }

    /// rollable effects of a pool. the three deep pools are interchangeable
    /// at roll time, so querying any of them merges all three.
    pub fn pool_rollable_effects(&self, pool: PoolId) -> Vec<EffectId> {
        if pool == -1 {
            return Vec::new();
        }
        if DEEP_POOLS.contains(&pool) {
            let mut seen = HashSet::new();
            DEEP_POOLS
                .iter()
                .flat_map(|p| self.indices(*p))
                .filter(|r| r.rollable())
                .map(|r| r.effect)
                .filter(|e| seen.insert(*e))
                .collect()
        } else {
            self.pool_effects_strict(pool)
        }
    }

    /// every pool an effect is listed in
    pub fn effect_pools(&self, effect: EffectId) -> Vec<PoolId> {
        self.by_effect
            .get(&effect)
            .map(|indices| indices.iter().map(|i| self.rows[*i].pool).collect())
            .unwrap_or_default()
    }

    /// pools the effect actually rolls from; the effect's self-referencing
    /// pool id is bookkeeping, not a roll source, and is ignored
    pub fn effect_rollable_pools(&self, effect: EffectId) -> Vec<PoolId> {
        self.by_effect
            .get(&effect)
            .map(|indices| {
                indices
                    .iter()
                    .map(|i| &self.rows[*i])
                    .filter(|r| r.rollable())
                    .filter(|r| r.pool != r.effect as PoolId)
                    .map(|r| r.pool)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn indices(&self, pool: PoolId) -> impl Iterator<Item = &PoolRow> + '_ {
        self.by_pool
            .get(&pool)
            .into_iter()
            .flatten()
            .map(|i| &self.rows[*i])
    }
}
