use crate::PoolId;
use crate::RelicId;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// per-relic reference row: color code plus the six pool identifiers
/// (three primary, three curse); pool id -1 means the slot is absent
#[derive(Debug, Clone)]
pub struct RelicRow {
    pub color_code: i64,
    pub pools: [PoolId; 6],
}

impl RelicRow {
    /// (primary slots, curse slots) actually present on the relic
    pub fn slot_counts(&self) -> (usize, usize) {
        let primary = self.pools[..3].iter().filter(|&&p| p != -1).count();
        let curse = self.pools[3..].iter().filter(|&&p| p != -1).count();
        (primary, curse)
    }
}

#[derive(Debug, Default)]
pub struct RelicTable {
    map: HashMap<RelicId, RelicRow>,
    order: Vec<RelicId>,
}

#[derive(Debug, serde::Deserialize)]
struct Row {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "relicColor", default = "minus_one")]
    color: i64,
    #[serde(rename = "attachEffectTableId_1", default = "minus_one")]
    pool_1: i64,
    #[serde(rename = "attachEffectTableId_2", default = "minus_one")]
    pool_2: i64,
    #[serde(rename = "attachEffectTableId_3", default = "minus_one")]
    pool_3: i64,
    #[serde(rename = "attachEffectTableId_curse1", default = "minus_one")]
    curse_1: i64,
    #[serde(rename = "attachEffectTableId_curse2", default = "minus_one")]
    curse_2: i64,
    #[serde(rename = "attachEffectTableId_curse3", default = "minus_one")]
    curse_3: i64,
}

fn minus_one() -> i64 {
    -1
}

impl RelicTable {
    pub fn load(path: &Path) -> Result<RelicTable> {
        let mut table = RelicTable::default();
        let mut reader = csv::Reader::from_path(path)?;
        for row in reader.deserialize::<Row>() {
            let row = row?;
            table.order.push(row.id);
            table.map.insert(
                row.id,
                RelicRow {
                    color_code: row.color,
                    pools: [
                        row.pool_1, row.pool_2, row.pool_3, row.curse_1, row.curse_2, row.curse_3,
                    ],
                },
            );
        }
        Ok(table)
    }

    pub fn get(&self, id: RelicId) -> Option<&RelicRow> {
        self.map.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = RelicId> + '_ {
        self.order.iter().copied()
    }
}
