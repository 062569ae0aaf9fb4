use crate::EffectId;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// one row of the effect parameter table
#[derive(Debug, Clone)]
pub struct EffectParam {
    pub compatibility: Option<EffectId>,
    pub text: Option<EffectId>,
    pub exclusivity: Option<EffectId>,
    pub debuff: bool,
    pub allowed: [bool; 10],
}

/// per-effect parameters: compatibility group, canonical text alias,
/// exclusivity group (the override column), debuff flag, and one
/// allow-flag per playable class.
#[derive(Debug, Default)]
pub struct EffectTable {
    map: HashMap<EffectId, EffectParam>,
    order: Vec<EffectId>,
}

#[derive(Debug, serde::Deserialize)]
struct Row {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "compatibilityId", default = "minus_one")]
    compatibility: i64,
    #[serde(rename = "attachTextId", default = "minus_one")]
    text: i64,
    #[serde(rename = "overrideEffectId", default = "minus_one")]
    exclusivity: i64,
    #[serde(rename = "isDebuff", default)]
    debuff: i64,
    #[serde(rename = "allowWylder", default = "one")]
    allow_wylder: i64,
    #[serde(rename = "allowGuardian", default = "one")]
    allow_guardian: i64,
    #[serde(rename = "allowIroneye", default = "one")]
    allow_ironeye: i64,
    #[serde(rename = "allowDuchess", default = "one")]
    allow_duchess: i64,
    #[serde(rename = "allowRaider", default = "one")]
    allow_raider: i64,
    #[serde(rename = "allowRevenant", default = "one")]
    allow_revenant: i64,
    #[serde(rename = "allowRecluse", default = "one")]
    allow_recluse: i64,
    #[serde(rename = "allowExecutor", default = "one")]
    allow_executor: i64,
    #[serde(rename = "allowScholar", default = "one")]
    allow_scholar: i64,
    #[serde(rename = "allowUndertaker", default = "one")]
    allow_undertaker: i64,
}

fn minus_one() -> i64 {
    -1
}
fn one() -> i64 {
    1
}

fn id_of(raw: i64) -> Option<EffectId> {
    u32::try_from(raw).ok()
}

impl EffectTable {
    pub fn load(path: &Path) -> Result<EffectTable> {
        let mut table = EffectTable::default();
        let mut reader = csv::Reader::from_path(path)?;
        for row in reader.deserialize::<Row>() {
            let row = row?;
            let Some(id) = id_of(row.id) else { continue };
            table.order.push(id);
            table.map.insert(
                id,
                EffectParam {
                    compatibility: id_of(row.compatibility),
                    text: id_of(row.text),
                    exclusivity: id_of(row.exclusivity),
                    debuff: row.debuff != 0,
                    allowed: [
                        row.allow_wylder != 0,
                        row.allow_guardian != 0,
                        row.allow_ironeye != 0,
                        row.allow_duchess != 0,
                        row.allow_raider != 0,
                        row.allow_revenant != 0,
                        row.allow_recluse != 0,
                        row.allow_executor != 0,
                        row.allow_scholar != 0,
                        row.allow_undertaker != 0,
                    ],
                },
            );
        }
        Ok(table)
    }

    pub fn get(&self, id: EffectId) -> Option<&EffectParam> {
        self.map.get(&id)
    }

    pub fn contains(&self, id: EffectId) -> bool {
        self.map.contains_key(&id)
    }

    /// ids in reference-table order
    pub fn ids(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
