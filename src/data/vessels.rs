use super::color::Color;
use crate::error::Result;
use std::path::Path;

/// raw vessel reference row, before name/character composition
#[derive(Debug, Clone)]
pub struct VesselRow {
    pub id: i64,
    pub goods_id: i64,
    pub hero_type: i64,
    pub slots: [i64; 6],
    pub unlock_flag: i64,
    pub disabled: bool,
}

/// a vessel composed for callers: localized name, eligible character,
/// and the fixed six-slot color layout (first three standard, last three
/// deep)
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Vessel {
    pub id: i64,
    pub name: String,
    pub character: String,
    pub hero_type: i64,
    pub slot_colors: [Color; 6],
    pub unlock_flag: i64,
}

#[derive(Debug, Default)]
pub struct VesselTable {
    rows: Vec<VesselRow>,
}

#[derive(Debug, serde::Deserialize)]
struct Row {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "goodsId")]
    goods_id: i64,
    #[serde(rename = "heroType")]
    hero_type: i64,
    #[serde(rename = "relicSlot1")]
    slot_1: i64,
    #[serde(rename = "relicSlot2")]
    slot_2: i64,
    #[serde(rename = "relicSlot3")]
    slot_3: i64,
    #[serde(rename = "deepRelicSlot1")]
    deep_1: i64,
    #[serde(rename = "deepRelicSlot2")]
    deep_2: i64,
    #[serde(rename = "deepRelicSlot3")]
    deep_3: i64,
    #[serde(rename = "unlockFlag", default)]
    unlock_flag: i64,
    #[serde(rename = "disableParam_NT", default)]
    disabled: i64,
}

impl VesselTable {
    pub fn load(path: &Path) -> Result<VesselTable> {
        let mut table = VesselTable::default();
        let mut reader = csv::Reader::from_path(path)?;
        for row in reader.deserialize::<Row>() {
            let row = row?;
            table.rows.push(VesselRow {
                id: row.id,
                goods_id: row.goods_id,
                hero_type: row.hero_type,
                slots: [
                    row.slot_1, row.slot_2, row.slot_3, row.deep_1, row.deep_2, row.deep_3,
                ],
                unlock_flag: row.unlock_flag,
                disabled: row.disabled != 0,
            });
        }
        Ok(table)
    }

    pub fn get(&self, id: i64) -> Option<&VesselRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn rows(&self) -> impl Iterator<Item = &VesselRow> + '_ {
        self.rows.iter()
    }
}
