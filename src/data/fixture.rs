//! shared in-test resource tree. a curated slice of reference data small
//! enough to read, rich enough to exercise every resolution rule: the
//! tier family with a no-stack base and unique variants, two exclusivity
//! groups, mega-group neighbors, a text-id alias, class-sentinel unknowns,
//! a source-overridden name, and a curse-bound deep effect.

use super::resolver::GameData;
use crate::EffectId;
use crate::RelicId;
use std::path::Path;
use tempfile::TempDir;

pub const HP_RESTORE_BASE: EffectId = 7005600; // no_stack, compat self-referencing
pub const HP_RESTORE_PLUS1: EffectId = 6005600; // unique, compat -> base
pub const HP_RESTORE_PLUS2: EffectId = 6005601; // unique, compat -> base
pub const IMBUE_MAGIC: EffectId = 7120000; // no_stack, compat 200, excl 100
pub const IMBUE_FIRE: EffectId = 7120100; // no_stack, compat 200, excl 100
pub const SKILL_PHALANX: EffectId = 7122700; // no_stack, compat 300, excl 200
pub const SKILL_GRAVITAS: EffectId = 7122800; // no_stack, compat 300, excl 200
pub const TAKING_ATTACKS: EffectId = 7032200; // no_stack, mega-group compat 100
pub const GUARD_COUNTER: EffectId = 7150000; // no_stack, mega-group compat 100
pub const FIRE_ATK_UP: EffectId = 7001600; // stack
pub const PHYSICAL_ATK_UP: EffectId = 7001400; // stack
pub const POISE: EffectId = 8000000; // unique, canonical text id
pub const POISE_ALIAS: EffectId = 8000001; // alias resolving to POISE
pub const CLASS_BOUND_A: EffectId = 9100000; // unknown, compat 900
pub const CLASS_BOUND_B: EffectId = 9100001; // unknown, compat 900
pub const CURSE_STAMINA: EffectId = 6100000; // debuff, default stacking
pub const CURSE_ROT: EffectId = 6100001; // debuff, default stacking
pub const DEEPWATER: EffectId = 6300000; // rolls only from the curse-bound pool
pub const SUNKEN_DEEP: EffectId = 6400000; // source override, lives in a deep pool
pub const SUNKEN_REGULAR: EffectId = 6400001; // same display name, regular pools
pub const VIGOR_PLUS1: EffectId = 6200001; // family discovered from names
pub const VIGOR_PLUS2: EffectId = 6200002;

pub const RELIC_RED: RelicId = 100;
pub const RELIC_BLUE: RelicId = 200;
pub const RELIC_YELLOW: RelicId = 300;
pub const RELIC_GREEN: RelicId = 400;
pub const RELIC_WHITE: RelicId = 500;
pub const RELIC_COLORLESS: RelicId = 600;
pub const RELIC_UNIQUE: RelicId = 1000;
pub const RELIC_DEEP_RED: RelicId = 2000001;
pub const RELIC_DEEP_BLUE: RelicId = 2010001;

pub const VESSEL_WYLDER: i64 = 1001;
pub const VESSEL_SHARED: i64 = 1002;
pub const VESSEL_GUARDIAN: i64 = 1003;
pub const VESSEL_DISABLED: i64 = 1004;
pub const VESSEL_ALL_RED: i64 = 1005;

pub const POOL_STANDARD: i64 = 100100;
pub const POOL_CURSE: i64 = 100200;

const EFFECT_PARAMS: &str = "\
ID,compatibilityId,attachTextId,overrideEffectId,isDebuff,allowWylder,allowGuardian,allowIroneye,allowDuchess,allowRaider,allowRevenant,allowRecluse,allowExecutor,allowScholar,allowUndertaker
7005600,7005600,7005600,-1,0,1,1,1,1,1,1,1,1,1,1
6005600,7005600,6005600,-1,0,1,1,1,1,1,1,1,1,1,1
6005601,7005600,6005601,-1,0,1,1,1,1,1,1,1,1,1,1
7120000,200,7120000,100,0,1,1,1,1,1,1,1,1,1,1
7120100,200,7120100,100,0,1,1,1,1,1,1,1,1,1,1
7122700,300,7122700,200,0,1,1,1,1,1,1,1,1,1,1
7122800,300,7122800,200,0,1,1,1,1,1,1,1,1,1,1
7032200,100,7032200,-1,0,1,1,1,1,1,1,1,1,1,1
7150000,100,7150000,-1,0,1,1,1,0,1,1,1,1,1,1
7001600,100,7001600,-1,0,1,1,1,1,1,1,1,1,1,1
7001400,100,7001400,-1,0,1,1,1,1,1,1,1,1,1,1
8000000,-1,8000000,-1,0,1,1,1,1,1,1,1,1,1,1
8000001,-1,8000000,-1,0,1,1,1,1,1,1,1,1,1,1
9100000,900,-1,-1,0,1,1,1,1,1,1,1,1,1,1
9100001,900,-1,-1,0,1,1,1,1,1,1,1,1,1,1
6100000,-1,6100000,-1,1,1,1,1,1,1,1,1,1,1,1
6100001,-1,6100001,-1,1,1,1,1,1,1,1,1,1,1,1
6300000,-1,6300000,-1,0,1,1,1,1,1,1,1,1,1,1
6400000,-1,6400000,-1,0,1,1,1,1,1,1,1,1,1,1
6400001,-1,6400000,-1,0,1,1,1,1,1,1,1,1,1,1
6200001,-1,6200001,-1,0,1,1,1,1,1,1,1,1,1,1
6200002,-1,6200002,-1,0,1,1,1,1,1,1,1,1,1,1
";

const EFFECT_POOLS: &str = "\
ID,attachEffectId,chanceWeight,chanceWeight_dlc
100100,7005600,10,-1
100100,6005600,10,-1
100100,6005601,10,-1
100100,7120000,10,-1
100100,7120100,10,-1
100100,7122700,10,-1
100100,7122800,10,-1
100100,7032200,10,-1
100100,7150000,10,-1
100100,7001600,10,-1
100100,7001400,10,-1
100100,8000000,10,-1
100100,8000001,10,-1
100100,9100000,10,-1
100100,9100001,10,-1
100100,6200001,10,-1
100100,6200002,10,-1
100100,6400001,10,-1
100100,7777001,10,0
100100,7777002,0,-1
100100,7777003,0,5
100200,6100000,10,-1
100200,6100001,10,-1
2000000,6300000,10,-1
2000000,6100000,10,-1
2100000,6400000,10,-1
2100000,7005600,10,-1
2100000,6005600,10,-1
2200000,7001600,10,-1
";

const RELIC_ROWS: &str = "\
ID,relicColor,attachEffectTableId_1,attachEffectTableId_2,attachEffectTableId_3,attachEffectTableId_curse1,attachEffectTableId_curse2,attachEffectTableId_curse3
100,0,100100,100100,100100,100200,100200,100200
200,1,100100,100100,-1,100200,-1,-1
300,2,100100,100100,100100,100200,100200,100200
400,3,100100,100100,100100,100200,100200,100200
500,4,100100,-1,-1,-1,-1,-1
600,-1,100100,-1,-1,-1,-1,-1
1000,0,100100,100100,100100,100200,100200,100200
2000001,0,2100000,2100000,2000000,2000000,-1,-1
2010001,1,2100000,2200000,-1,2000000,-1,-1
";

const VESSEL_ROWS: &str = "\
ID,goodsId,heroType,relicSlot1,relicSlot2,relicSlot3,deepRelicSlot1,deepRelicSlot2,deepRelicSlot3,unlockFlag,disableParam_NT
1001,9600,1,0,1,2,0,1,4,60000,0
1002,9601,11,4,4,4,4,4,4,0,0
1003,9602,2,1,1,1,1,1,1,0,0
1004,9603,1,0,0,0,0,0,0,0,1
1005,9604,1,0,0,0,0,0,0,0,0
";

const STACKING_RULES: &str = r#"{
  "HP Restore": "no_stack",
  "HP Restore +1": "unique",
  "HP Restore +2": "unique",
  "Starting Armament Deals Magic Damage": "no_stack",
  "Starting Armament Deals Fire Damage": "no_stack",
  "Skill Becomes Phalanx": "no_stack",
  "Skill Becomes Gravitas": "no_stack",
  "Taking Attacks Improves Attack Power": "no_stack",
  "Guard Counter Boost Based On HP": "no_stack",
  "Fire Attack Power Up": "stack",
  "Physical Attack Up": "stack",
  "Improved Poise": "unique",
  "Deepwater Strike": "stack",
  "_source_overrides": {
    "Sunken Blessing": {"regular": "no_stack", "deep": "unique"}
  }
}"#;

fn fmg(entries: &[(i64, &str)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<fmg>\n  <entries>\n");
    for (id, name) in entries {
        xml.push_str(&format!("    <text id=\"{}\">{}</text>\n", id, name));
    }
    xml.push_str("  </entries>\n</fmg>\n");
    xml
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// write the fixture tree into a tempdir and load it
pub fn gamedata() -> (TempDir, GameData) {
    let dir = TempDir::new().unwrap();
    let resources = dir.path();
    write(
        &resources.join("param/AttachEffectParam.csv"),
        EFFECT_PARAMS,
    );
    write(
        &resources.join("param/AttachEffectTableParam.csv"),
        EFFECT_POOLS,
    );
    write(&resources.join("param/EquipParamAntique.csv"), RELIC_ROWS);
    write(&resources.join("param/AntiqueStandParam.csv"), VESSEL_ROWS);
    let text = resources.join("text/en_US");
    write(
        &text.join("AttachEffectName.fmg.xml"),
        &fmg(&[
            (7005600, "HP Restore"),
            (6005600, "HP Restore +1"),
            (6005601, "HP Restore +2"),
            (7120000, "Starting Armament Deals Magic Damage"),
            (7120100, "Starting Armament Deals Fire Damage"),
            (7122700, "Skill Becomes Phalanx"),
            (7122800, "Skill Becomes Gravitas"),
            (7032200, "Taking Attacks Improves Attack Power"),
            (7150000, "Guard Counter Boost Based On HP"),
            (7001600, "Fire Attack Power Up"),
            (7001400, "Physical Attack Up"),
            (8000000, "Improved Poise"),
            (6100000, "Stamina Drain"),
            (6100001, "Creeping Rot"),
            (6300000, "Deepwater Strike"),
            (6400000, "Sunken Blessing"),
            (6200001, "Vigor +1"),
            (6200002, "Vigor +2"),
        ]),
    );
    write(
        &text.join("AntiqueName.fmg.xml"),
        &fmg(&[
            (100, "Crimson Sphere"),
            (200, "Azure Sphere"),
            (300, "Gilded Sphere"),
            (400, "Verdant Sphere"),
            (500, "Pale Sphere"),
            (600, "Flatstone"),
            (1000, "Besmirched Frame"),
        ]),
    );
    write(
        &text.join("AntiqueName_dlc01.fmg.xml"),
        &fmg(&[(2000001, "Night Shard"), (2010001, "Tide Shard")]),
    );
    write(
        &text.join("NpcName.fmg.xml"),
        &fmg(&[
            (100000, "Wylder"),
            (100030, "Guardian"),
            (100050, "Ironeye"),
            (100010, "Duchess"),
            (100040, "Raider"),
            (100090, "Revenant"),
            (100070, "Recluse"),
            (100060, "Executor"),
            (110000, "Scholar"),
            (110010, "Undertaker"),
        ]),
    );
    write(
        &text.join("GoodsName.fmg.xml"),
        &fmg(&[
            (9600, "Wylder's Urn"),
            (9601, "Shared Urn"),
            (9602, "Guardian's Urn"),
            (9603, "Sealed Urn"),
            (9604, "Ember Urn"),
        ]),
    );
    write(&resources.join("json/stacking_rules.json"), STACKING_RULES);
    let data = GameData::load(resources, "en_US").unwrap();
    (dir, data)
}
