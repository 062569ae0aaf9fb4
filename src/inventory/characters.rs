use super::blob::parse_blob;
use super::inventory::RelicInventory;
use crate::data::GameData;
use crate::error::PlannerError;
use crate::error::Result;
use crate::save::Platform;
use crate::save::UserData;
use crate::save::decrypt_sl2;
use crate::save::split_console_dat;

/// undersized blobs carry no inventory and are not character slots
const MIN_BLOB_LEN: usize = 0x1000;

/// one parsed character slot of a save file
#[derive(Debug, Clone, serde::Serialize)]
pub struct CharacterSlot {
    pub slot_index: usize,
    pub name: String,
    pub inventory: RelicInventory,
}

/// enumerate characters from decrypted user-data blobs, in slot order.
/// blobs that fail to parse are reported and skipped; nameless slots are
/// not characters.
pub fn discover_characters(blobs: &[UserData], data: &GameData) -> Vec<CharacterSlot> {
    let mut characters = Vec::new();
    for blob in blobs {
        if blob.bytes.len() < MIN_BLOB_LEN {
            continue;
        }
        let parsed = match parse_blob(&blob.bytes) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("skipping slot {}: {}", blob.index, e);
                continue;
            }
        };
        let Some(name) = parsed.name else { continue };
        characters.push(CharacterSlot {
            slot_index: blob.index,
            name,
            inventory: RelicInventory::from_raw(&parsed.relics, data),
        });
    }
    characters
}

/// the save-parsing entry point: decrypt or split by suffix, then parse
/// every character slot. a well-formed save with no parseable character
/// is an error.
pub fn parse_save(
    bytes: &[u8],
    filename: &str,
    data: &GameData,
) -> Result<(Platform, Vec<CharacterSlot>)> {
    let platform = Platform::from_filename(filename)?;
    let blobs = match platform {
        Platform::Pc => decrypt_sl2(bytes)?,
        Platform::Console => split_console_dat(bytes)?,
    };
    let characters = discover_characters(&blobs, data);
    if characters.is_empty() {
        return Err(PlannerError::NoCharacters);
    }
    Ok((platform, characters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EMPTY_EFFECT;
    use crate::data::fixture;
    use crate::inventory::blob_fixture::BlobBuilder;

    fn character_blob(name: &str) -> Vec<u8> {
        BlobBuilder::default()
            .plain(
                0xC000_0001,
                fixture::RELIC_RED,
                [fixture::HP_RESTORE_BASE, EMPTY_EFFECT, EMPTY_EFFECT],
            )
            .active(&[0xC000_0001])
            .name(name)
            .build()
    }

    #[test]
    fn discovers_named_slots_in_order() {
        let (_dir, data) = fixture::gamedata();
        let blobs = vec![
            UserData {
                index: 0,
                bytes: character_blob("First"),
            },
            UserData {
                index: 1,
                bytes: vec![0u8; 16], // undersized
            },
            UserData {
                index: 2,
                bytes: character_blob("Third"),
            },
        ];
        let characters = discover_characters(&blobs, &data);
        assert_eq!(characters.len(), 2);
        assert_eq!(characters[0].name, "First");
        assert_eq!(characters[0].slot_index, 0);
        assert_eq!(characters[1].name, "Third");
        assert_eq!(characters[1].slot_index, 2);
        assert_eq!(characters[0].inventory.len(), 1);
    }

    #[test]
    fn nameless_blobs_are_not_characters() {
        let (_dir, data) = fixture::gamedata();
        let blob = BlobBuilder::default()
            .plain(0xC000_0001, fixture::RELIC_RED, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .active(&[0xC000_0001])
            .build();
        let characters = discover_characters(&[UserData { index: 0, bytes: blob }], &data);
        assert!(characters.is_empty());
    }

    #[test]
    fn parse_save_errors_without_characters() {
        let (_dir, data) = fixture::gamedata();
        let mut raw = vec![0u8; 0x80];
        raw.extend_from_slice(&[0u8; 0x100000]);
        // console container with one all-zero chunk: parses, but no name
        assert!(matches!(
            parse_save(&raw, "memory.dat", &data),
            Err(PlannerError::NoCharacters)
        ));
    }

    #[test]
    fn encrypted_container_round_trips_to_characters() {
        let (_dir, data) = fixture::gamedata();
        let blob = BlobBuilder::default()
            .plain(
                0xC000_0001,
                fixture::RELIC_RED,
                [fixture::HP_RESTORE_BASE, fixture::FIRE_ATK_UP, EMPTY_EFFECT],
            )
            .plain(
                0xC000_0002,
                fixture::RELIC_BLUE,
                [fixture::IMBUE_MAGIC, EMPTY_EFFECT, EMPTY_EFFECT],
            )
            .active(&[0xC000_0001, 0xC000_0002])
            .name("Nightfarer")
            .build();
        let container = crate::save::bnd4_fixture::container(&[&blob]);
        let (platform, characters) = parse_save(&container, "NR0000.sl2", &data).unwrap();
        assert_eq!(platform, Platform::Pc);
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].name, "Nightfarer");
        let inventory = &characters[0].inventory;
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.relics[0].name, "Crimson Sphere");
        assert_eq!(
            inventory.relics[0].effects,
            [fixture::HP_RESTORE_BASE, fixture::FIRE_ATK_UP, EMPTY_EFFECT]
        );
        assert_eq!(inventory.relics[1].name, "Azure Sphere");
    }

    #[test]
    fn parse_save_rejects_unknown_suffix() {
        let (_dir, data) = fixture::gamedata();
        assert!(matches!(
            parse_save(&[], "save.bin", &data),
            Err(PlannerError::InvalidContainer(_))
        ));
    }
}
