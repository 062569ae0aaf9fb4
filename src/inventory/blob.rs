use super::item::Item;
use super::item::ItemKind;
use super::raw::RawRelic;
use crate::Handle;
use crate::error::PlannerError;
use crate::error::Result;
use byteorder::ByteOrder;
use byteorder::LE;
use std::collections::HashSet;

/// the relic inventory extracted from one user-data blob.
///
/// the blob holds two inventory layers. layer 1 is the 5120-slot item
/// array starting at 0x14, which still contains stale records from prior
/// runs. layer 2 is the count-prefixed entry table past the character
/// name, listing only items currently owned. a relic is ground truth
/// exactly when its handle appears in layer 2; everything else is a
/// phantom and is dropped here.
#[derive(Debug, Clone)]
pub struct ParsedBlob {
    pub relics: Vec<RawRelic>,
    pub items_end: usize,
    pub name: Option<String>,
}

pub fn parse_blob(data: &[u8]) -> Result<ParsedBlob> {
    let (items, items_end) = parse_items(data, crate::ITEM_ARRAY_OFFSET, crate::ITEM_SLOT_COUNT);
    let active = active_handles(data, items_end)?;
    // an active handle names one owned relic; stale duplicates of the same
    // handle are leftovers of a reused slot and only the first record counts
    let mut seen = HashSet::new();
    let relics = items
        .iter()
        .filter(|item| item.kind() == ItemKind::Relic)
        .filter(|item| active.contains(&item.handle))
        .filter(|item| seen.insert(item.handle))
        .map(RawRelic::from)
        .collect::<Vec<RawRelic>>();
    let name = character_name(data, items_end);
    Ok(ParsedBlob {
        relics,
        items_end,
        name,
    })
}

/// walk the layer-1 item array. returns the records read and the offset
/// one past the last consumed byte; a blob ending mid-record yields the
/// partial list assembled so far.
pub fn parse_items(data: &[u8], start: usize, slots: usize) -> (Vec<Item>, usize) {
    let mut items = Vec::new();
    let mut offset = start;
    for _ in 0..slots {
        match Item::parse(data, offset) {
            Some(item) => {
                offset += item.size;
                items.push(item);
            }
            None => break,
        }
    }
    (items, offset)
}

/// layer-2 active-handle table: a u32 count prefix followed by fixed-width
/// entries whose first field is the handle. the table sits one fixed
/// stride past the character name.
pub fn active_handles(data: &[u8], items_end: usize) -> Result<HashSet<Handle>> {
    let table = items_end + crate::NAME_OFFSET_FROM_ITEMS + crate::ENTRY_TABLE_OFFSET_FROM_NAME;
    if table + 4 > data.len() {
        return Err(PlannerError::MalformedBlob(
            "entry table prefix out of range".to_string(),
        ));
    }
    let count = LE::read_u32(&data[table..]);
    if !(crate::ENTRY_COUNT_MIN..=crate::ENTRY_COUNT_MAX).contains(&count) {
        return Err(PlannerError::MalformedBlob(format!(
            "implausible entry count {}",
            count
        )));
    }
    let mut handles = HashSet::new();
    for i in 0..count as usize {
        let offset = table + 4 + i * crate::ENTRY_STRIDE;
        if offset + crate::ENTRY_STRIDE > data.len() {
            return Err(PlannerError::MalformedBlob(
                "entry table truncated".to_string(),
            ));
        }
        let handle = LE::read_u32(&data[offset..]);
        if handle != 0 {
            handles.insert(handle);
        }
    }
    let drift = (count as i64 - handles.len() as i64).unsigned_abs() as usize;
    if drift >= crate::ACTIVE_COUNT_TOLERANCE {
        return Err(PlannerError::MalformedBlob(format!(
            "active handle count {} drifts from stored count {}",
            handles.len(),
            count
        )));
    }
    Ok(handles)
}

/// character name: up to sixteen UTF-16-LE code units one fixed offset
/// past the item array, double-zero terminated. empty maps to absent.
pub fn character_name(data: &[u8], items_end: usize) -> Option<String> {
    let start = items_end + crate::NAME_OFFSET_FROM_ITEMS;
    if start + 2 > data.len() {
        return None;
    }
    let mut units = Vec::new();
    for i in 0..crate::NAME_MAX_CHARS {
        let offset = start + 2 * i;
        if offset + 2 > data.len() {
            break;
        }
        let unit = LE::read_u16(&data[offset..]);
        if unit == 0 {
            break;
        }
        units.push(unit);
    }
    let name = String::from_utf16_lossy(&units);
    let name = name.trim_end_matches('\0');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
pub mod fixture {
    use crate::EMPTY_EFFECT;
    use crate::EffectId;
    use crate::Handle;

    /// a synthetic user-data blob builder for parser and pipeline tests.
    /// layer 1 records land at 0x14 in push order, padded out to the full
    /// slot count with empty records; the name and layer-2 entry table are
    /// placed at their contractual offsets.
    #[derive(Default)]
    pub struct BlobBuilder {
        relics: Vec<(Handle, u32, [EffectId; 3], [EffectId; 3])>,
        active: Vec<Handle>,
        name: Option<String>,
    }

    impl BlobBuilder {
        pub fn relic(
            mut self,
            handle: Handle,
            real_id: i64,
            effects: [EffectId; 3],
            curses: [EffectId; 3],
        ) -> Self {
            let item_id = (real_id + 2_147_483_648) as u32;
            self.relics.push((handle, item_id, effects, curses));
            self
        }

        /// a relic with no curse slots filled
        pub fn plain(self, handle: Handle, real_id: i64, effects: [EffectId; 3]) -> Self {
            self.relic(handle, real_id, effects, [EMPTY_EFFECT; 3])
        }

        pub fn active(mut self, handles: &[Handle]) -> Self {
            self.active.extend_from_slice(handles);
            self
        }

        pub fn name(mut self, name: &str) -> Self {
            self.name = Some(name.to_string());
            self
        }

        pub fn build(self) -> Vec<u8> {
            let mut data = vec![0u8; crate::ITEM_ARRAY_OFFSET];
            for (handle, item_id, effects, curses) in &self.relics {
                let base = data.len();
                data.resize(base + 80, 0);
                data[base..base + 4].copy_from_slice(&handle.to_le_bytes());
                data[base + 4..base + 8].copy_from_slice(&item_id.to_le_bytes());
                for (i, effect) in effects.iter().enumerate() {
                    let at = base + 16 + 4 * i;
                    data[at..at + 4].copy_from_slice(&effect.to_le_bytes());
                }
                for (i, curse) in curses.iter().enumerate() {
                    let at = base + 16 + 12 + 0x1C + 4 * i;
                    data[at..at + 4].copy_from_slice(&curse.to_le_bytes());
                }
            }
            // pad out the remaining layer-1 slots with empty records
            let empties = crate::ITEM_SLOT_COUNT - self.relics.len();
            data.resize(data.len() + 8 * empties, 0);
            let items_end = data.len();
            // character name
            let name_at = items_end + crate::NAME_OFFSET_FROM_ITEMS;
            data.resize(name_at + 2 * (crate::NAME_MAX_CHARS + 1), 0);
            if let Some(name) = &self.name {
                for (i, unit) in name.encode_utf16().take(crate::NAME_MAX_CHARS).enumerate() {
                    data[name_at + 2 * i..name_at + 2 * i + 2]
                        .copy_from_slice(&unit.to_le_bytes());
                }
            }
            // layer-2 entry table
            let table = name_at + crate::ENTRY_TABLE_OFFSET_FROM_NAME;
            data.resize(table + 4 + crate::ENTRY_STRIDE * self.active.len(), 0);
            data[table..table + 4].copy_from_slice(&(self.active.len() as u32).to_le_bytes());
            for (i, handle) in self.active.iter().enumerate() {
                let at = table + 4 + crate::ENTRY_STRIDE * i;
                data[at..at + 4].copy_from_slice(&handle.to_le_bytes());
                data[at + 4..at + 8].copy_from_slice(&1u32.to_le_bytes());
            }
            // pad so undersized-blob checks do not trip
            data.resize(data.len().max(0x1000), 0);
            data
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixture::BlobBuilder;
    use super::*;
    use crate::EMPTY_EFFECT;

    #[test]
    fn phantom_relics_are_dropped() {
        // two layer-1 records share a handle; only one is listed in layer 2
        let data = BlobBuilder::default()
            .plain(0xC000_0001, 100, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .plain(0xC000_0001, 100, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .plain(0xC000_0002, 200, [11, EMPTY_EFFECT, EMPTY_EFFECT])
            .active(&[0xC000_0001])
            .name("Traveler")
            .build();
        let parsed = parse_blob(&data).unwrap();
        assert_eq!(parsed.relics.len(), 1);
        assert_eq!(parsed.relics[0].handle, 0xC000_0001);
        assert_eq!(parsed.name.as_deref(), Some("Traveler"));
    }

    #[test]
    fn every_returned_handle_is_active() {
        let data = BlobBuilder::default()
            .plain(0xC000_0001, 100, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .plain(0xC000_0002, 200, [11, EMPTY_EFFECT, EMPTY_EFFECT])
            .plain(0xC000_0003, 300, [12, EMPTY_EFFECT, EMPTY_EFFECT])
            .active(&[0xC000_0001, 0xC000_0003])
            .name("Traveler")
            .build();
        let parsed = parse_blob(&data).unwrap();
        let handles = parsed.relics.iter().map(|r| r.handle).collect::<Vec<_>>();
        assert_eq!(handles, vec![0xC000_0001, 0xC000_0003]);
    }

    #[test]
    fn implausible_entry_count_is_malformed() {
        let mut data = BlobBuilder::default()
            .plain(0xC000_0001, 100, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .active(&[0xC000_0001])
            .name("Traveler")
            .build();
        let (_, items_end) = parse_items(&data, crate::ITEM_ARRAY_OFFSET, crate::ITEM_SLOT_COUNT);
        let table =
            items_end + crate::NAME_OFFSET_FROM_ITEMS + crate::ENTRY_TABLE_OFFSET_FROM_NAME;
        data[table..table + 4].copy_from_slice(&50_000u32.to_le_bytes());
        assert!(matches!(
            parse_blob(&data),
            Err(PlannerError::MalformedBlob(_))
        ));
    }

    #[test]
    fn zero_entry_count_is_malformed() {
        let mut data = BlobBuilder::default()
            .plain(0xC000_0001, 100, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .active(&[0xC000_0001])
            .build();
        let (_, items_end) = parse_items(&data, crate::ITEM_ARRAY_OFFSET, crate::ITEM_SLOT_COUNT);
        let table =
            items_end + crate::NAME_OFFSET_FROM_ITEMS + crate::ENTRY_TABLE_OFFSET_FROM_NAME;
        data[table..table + 4].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(
            parse_blob(&data),
            Err(PlannerError::MalformedBlob(_))
        ));
    }

    #[test]
    fn truncated_blob_yields_partial_items() {
        let full = BlobBuilder::default()
            .plain(0xC000_0001, 100, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .active(&[0xC000_0001])
            .build();
        let (items, _) = parse_items(&full[..64], crate::ITEM_ARRAY_OFFSET, crate::ITEM_SLOT_COUNT);
        assert!(!items.is_empty());
        assert!(items.len() < crate::ITEM_SLOT_COUNT);
    }

    #[test]
    fn missing_name_is_absent() {
        let data = BlobBuilder::default()
            .plain(0xC000_0001, 100, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .active(&[0xC000_0001])
            .build();
        let parsed = parse_blob(&data).unwrap();
        assert_eq!(parsed.name, None);
    }

    #[test]
    fn name_is_utf16_decoded() {
        let data = BlobBuilder::default()
            .plain(0xC000_0001, 100, [10, EMPTY_EFFECT, EMPTY_EFFECT])
            .active(&[0xC000_0001])
            .name("Lumière")
            .build();
        let parsed = parse_blob(&data).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Lumière"));
    }
}
