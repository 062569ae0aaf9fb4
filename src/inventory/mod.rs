mod blob;
#[cfg(test)]
pub(crate) use blob::fixture as blob_fixture;
mod characters;
mod groups;
mod inventory;
mod item;
mod owned;
mod raw;
mod remap;

pub use blob::ParsedBlob;
pub use blob::parse_blob;
pub use characters::CharacterSlot;
pub use characters::discover_characters;
pub use characters::parse_save;
pub use groups::RelicGroup;
pub use groups::is_deep_relic;
pub use groups::is_unique_relic;
pub use inventory::RelicInventory;
pub use item::Item;
pub use item::ItemKind;
pub use owned::Fingerprint;
pub use owned::OwnedRelic;
pub use owned::RelicTier;
pub use raw::RawRelic;
pub use remap::remap_pinned_handles;
