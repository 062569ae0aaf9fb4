mod color;
mod family;
mod language;
mod params;
mod pools;
mod relics;
mod resolver;
mod stacking;
mod text;
mod vessels;

#[cfg(test)]
pub(crate) mod fixture;

pub use color::Color;
pub use family::Families;
pub use family::Family;
pub use family::FamilyMember;
pub use family::FamilyRank;
pub use family::split_magnitude;
pub use language::DEFAULT_LANGUAGE;
pub use language::LANGUAGES;
pub use params::EffectParam;
pub use pools::PoolRow;
pub use resolver::EffectInfo;
pub use resolver::GameData;
pub use stacking::SourceOverride;
pub use stacking::StackingRules;
pub use stacking::StackingType;
pub use stacking::normalize;
pub use stacking::strip_parenthetical;
pub use text::FmgText;
pub use vessels::Vessel;
