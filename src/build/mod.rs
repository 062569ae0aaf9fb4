mod character;
mod definition;
mod tier;

pub use character::Character;
pub use character::HERO_TYPE_ALL;
pub use definition::BuildDefinition;
pub use tier::TIERS;
pub use tier::TierConfig;
pub use tier::TierKey;
