mod breakdown;
mod scorer;
mod state;

pub use breakdown::BreakdownEntry;
pub use breakdown::OverrideStatus;
pub use scorer::Scorer;
pub use state::Placement;
pub use state::VesselState;
