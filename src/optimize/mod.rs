mod assembly;
mod optimizer;
mod result;
mod search;

pub use optimizer::Optimizer;
pub use result::MissingRequirement;
pub use result::SlotAssignment;
pub use result::VesselResult;
