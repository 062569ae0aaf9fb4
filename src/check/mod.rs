mod checker;
mod reason;

pub use checker::RelicChecker;
pub use reason::InvalidReason;
pub use reason::is_curse_reason;
