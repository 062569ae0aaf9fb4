use crate::EffectId;
use crate::Score;
use crate::build::TierKey;

/// why a breakdown entry was zeroed
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideStatus {
    /// the same effect (or its text alias) is already placed
    Duplicate,
    /// a conflicting effect suppresses it
    Overridden,
}

/// per-effect scoring detail for UI and API display. a redundant entry
/// always carries a zero score.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BreakdownEntry {
    pub effect_id: EffectId,
    pub name: String,
    pub tier: Option<TierKey>,
    pub score: Score,
    pub is_curse: bool,
    pub redundant: bool,
    pub override_status: Option<OverrideStatus>,
}

impl BreakdownEntry {
    /// zero the entry, recording why
    pub fn suppress(&mut self, status: OverrideStatus) {
        self.score = 0;
        self.redundant = true;
        self.override_status = Some(status);
    }

    /// restore a wrongly suppressed entry to the given score
    pub fn restore(&mut self, score: Score) {
        self.score = score;
        self.redundant = false;
        self.override_status = None;
    }
}
