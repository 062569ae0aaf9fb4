use crate::EffectId;
use crate::Score;
use crate::data::Color;
use crate::inventory::OwnedRelic;
use crate::score::BreakdownEntry;

/// a requirement the assignment failed to cover
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum MissingRequirement {
    Effect(EffectId),
    Family(String),
}

/// a relic assigned to one vessel slot, with its contextual score and
/// per-effect breakdown
#[derive(Debug, Clone, serde::Serialize)]
pub struct SlotAssignment {
    pub slot_index: usize,
    pub slot_color: Color,
    pub is_deep: bool,
    pub relic: Option<OwnedRelic>,
    pub score: Score,
    pub breakdown: Vec<BreakdownEntry>,
}

/// optimization result for a single vessel
#[derive(Debug, Clone, serde::Serialize)]
pub struct VesselResult {
    pub vessel_id: i64,
    pub vessel_name: String,
    pub vessel_character: String,
    pub unlock_flag: i64,
    pub slot_colors: [Color; 6],
    pub assignments: Vec<SlotAssignment>,
    pub total_score: Score,
    pub meets_requirements: bool,
    pub missing_requirements: Vec<MissingRequirement>,
}

impl VesselResult {
    /// handles of the relics actually placed
    pub fn assigned_handles(&self) -> Vec<crate::Handle> {
        self.assignments
            .iter()
            .filter_map(|a| a.relic.as_ref())
            .map(|r| r.handle)
            .collect()
    }
}
