/// why a relic (or one of its effect slots) fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    ValidationError,
    InIllegalRange,
    InvalidItem,
    EffectMustBeEmpty,
    EffectNotInRollablePool,
    EffectConflict,
    CurseMustBeEmpty,
    CurseRequiredByEffect,
    CurseNotInRollablePool,
    CurseConflict,
    CursesNotEnough,
    EffectsNotSorted,
}

/// the reason concerns the curse slots rather than the primaries
pub fn is_curse_reason(reason: InvalidReason) -> bool {
    matches!(
        reason,
        InvalidReason::CurseMustBeEmpty
            | InvalidReason::CurseRequiredByEffect
            | InvalidReason::CurseNotInRollablePool
            | InvalidReason::CurseConflict
            | InvalidReason::CursesNotEnough
    )
}
