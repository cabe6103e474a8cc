use crate::state::CoordsXYZ;

/// Money in the park's smallest currency unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);
}

/// Finance ledger category an action's cost is booked under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpenditureType {
    #[default]
    Landscaping,
}

/// Successful outcome of querying or executing an action.
///
/// Query and execute report the same shape so the UI can preview cost and
/// placement before committing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub cost: Money,
    pub expenditure: ExpenditureType,
    /// World position the action applies to, used for cost popups.
    pub position: CoordsXYZ,
}

impl ActionOutcome {
    pub fn landscaping(position: CoordsXYZ) -> Self {
        Self {
            cost: Money::ZERO,
            expenditure: ExpenditureType::Landscaping,
            position,
        }
    }
}
