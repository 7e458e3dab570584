//! Per-contact personalization
//!
//! The personalization table holds one row per selected contact with a
//! dynamic column set; the pitch client fills pitch cells from the
//! external AI generation service.

mod pitch;
mod table;

pub use pitch::{PitchClient, PitchOutcome, PitchRequest, PitchResponse, PitchTarget};
pub use table::{
    ColumnType, CompanyProfile, PersonalizationColumn, PersonalizationRow, PersonalizationTable,
};
