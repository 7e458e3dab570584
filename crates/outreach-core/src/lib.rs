//! Outreach Core - Campaign builder domain logic
//!
//! This crate implements the campaign draft machinery: the ordered
//! email-step sequence with derived metadata, snapshot persistence and
//! sync, the wizard stage machine, the personalization table, and the
//! client for the external pitch-generation service.

pub mod draft;
pub mod personalize;
pub mod schedule;
pub mod sequence;

pub use draft::{
    keys, ContentSync, DraftError, DraftSession, DraftStore, MemoryDraftStore, RemoteDrafts,
    WizardStage,
};
pub use personalize::{
    ColumnType, CompanyProfile, PersonalizationColumn, PersonalizationTable, PitchClient,
    PitchOutcome, PitchRequest, PitchResponse, PitchTarget,
};
pub use schedule::CampaignSchedule;
pub use sequence::{
    CampaignContent, ContentMetadata, EmailStep, SequenceEditor, Snapshot, StepPatch, StepStatus,
};
