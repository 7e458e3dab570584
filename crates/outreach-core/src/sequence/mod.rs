//! Email step sequences and their serializable snapshots

mod content;
mod editor;
mod step;

pub use content::{CampaignContent, ContentMetadata, Snapshot};
pub use editor::{SequenceEditor, StepPatch};
pub use step::{EmailStep, StepStatus};
