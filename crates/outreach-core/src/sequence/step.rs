//! One message in a multi-step send sequence

use chrono::{DateTime, Utc};
use outreach_common::types::StepId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reading speed used for the estimated read time, words per minute.
const WORDS_PER_MINUTE: usize = 200;

/// Maximum preview length in characters.
const PREVIEW_CHARS: usize = 100;

/// Completion status of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Draft,
    Complete,
}

/// One email in a sequence.
///
/// `word_count`, `estimated_read_time`, `preview`, and `status` are
/// derived from subject/body and recomputed on every mutation; they are
/// never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailStep {
    pub id: StepId,
    pub subject: String,
    pub body: String,
    /// Days to wait after the previous step; ignored for the first step.
    pub delay_days: u32,
    /// Rank within the sequence, contiguous from 0.
    pub order: usize,

    pub word_count: usize,
    /// Estimated read time in minutes, minimum 1.
    pub estimated_read_time: usize,
    pub preview: String,
    pub status: StepStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmailStep {
    /// Create a new step with derived fields computed from the content.
    pub fn new(subject: impl Into<String>, body: impl Into<String>, delay_days: u32) -> Self {
        let now = Utc::now();
        let mut step = Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            body: body.into(),
            delay_days,
            order: 0,
            word_count: 0,
            estimated_read_time: 1,
            preview: String::new(),
            status: StepStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        step.rederive();
        step
    }

    /// Recompute every derived field from the current subject and body.
    ///
    /// Also used when loading persisted steps: legacy snapshots may be
    /// missing derived fields entirely, so nothing persisted is trusted.
    pub fn rederive(&mut self) {
        self.word_count = self.body.split_whitespace().count();
        self.estimated_read_time = std::cmp::max(1, self.word_count.div_ceil(WORDS_PER_MINUTE));
        self.preview = make_preview(&self.body);
        self.status = if self.subject.trim().is_empty() || self.body.trim().is_empty() {
            StepStatus::Draft
        } else {
            StepStatus::Complete
        };
    }

    /// Clone content into a fresh step with new identity and timestamps.
    /// The subject gets a copy marker so duplicates are tellable apart.
    pub fn duplicated(&self) -> Self {
        let mut clone = Self::new(
            format!("{} (Copy)", self.subject),
            self.body.clone(),
            self.delay_days,
        );
        clone.order = self.order + 1;
        clone
    }
}

fn make_preview(body: &str) -> String {
    let mut chars = body.chars();
    let preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}
