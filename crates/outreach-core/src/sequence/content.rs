//! Campaign content snapshots
//!
//! A `CampaignContent` is the full serialization of a draft's step
//! list, persisted locally after every edit burst and pushed to the
//! remote campaign record on explicit save. Loading tolerates the
//! legacy persisted shape (a bare step array) by normalizing it to the
//! current schema and re-deriving every derived field.

use chrono::{DateTime, Utc};
use outreach_common::types::CampaignId;
use serde::{Deserialize, Serialize};

use super::editor::SequenceEditor;
use super::step::{EmailStep, StepStatus};

/// Marker that a piece of content contains a personalization token.
const TOKEN_DELIMITER: &str = "{{";

/// Aggregate metadata over all steps of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub total_word_count: usize,
    /// Mean estimated read time across steps, in minutes.
    pub average_read_time: usize,
    /// Whether any subject or body contains a `{{token}}`.
    pub has_personalization: bool,
}

/// Serializable snapshot of a campaign draft's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignContent {
    pub campaign_id: CampaignId,
    pub steps: Vec<EmailStep>,
    pub total_steps: usize,
    /// Percentage of non-empty subject+body fields across all steps.
    pub completion_rate: u8,
    pub last_modified: DateTime<Utc>,
    pub metadata: ContentMetadata,
}

impl CampaignContent {
    /// Capture the current state of an editor as a snapshot.
    pub fn capture(campaign_id: CampaignId, editor: &SequenceEditor) -> Self {
        let steps = editor.steps().to_vec();

        let total_fields = steps.len() * 2;
        let completed_fields: usize = steps
            .iter()
            .map(|s| {
                usize::from(!s.subject.trim().is_empty()) + usize::from(!s.body.trim().is_empty())
            })
            .sum();
        let completion_rate = if total_fields == 0 {
            0
        } else {
            ((completed_fields as f64 / total_fields as f64) * 100.0).round() as u8
        };

        let total_word_count: usize = steps.iter().map(|s| s.word_count).sum();
        let average_read_time = if steps.is_empty() {
            0
        } else {
            steps.iter().map(|s| s.estimated_read_time).sum::<usize>() / steps.len()
        };
        let has_personalization = steps
            .iter()
            .any(|s| s.subject.contains(TOKEN_DELIMITER) || s.body.contains(TOKEN_DELIMITER));

        Self {
            campaign_id,
            total_steps: steps.len(),
            completion_rate,
            last_modified: Utc::now(),
            metadata: ContentMetadata {
                total_word_count,
                average_read_time,
                has_personalization,
            },
            steps,
        }
    }

    /// Plain-text concatenation of all step bodies, in send order.
    /// Consumed by the external send pipeline.
    pub fn plain_text(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// The first step's subject is the canonical subject line.
    pub fn subject_line(&self) -> &str {
        self.steps.first().map(|s| s.subject.as_str()).unwrap_or("")
    }

    /// Every step complete?
    pub fn is_complete(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.status == StepStatus::Complete)
    }

    /// Distinct `{{token}}` names referenced across all subjects and
    /// bodies, in first-seen order. These are the personalization
    /// columns the content expects to exist.
    pub fn personalization_tokens(&self) -> Vec<String> {
        static TOKEN_RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        let re = TOKEN_RE.get_or_init(|| {
            regex::Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap()
        });

        let mut tokens = Vec::new();
        for step in &self.steps {
            for text in [&step.subject, &step.body] {
                for capture in re.captures_iter(text) {
                    let name = capture[1].to_string();
                    if !tokens.contains(&name) {
                        tokens.push(name);
                    }
                }
            }
        }
        tokens
    }
}

/// A step as it may appear in legacy persisted records: derived fields
/// absent, camelCase delay key, order possibly missing.
#[derive(Debug, Clone, Deserialize)]
struct LegacyStep {
    #[serde(default = "uuid::Uuid::new_v4")]
    id: uuid::Uuid,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    body: String,
    #[serde(default, alias = "delayDays")]
    delay_days: u32,
    #[serde(default)]
    order: usize,
}

/// Persisted snapshot shapes, current or legacy.
///
/// Kept as an explicit tagged union rather than speculative field
/// probing: any legacy variant is upgraded to the current schema by
/// [`Snapshot::normalize`] before use.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    Current(CampaignContent),
    LegacySteps(Vec<serde_json::Value>),
}

impl Snapshot {
    /// Parse a persisted snapshot, accepting either shape.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Upgrade to the current schema. Derived fields of every step are
    /// recomputed rather than trusted, so partially-shaped records load
    /// cleanly; the result is re-captured to refresh aggregates.
    pub fn normalize(self, campaign_id: CampaignId) -> CampaignContent {
        let steps = match self {
            Snapshot::Current(content) => content.steps,
            Snapshot::LegacySteps(values) => values
                .into_iter()
                .filter_map(|v| serde_json::from_value::<LegacyStep>(v).ok())
                .map(|legacy| {
                    let mut step = EmailStep::new(legacy.subject, legacy.body, legacy.delay_days);
                    step.id = legacy.id;
                    step.order = legacy.order;
                    step
                })
                .collect(),
        };

        let mut steps = steps;
        for step in &mut steps {
            step.rederive();
        }
        let editor = SequenceEditor::from_steps(steps);
        CampaignContent::capture(campaign_id, &editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::editor::StepPatch;
    use pretty_assertions::assert_eq;

    fn editor_with_content() -> SequenceEditor {
        let mut editor = SequenceEditor::default_template();
        let first = editor.steps()[0].id;
        editor.update(
            first,
            StepPatch {
                subject: Some("Welcome".into()),
                body: Some("Hi {{first_name}}, thanks for reading.".into()),
                ..Default::default()
            },
        );
        editor
    }

    #[test]
    fn test_capture_aggregates() {
        let campaign_id = uuid::Uuid::new_v4();
        let content = CampaignContent::capture(campaign_id, &editor_with_content());

        assert_eq!(content.total_steps, 2);
        // 3 of 4 fields filled: first subject+body, follow-up subject.
        assert_eq!(content.completion_rate, 75);
        assert!(content.metadata.has_personalization);
        assert_eq!(content.subject_line(), "Welcome");
        assert!(content.plain_text().starts_with("Hi {{first_name}}"));
    }

    #[test]
    fn test_no_personalization_token() {
        let campaign_id = uuid::Uuid::new_v4();
        let mut editor = SequenceEditor::default_template();
        let first = editor.steps()[0].id;
        editor.update(
            first,
            StepPatch {
                body: Some("plain body".into()),
                ..Default::default()
            },
        );
        let content = CampaignContent::capture(campaign_id, &editor);
        assert!(!content.metadata.has_personalization);
    }

    #[test]
    fn test_personalization_tokens_deduplicated_in_order() {
        let campaign_id = uuid::Uuid::new_v4();
        let mut editor = SequenceEditor::default_template();
        let first = editor.steps()[0].id;
        let second = editor.steps()[1].id;
        editor.update(
            first,
            StepPatch {
                subject: Some("Quick question, {{first_name}}".into()),
                body: Some("I saw {{ company }} is growing. {{first_name}}, got a minute?".into()),
                ..Default::default()
            },
        );
        editor.update(
            second,
            StepPatch {
                body: Some("Following up on my note about {{company}}.".into()),
                ..Default::default()
            },
        );

        let content = CampaignContent::capture(campaign_id, &editor);
        assert_eq!(
            content.personalization_tokens(),
            vec!["first_name".to_string(), "company".to_string()]
        );
    }

    #[test]
    fn test_snapshot_roundtrip_current_shape() {
        let campaign_id = uuid::Uuid::new_v4();
        let content = CampaignContent::capture(campaign_id, &editor_with_content());

        let raw = serde_json::to_string(&content).unwrap();
        let restored = Snapshot::parse(&raw).unwrap().normalize(campaign_id);

        assert_eq!(restored.total_steps, content.total_steps);
        let subjects: Vec<_> = restored.steps.iter().map(|s| s.subject.clone()).collect();
        assert_eq!(subjects, vec!["Welcome".to_string(), "Follow-up".to_string()]);
        let bodies: Vec<_> = restored.steps.iter().map(|s| s.body.clone()).collect();
        let original: Vec<_> = content.steps.iter().map(|s| s.body.clone()).collect();
        assert_eq!(bodies, original);
    }

    #[test]
    fn test_snapshot_legacy_shape_regenerates_derived() {
        let campaign_id = uuid::Uuid::new_v4();
        // Bare step array with camelCase delay and no derived fields.
        let raw = r#"[
            {"id":"7f8d3a1e-9f1c-4e2b-8a6d-1c2b3a4d5e6f","subject":"Hi","body":"one two three","delayDays":2,"order":0},
            {"subject":"","body":""}
        ]"#;

        let content = Snapshot::parse(raw).unwrap().normalize(campaign_id);
        assert_eq!(content.total_steps, 2);
        assert_eq!(content.steps[0].word_count, 3);
        assert_eq!(content.steps[0].delay_days, 2);
        assert_eq!(content.steps[0].estimated_read_time, 1);
        assert_eq!(content.steps[0].preview, "one two three");
        assert_eq!(content.steps[1].status, StepStatus::Draft);
        // Orders repaired to contiguous ranks.
        let orders: Vec<_> = content.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_snapshot_garbage_is_none() {
        assert!(Snapshot::parse("not json").is_none());
    }

    #[test]
    fn test_subject_line_empty_sequence() {
        let content = CampaignContent {
            campaign_id: uuid::Uuid::new_v4(),
            steps: vec![],
            total_steps: 0,
            completion_rate: 0,
            last_modified: Utc::now(),
            metadata: ContentMetadata {
                total_word_count: 0,
                average_read_time: 0,
                has_personalization: false,
            },
        };
        assert_eq!(content.subject_line(), "");
        assert!(!content.is_complete());
    }
}
