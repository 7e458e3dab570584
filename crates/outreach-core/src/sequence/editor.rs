//! Step sequence editor
//!
//! Maintains the ordered step list for one campaign draft. After every
//! structural operation the `order` values form a contiguous, gap-free
//! `0..N-1` permutation.

use chrono::Utc;
use outreach_common::types::StepId;
use tracing::debug;

use super::step::EmailStep;

/// Default delay for steps inserted mid-sequence, in days.
const DEFAULT_INSERT_DELAY: u32 = 1;

/// Partial update applied to a single step
#[derive(Debug, Clone, Default)]
pub struct StepPatch {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub delay_days: Option<u32>,
}

/// Ordered email-step editor for one campaign draft
#[derive(Debug, Clone)]
pub struct SequenceEditor {
    steps: Vec<EmailStep>,
}

impl SequenceEditor {
    /// Default two-step template used when no snapshot exists: an
    /// opening email sent immediately and a follow-up after three days.
    pub fn default_template() -> Self {
        let mut editor = Self {
            steps: vec![
                EmailStep::new("", "", 0),
                EmailStep::new("Follow-up", "", 3),
            ],
        };
        editor.reindex();
        editor
    }

    /// Build an editor from already-loaded steps, restoring order rank.
    /// Steps are sorted by their persisted `order` and re-ranked so the
    /// contiguity invariant holds even for malformed input.
    pub fn from_steps(mut steps: Vec<EmailStep>) -> Self {
        steps.sort_by_key(|s| s.order);
        let mut editor = Self { steps };
        editor.reindex();
        editor
    }

    pub fn steps(&self) -> &[EmailStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<EmailStep> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, id: StepId) -> Option<&EmailStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Insert a new step immediately after the referenced step, or at
    /// the end when no reference is given. Later steps shift by +1.
    /// Returns the id of the new step.
    pub fn insert_after(&mut self, after: Option<StepId>) -> StepId {
        let insert_at = match after {
            Some(id) => self
                .steps
                .iter()
                .position(|s| s.id == id)
                .map(|idx| idx + 1)
                .unwrap_or(self.steps.len()),
            None => self.steps.len(),
        };

        let step = EmailStep::new("", "", DEFAULT_INSERT_DELAY);
        let id = step.id;
        self.steps.insert(insert_at, step);
        self.reindex();
        debug!(step_id = %id, position = insert_at, "Inserted sequence step");
        id
    }

    /// Remove a step. A campaign must always have at least one step, so
    /// removal of the last remaining step is silently rejected.
    /// Returns whether the step was removed.
    pub fn remove(&mut self, id: StepId) -> bool {
        if self.steps.len() <= 1 {
            return false;
        }
        let before = self.steps.len();
        self.steps.retain(|s| s.id != id);
        let removed = self.steps.len() < before;
        if removed {
            self.reindex();
            debug!(step_id = %id, "Removed sequence step");
        }
        removed
    }

    /// Duplicate a step directly after its source. The clone carries
    /// the source body and delay, a marked subject, and fresh identity.
    /// Returns the id of the clone, or None if the source is unknown.
    pub fn duplicate(&mut self, id: StepId) -> Option<StepId> {
        let idx = self.steps.iter().position(|s| s.id == id)?;
        let clone = self.steps[idx].duplicated();
        let clone_id = clone.id;
        self.steps.insert(idx + 1, clone);
        self.reindex();
        debug!(source = %id, clone = %clone_id, "Duplicated sequence step");
        Some(clone_id)
    }

    /// Apply a partial update. Derived fields are recomputed when the
    /// content they depend on changes; `updated_at` always refreshes.
    /// Returns whether the step exists.
    pub fn update(&mut self, id: StepId, patch: StepPatch) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        if let Some(subject) = patch.subject {
            step.subject = subject;
        }
        if let Some(body) = patch.body {
            step.body = body;
        }
        if let Some(delay) = patch.delay_days {
            step.delay_days = delay;
        }
        step.rederive();
        step.updated_at = Utc::now();
        true
    }

    /// Restore the contiguity invariant: order values become the
    /// current positional index.
    fn reindex(&mut self) {
        for (idx, step) in self.steps.iter_mut().enumerate() {
            step.order = idx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::step::StepStatus;
    use pretty_assertions::assert_eq;

    fn orders(editor: &SequenceEditor) -> Vec<usize> {
        editor.steps().iter().map(|s| s.order).collect()
    }

    #[test]
    fn test_default_template() {
        let editor = SequenceEditor::default_template();
        assert_eq!(editor.len(), 2);
        assert_eq!(editor.steps()[0].delay_days, 0);
        assert_eq!(editor.steps()[1].delay_days, 3);
        assert_eq!(orders(&editor), vec![0, 1]);
    }

    #[test]
    fn test_insert_after_first_step() {
        let mut editor = SequenceEditor::default_template();
        let first = editor.steps()[0].id;
        let new_id = editor.insert_after(Some(first));

        assert_eq!(orders(&editor), vec![0, 1, 2]);
        assert_eq!(editor.steps()[1].id, new_id);
        assert_eq!(editor.steps()[1].delay_days, 1);
    }

    #[test]
    fn test_insert_at_end() {
        let mut editor = SequenceEditor::default_template();
        let id = editor.insert_after(None);
        assert_eq!(editor.steps().last().unwrap().id, id);
        assert_eq!(orders(&editor), vec![0, 1, 2]);
    }

    #[test]
    fn test_remove_reindexes() {
        let mut editor = SequenceEditor::default_template();
        editor.insert_after(None);
        let middle = editor.steps()[1].id;

        assert!(editor.remove(middle));
        assert_eq!(editor.len(), 2);
        assert_eq!(orders(&editor), vec![0, 1]);
    }

    #[test]
    fn test_remove_floor_is_silent() {
        let mut editor = SequenceEditor::from_steps(vec![EmailStep::new("a", "b", 0)]);
        let only = editor.steps()[0].id;
        assert!(!editor.remove(only));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_order_contiguity_under_churn() {
        let mut editor = SequenceEditor::default_template();
        for _ in 0..5 {
            editor.insert_after(None);
        }
        let victim_a = editor.steps()[2].id;
        let victim_b = editor.steps()[5].id;
        editor.remove(victim_a);
        editor.remove(victim_b);
        editor.insert_after(Some(editor.steps()[0].id));

        let expected: Vec<usize> = (0..editor.len()).collect();
        assert_eq!(orders(&editor), expected);
    }

    #[test]
    fn test_duplicate_shifts_later_steps() {
        let mut editor = SequenceEditor::default_template();
        let first = editor.steps()[0].id;
        editor.update(
            first,
            StepPatch {
                subject: Some("Welcome".into()),
                body: Some("Hi there".into()),
                ..Default::default()
            },
        );

        let clone_id = editor.duplicate(first).unwrap();
        assert_eq!(editor.len(), 3);

        let clone = editor.get(clone_id).unwrap();
        assert_eq!(clone.subject, "Welcome (Copy)");
        assert_eq!(clone.body, "Hi there");
        assert_eq!(clone.order, 1);
        // The old follow-up moved down.
        assert_eq!(editor.steps()[2].subject, "Follow-up");
        assert_eq!(orders(&editor), vec![0, 1, 2]);
    }

    #[test]
    fn test_update_recomputes_derived() {
        let mut editor = SequenceEditor::default_template();
        let id = editor.steps()[0].id;

        let body = vec!["word"; 250].join(" ");
        assert!(editor.update(
            id,
            StepPatch {
                body: Some(body),
                ..Default::default()
            }
        ));

        let step = editor.get(id).unwrap();
        assert_eq!(step.word_count, 250);
        assert_eq!(step.estimated_read_time, 2);
        // Subject still empty, so the step stays a draft.
        assert_eq!(step.status, StepStatus::Draft);

        assert!(editor.update(
            id,
            StepPatch {
                subject: Some("Done".into()),
                ..Default::default()
            }
        ));
        assert_eq!(editor.get(id).unwrap().status, StepStatus::Complete);
    }

    #[test]
    fn test_update_unknown_step() {
        let mut editor = SequenceEditor::default_template();
        assert!(!editor.update(uuid::Uuid::new_v4(), StepPatch::default()));
    }

    #[test]
    fn test_from_steps_repairs_orders() {
        let mut a = EmailStep::new("a", "a", 0);
        let mut b = EmailStep::new("b", "b", 1);
        let mut c = EmailStep::new("c", "c", 1);
        a.order = 4;
        b.order = 0;
        c.order = 9;

        let editor = SequenceEditor::from_steps(vec![a, b, c]);
        assert_eq!(orders(&editor), vec![0, 1, 2]);
        assert_eq!(editor.steps()[0].subject, "b");
        assert_eq!(editor.steps()[2].subject, "c");
    }
}
