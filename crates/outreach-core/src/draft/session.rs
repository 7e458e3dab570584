//! Draft session - the wizard's draft context
//!
//! One `DraftSession` exists per campaign draft being edited. It owns
//! the step editor, keeps the local fallback snapshot fresh through a
//! debounced autosave, and syncs the serialized snapshot to the remote
//! campaign record on explicit save.

use async_trait::async_trait;
use outreach_common::types::{CampaignId, PersonalizationMode, StepId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::store::{keys, DraftStore};
use crate::sequence::{CampaignContent, SequenceEditor, Snapshot, StepPatch};

/// Draft session errors
#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Draft store error: {0}")]
    Store(#[from] outreach_common::Error),

    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serialized snapshot plus the derived fields the remote record keeps
/// alongside it, consumed by the external send pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSync {
    pub content: String,
    pub email_content: String,
    pub subject_line: String,
    pub total_steps: usize,
    pub completion_rate: u8,
}

/// Remote persistence port for campaign content.
///
/// Read failures are soft: the session falls through to the local
/// snapshot. Write failures surface to the caller classified, and
/// never clear the local fallback.
#[async_trait]
pub trait RemoteDrafts: Send + Sync {
    async fn load_content(&self, campaign_id: CampaignId) -> outreach_common::Result<Option<String>>;

    async fn save_content(
        &self,
        campaign_id: CampaignId,
        sync: &ContentSync,
    ) -> outreach_common::Result<()>;
}

/// Wizard pages, in flow order. Navigation is strictly forward or
/// backward; the personalization table is visited only when the draft
/// uses AI personalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    Setup,
    PersonalizationSelect,
    Personalization,
    Content,
    Review,
    Success,
}

impl WizardStage {
    /// The stage the wizard advances to from here.
    pub fn next(self, mode: PersonalizationMode) -> Self {
        match self {
            WizardStage::Setup => WizardStage::PersonalizationSelect,
            WizardStage::PersonalizationSelect => match mode {
                PersonalizationMode::Personalization => WizardStage::Personalization,
                PersonalizationMode::Standard => WizardStage::Content,
            },
            WizardStage::Personalization => WizardStage::Content,
            WizardStage::Content => WizardStage::Review,
            WizardStage::Review => WizardStage::Success,
            WizardStage::Success => WizardStage::Success,
        }
    }

    /// The stage the wizard returns to from here.
    pub fn back(self, mode: PersonalizationMode) -> Self {
        match self {
            WizardStage::Setup => WizardStage::Setup,
            WizardStage::PersonalizationSelect => WizardStage::Setup,
            WizardStage::Personalization => WizardStage::PersonalizationSelect,
            WizardStage::Content => match mode {
                PersonalizationMode::Personalization => WizardStage::Personalization,
                PersonalizationMode::Standard => WizardStage::PersonalizationSelect,
            },
            WizardStage::Review => WizardStage::Content,
            WizardStage::Success => WizardStage::Success,
        }
    }
}

/// Draft context passed between wizard stages
pub struct DraftSession {
    campaign_id: CampaignId,
    campaign_name: String,
    mode: PersonalizationMode,
    stage: WizardStage,
    editor: SequenceEditor,
    store: Arc<dyn DraftStore>,
    remote: Option<Arc<dyn RemoteDrafts>>,
    debounce: Duration,
    pending_save: Option<JoinHandle<()>>,
}

impl DraftSession {
    /// Open the draft for content editing, loading any existing
    /// snapshot. Precedence: remote record, then local fallback, then
    /// the default two-step template. Remote read failures are
    /// non-fatal; loaded steps are re-validated and re-derived rather
    /// than trusted verbatim.
    pub async fn open(
        store: Arc<dyn DraftStore>,
        remote: Option<Arc<dyn RemoteDrafts>>,
        campaign_id: CampaignId,
        campaign_name: impl Into<String>,
        mode: PersonalizationMode,
        debounce: Duration,
    ) -> Result<Self, DraftError> {
        let editor = Self::load_editor(&*store, remote.as_deref(), campaign_id).await;

        store
            .put(keys::CAMPAIGN_ID, &campaign_id.to_string())
            .await?;
        let campaign_name = campaign_name.into();
        store.put(keys::CAMPAIGN_NAME, &campaign_name).await?;
        store
            .put(keys::PERSONALIZATION_TYPE, &mode.to_string())
            .await?;

        Ok(Self {
            campaign_id,
            campaign_name,
            mode,
            stage: WizardStage::Content,
            editor,
            store,
            remote,
            debounce,
            pending_save: None,
        })
    }

    async fn load_editor(
        store: &dyn DraftStore,
        remote: Option<&dyn RemoteDrafts>,
        campaign_id: CampaignId,
    ) -> SequenceEditor {
        if let Some(remote) = remote {
            match remote.load_content(campaign_id).await {
                Ok(Some(raw)) => {
                    if let Some(snapshot) = Snapshot::parse(&raw) {
                        debug!(%campaign_id, "Loaded draft content from remote record");
                        let content = snapshot.normalize(campaign_id);
                        return SequenceEditor::from_steps(content.steps);
                    }
                    warn!(%campaign_id, "Remote snapshot unparseable, trying local fallback");
                }
                Ok(None) => {}
                Err(e) => {
                    // Soft failure: fall through to the local snapshot.
                    warn!(%campaign_id, error = %e, "Remote load failed, trying local fallback");
                }
            }
        }

        let local = store
            .get(&keys::content_key(campaign_id))
            .await
            .ok()
            .flatten();
        if let Some(raw) = local {
            if let Some(snapshot) = Snapshot::parse(&raw) {
                debug!(%campaign_id, "Loaded draft content from local snapshot");
                let content = snapshot.normalize(campaign_id);
                return SequenceEditor::from_steps(content.steps);
            }
        }

        debug!(%campaign_id, "No usable snapshot, starting from default template");
        SequenceEditor::default_template()
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    pub fn campaign_name(&self) -> &str {
        &self.campaign_name
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn editor(&self) -> &SequenceEditor {
        &self.editor
    }

    /// Current snapshot of the draft's content.
    pub fn content(&self) -> CampaignContent {
        CampaignContent::capture(self.campaign_id, &self.editor)
    }

    /// Advance to the next wizard stage. Moving forward from the
    /// content page pushes the snapshot to the remote record first.
    pub async fn advance(&mut self) -> Result<WizardStage, DraftError> {
        if self.stage == WizardStage::Content {
            self.save().await?;
        }
        self.stage = self.stage.next(self.mode);
        Ok(self.stage)
    }

    /// Return to the previous wizard stage.
    pub fn go_back(&mut self) -> WizardStage {
        self.stage = self.stage.back(self.mode);
        self.stage
    }

    // Editing operations: each mutation reschedules the debounced
    // local autosave, so only the latest state in a burst of edits is
    // ever written.

    pub fn insert_after(&mut self, after: Option<StepId>) -> StepId {
        let id = self.editor.insert_after(after);
        self.schedule_autosave();
        id
    }

    pub fn remove(&mut self, id: StepId) -> bool {
        let removed = self.editor.remove(id);
        if removed {
            self.schedule_autosave();
        }
        removed
    }

    pub fn duplicate(&mut self, id: StepId) -> Option<StepId> {
        let clone = self.editor.duplicate(id);
        if clone.is_some() {
            self.schedule_autosave();
        }
        clone
    }

    pub fn update(&mut self, id: StepId, patch: StepPatch) -> bool {
        let updated = self.editor.update(id, patch);
        if updated {
            self.schedule_autosave();
        }
        updated
    }

    fn schedule_autosave(&mut self) {
        if let Some(handle) = self.pending_save.take() {
            handle.abort();
        }

        let content = self.content();
        let store = self.store.clone();
        let key = keys::content_key(self.campaign_id);
        let delay = self.debounce;

        self.pending_save = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match serde_json::to_string(&content) {
                Ok(raw) => {
                    if let Err(e) = store.put(&key, &raw).await {
                        warn!(error = %e, "Draft autosave failed");
                    }
                }
                Err(e) => warn!(error = %e, "Draft snapshot serialization failed"),
            }
        }));
    }

    /// Explicit save: write the local snapshot immediately and push the
    /// serialized content to the remote record. A remote failure leaves
    /// the local fallback in place so no data is lost.
    pub async fn save(&mut self) -> Result<(), DraftError> {
        if let Some(handle) = self.pending_save.take() {
            handle.abort();
        }

        let content = self.content();
        let raw = serde_json::to_string(&content)?;
        self.store
            .put(&keys::content_key(self.campaign_id), &raw)
            .await?;

        if let Some(remote) = &self.remote {
            let sync = ContentSync {
                email_content: content.plain_text(),
                subject_line: content.subject_line().to_string(),
                total_steps: content.total_steps,
                completion_rate: content.completion_rate,
                content: raw,
            };
            remote.save_content(self.campaign_id, &sync).await?;
            debug!(campaign_id = %self.campaign_id, "Draft content synced to remote record");
        }

        Ok(())
    }

    /// Mark the campaign as launched and clear the wizard hand-off
    /// keys. The content snapshot key is left alone; it goes away only
    /// with the owning campaign.
    pub async fn complete_launch(&mut self) -> Result<(), DraftError> {
        let launched = serde_json::json!({
            "id": self.campaign_id,
            "name": self.campaign_name,
        });
        self.store
            .put(keys::LAUNCHED_CAMPAIGN, &launched.to_string())
            .await?;

        self.store.remove(keys::CAMPAIGN_ID).await?;
        self.store.remove(keys::CAMPAIGN_NAME).await?;
        self.store.remove(keys::SELECTED_LIST_ID).await?;

        self.stage = WizardStage::Success;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::MemoryDraftStore;
    use crate::sequence::StepStatus;
    use outreach_common::Error;
    use pretty_assertions::assert_eq;
    use tokio::sync::Mutex;

    /// Remote port stub with scriptable load/save behavior.
    struct StubRemote {
        load: Mutex<Option<outreach_common::Result<Option<String>>>>,
        fail_save: bool,
        saved: Mutex<Vec<ContentSync>>,
    }

    impl StubRemote {
        fn empty() -> Self {
            Self {
                load: Mutex::new(Some(Ok(None))),
                fail_save: false,
                saved: Mutex::new(Vec::new()),
            }
        }

        fn with_content(raw: &str) -> Self {
            Self {
                load: Mutex::new(Some(Ok(Some(raw.to_string())))),
                fail_save: false,
                saved: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                load: Mutex::new(Some(Err(Error::Database("connection refused".into())))),
                fail_save: true,
                saved: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RemoteDrafts for StubRemote {
        async fn load_content(
            &self,
            _campaign_id: CampaignId,
        ) -> outreach_common::Result<Option<String>> {
            self.load.lock().await.take().unwrap_or(Ok(None))
        }

        async fn save_content(
            &self,
            _campaign_id: CampaignId,
            sync: &ContentSync,
        ) -> outreach_common::Result<()> {
            if self.fail_save {
                return Err(Error::PermissionDenied("row-level security".into()));
            }
            self.saved.lock().await.push(sync.clone());
            Ok(())
        }
    }

    async fn open_session(
        store: Arc<MemoryDraftStore>,
        remote: Option<Arc<dyn RemoteDrafts>>,
    ) -> DraftSession {
        DraftSession::open(
            store,
            remote,
            uuid::Uuid::new_v4(),
            "Test Campaign",
            PersonalizationMode::Standard,
            Duration::from_millis(400),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_open_without_snapshot_uses_template() {
        let store = Arc::new(MemoryDraftStore::new());
        let session = open_session(store.clone(), None).await;

        assert_eq!(session.editor().len(), 2);
        assert_eq!(session.editor().steps()[1].delay_days, 3);
        // Hand-off keys were written.
        assert_eq!(
            store.get(keys::CAMPAIGN_NAME).await.unwrap(),
            Some("Test Campaign".to_string())
        );
        assert_eq!(
            store.get(keys::PERSONALIZATION_TYPE).await.unwrap(),
            Some("standard".to_string())
        );
    }

    #[tokio::test]
    async fn test_remote_load_failure_falls_back_to_local() {
        let campaign_id = uuid::Uuid::new_v4();
        let store = Arc::new(MemoryDraftStore::new());
        store
            .put(
                &keys::content_key(campaign_id),
                r#"[{"subject":"Local","body":"from the fallback","delayDays":1}]"#,
            )
            .await
            .unwrap();

        let remote: Arc<dyn RemoteDrafts> = Arc::new(StubRemote::failing());
        let session = DraftSession::open(
            store,
            Some(remote),
            campaign_id,
            "Fallback",
            PersonalizationMode::Standard,
            Duration::from_millis(400),
        )
        .await
        .unwrap();

        assert_eq!(session.editor().len(), 1);
        assert_eq!(session.editor().steps()[0].subject, "Local");
        // Legacy shape loaded and re-derived.
        assert_eq!(session.editor().steps()[0].word_count, 3);
    }

    #[tokio::test]
    async fn test_remote_snapshot_wins_over_local() {
        let campaign_id = uuid::Uuid::new_v4();
        let store = Arc::new(MemoryDraftStore::new());
        store
            .put(
                &keys::content_key(campaign_id),
                r#"[{"subject":"Local","body":"x"}]"#,
            )
            .await
            .unwrap();

        let remote: Arc<dyn RemoteDrafts> = Arc::new(StubRemote::with_content(
            r#"[{"subject":"Remote","body":"remote body","delayDays":2}]"#,
        ));
        let session = DraftSession::open(
            store,
            Some(remote),
            campaign_id,
            "Precedence",
            PersonalizationMode::Standard,
            Duration::from_millis(400),
        )
        .await
        .unwrap();

        assert_eq!(session.editor().steps()[0].subject, "Remote");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_autosave_keeps_latest_only() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut session = open_session(store.clone(), None).await;
        let key = keys::content_key(session.campaign_id());
        let first = session.editor().steps()[0].id;

        session.update(
            first,
            StepPatch {
                body: Some("first draft".into()),
                ..Default::default()
            },
        );
        // A second edit inside the quiet period restarts the timer.
        tokio::time::sleep(Duration::from_millis(200)).await;
        session.update(
            first,
            StepPatch {
                body: Some("second draft".into()),
                ..Default::default()
            },
        );

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(store.get(&key).await.unwrap(), None);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let raw = store.get(&key).await.unwrap().expect("autosave fired");
        let content = Snapshot::parse(&raw)
            .unwrap()
            .normalize(session.campaign_id());
        assert_eq!(content.steps[0].body, "second draft");
    }

    #[tokio::test]
    async fn test_save_pushes_derived_fields() {
        let store = Arc::new(MemoryDraftStore::new());
        let remote = Arc::new(StubRemote::empty());
        let mut session = open_session(store.clone(), Some(remote.clone())).await;

        let first = session.editor().steps()[0].id;
        session.update(
            first,
            StepPatch {
                subject: Some("Opening".into()),
                body: Some("body one".into()),
                ..Default::default()
            },
        );
        session.save().await.unwrap();

        let saved = remote.saved.lock().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].subject_line, "Opening");
        assert_eq!(saved[0].total_steps, 2);
        assert!(saved[0].email_content.starts_with("body one"));
    }

    #[tokio::test]
    async fn test_failed_remote_save_keeps_local_snapshot() {
        let store = Arc::new(MemoryDraftStore::new());
        let remote: Arc<dyn RemoteDrafts> = Arc::new(StubRemote::failing());
        let mut session = open_session(store.clone(), Some(remote)).await;
        let key = keys::content_key(session.campaign_id());

        let err = session.save().await.unwrap_err();
        match err {
            DraftError::Store(e) => assert_eq!(e.status_code(), 403),
            other => panic!("unexpected error: {}", other),
        }
        // Local fallback survived the failed push.
        assert!(store.get(&key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stage_machine_standard_flow() {
        let mode = PersonalizationMode::Standard;
        let mut stage = WizardStage::Setup;
        stage = stage.next(mode);
        assert_eq!(stage, WizardStage::PersonalizationSelect);
        stage = stage.next(mode);
        assert_eq!(stage, WizardStage::Content);
        stage = stage.next(mode);
        assert_eq!(stage, WizardStage::Review);
        stage = stage.next(mode);
        assert_eq!(stage, WizardStage::Success);
        // Terminal stage does not advance further.
        assert_eq!(stage.next(mode), WizardStage::Success);
    }

    #[tokio::test]
    async fn test_stage_machine_personalization_branch() {
        let mode = PersonalizationMode::Personalization;
        assert_eq!(
            WizardStage::PersonalizationSelect.next(mode),
            WizardStage::Personalization
        );
        assert_eq!(
            WizardStage::Content.back(mode),
            WizardStage::Personalization
        );
        assert_eq!(
            WizardStage::Content.back(PersonalizationMode::Standard),
            WizardStage::PersonalizationSelect
        );
    }

    #[tokio::test]
    async fn test_advance_from_content_syncs_remote() {
        let store = Arc::new(MemoryDraftStore::new());
        let remote = Arc::new(StubRemote::empty());
        let mut session = open_session(store, Some(remote.clone())).await;

        let stage = session.advance().await.unwrap();
        assert_eq!(stage, WizardStage::Review);
        assert_eq!(remote.saved.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_complete_launch_clears_handoff_keys() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut session = open_session(store.clone(), None).await;
        store
            .put(keys::SELECTED_LIST_ID, &uuid::Uuid::new_v4().to_string())
            .await
            .unwrap();

        session.complete_launch().await.unwrap();

        assert_eq!(session.stage(), WizardStage::Success);
        assert_eq!(store.get(keys::CAMPAIGN_ID).await.unwrap(), None);
        assert_eq!(store.get(keys::CAMPAIGN_NAME).await.unwrap(), None);
        assert_eq!(store.get(keys::SELECTED_LIST_ID).await.unwrap(), None);
        assert!(store.get(keys::LAUNCHED_CAMPAIGN).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_content_snapshot_status() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut session = open_session(store, None).await;
        let content = session.content();
        assert_eq!(content.total_steps, 2);
        assert!(content
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Draft));

        let first = session.editor().steps()[0].id;
        session.update(
            first,
            StepPatch {
                subject: Some("s".into()),
                body: Some("b".into()),
                ..Default::default()
            },
        );
        let content = session.content();
        assert_eq!(content.steps[0].status, StepStatus::Complete);
    }
}
