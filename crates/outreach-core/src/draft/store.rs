//! Draft store port and in-memory implementation

use async_trait::async_trait;
use outreach_common::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key namespace shared by every wizard stage.
///
/// Values are JSON- or string-encoded and always read defensively:
/// missing or malformed entries fall back to defaults.
pub mod keys {
    use outreach_common::types::CampaignId;

    pub const CAMPAIGN_ID: &str = "campaignId";
    pub const CAMPAIGN_NAME: &str = "campaignName";
    pub const SELECTED_LIST_ID: &str = "selectedListId";
    pub const PERSONALIZATION_TYPE: &str = "personalizationType";
    pub const COMPANY_PERSONALIZATION_DATA: &str = "companyPersonalizationData";
    pub const PERSONALIZATION_DATA: &str = "personalizationData";
    pub const LAUNCHED_CAMPAIGN: &str = "launchedCampaign";

    /// Per-campaign content snapshot key
    pub fn content_key(campaign_id: CampaignId) -> String {
        format!("campaign_content_{}", campaign_id)
    }
}

/// Ephemeral key/value persistence port for draft hand-off.
///
/// Implemented by whatever storage the target platform offers; the
/// in-memory [`MemoryDraftStore`] ships for tests and standalone use.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn put(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory draft store
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryDraftStore::new();
        assert_eq!(store.get(keys::CAMPAIGN_NAME).await.unwrap(), None);

        store.put(keys::CAMPAIGN_NAME, "August Promo").await.unwrap();
        assert_eq!(
            store.get(keys::CAMPAIGN_NAME).await.unwrap(),
            Some("August Promo".to_string())
        );

        store.remove(keys::CAMPAIGN_NAME).await.unwrap();
        assert_eq!(store.get(keys::CAMPAIGN_NAME).await.unwrap(), None);
    }

    #[test]
    fn test_content_key_namespace() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            keys::content_key(id),
            "campaign_content_00000000-0000-0000-0000-000000000000"
        );
    }
}
