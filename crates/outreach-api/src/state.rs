//! Shared application state

use outreach_common::Config;
use outreach_core::PitchClient;
use outreach_storage::DatabasePool;

/// State shared by all handlers
pub struct AppState {
    pub db_pool: DatabasePool,
    pub config: Config,
    pub pitch_client: PitchClient,
}

impl AppState {
    pub fn new(db_pool: DatabasePool, config: Config) -> outreach_common::Result<Self> {
        let pitch_client = PitchClient::new(&config.pitch)?;
        Ok(Self {
            db_pool,
            config,
            pitch_client,
        })
    }
}
