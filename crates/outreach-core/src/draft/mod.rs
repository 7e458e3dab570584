//! Draft persistence and wizard hand-off
//!
//! State crosses wizard stages only through an explicit draft context
//! backed by a key/value persistence port, never through shared
//! in-memory state.

mod session;
mod store;

pub use session::{ContentSync, DraftError, DraftSession, RemoteDrafts, WizardStage};
pub use store::{keys, DraftStore, MemoryDraftStore};
