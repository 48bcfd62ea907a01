//! Client-side draft persistence: the storage port and the save-timer
//! lifecycle that keeps an in-progress submission recoverable across
//! sessions.

pub mod manager;
pub mod store;

pub use manager::{
    DraftManager, DraftRecord, SaveTrigger, AUTOSAVE_INTERVAL, CREATE_DRAFT_KEY, DEBOUNCE_QUIET,
    DRAFT_VERSION, MAX_DRAFT_AGE_MS,
};
pub use store::{DraftStore, DraftStoreError, FileDraftStore, MemoryDraftStore};
