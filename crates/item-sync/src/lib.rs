//! Item Sync
//!
//! Client-side state for an item collection mirrored from a REST service.
//!
//! Layout:
//! - item: wire entities and client-only drafts
//! - remote: the consumed collection service contract
//! - http: REST implementation of that contract
//! - config: service location
//! - synchronizer: the collection synchronizer driving the UI state

mod config;
mod http;
mod item;
mod remote;
mod synchronizer;

pub use config::{ApiConfig, ConfigError, DEFAULT_API_URL};
pub use http::HttpCollection;
pub use item::{EditSession, Item, ItemFields, ItemId, NewDraft};
pub use remote::{RemoteCollection, RemoteError, RemoteResult};
pub use synchronizer::{CollectionSynchronizer, Status, SyncError, SyncState};
