//! Remote Collection - Core Trait
//!
//! The abstract item service the synchronizer talks to.
//! Implementations can use HTTP, in-memory fakes, etc.

use async_trait::async_trait;
use thiserror::Error;

use crate::item::{Item, ItemFields, ItemId};

/// Common result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failures of a single remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never got a response (unreachable, network fault)
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("{}", status_text(.status, .reason))]
    Status { status: u16, reason: Option<String> },

    /// A success response whose body is not what the contract promises
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Best available diagnostic: server-supplied reason first, then the transport text
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

fn status_text(status: &u16, reason: &Option<String>) -> String {
    match reason {
        Some(reason) => reason.clone(),
        None => format!("Request failed with status code {}", status),
    }
}

/// Item collection service (REST-shaped CRUD)
///
/// Futures are not `Send`: the browser executor is single-threaded.
#[async_trait(?Send)]
pub trait RemoteCollection {
    /// Fetch the full collection
    async fn list(&self) -> RemoteResult<Vec<Item>>;

    /// Create an item; the service assigns its id
    async fn create(&self, fields: &ItemFields) -> RemoteResult<Item>;

    /// Replace name/description of an existing item
    async fn update(&self, id: &ItemId, fields: &ItemFields) -> RemoteResult<Item>;

    /// Delete an item by id
    async fn delete(&self, id: &ItemId) -> RemoteResult<()>;

    /// Where the service lives, for diagnostics
    fn endpoint(&self) -> &str;
}
