//! Collection Synchronizer
//!
//! Keeps the local item list, the drafts and the busy/error status consistent with the
//! remote collection. Every remote-calling operation is single-flight: it raises `busy`,
//! awaits exactly one remote call, then applies its outcome as one transition.

use std::cell::RefCell;

use thiserror::Error;

use crate::item::{EditSession, Item, ItemFields, ItemId, NewDraft};
use crate::remote::{RemoteCollection, RemoteError};

const CREATE_EMPTY: &str = "Name and description cannot be empty.";
const UPDATE_EMPTY: &str = "Name and description cannot be empty during edit.";

/// Why an operation did not apply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A required field was empty; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// The remote call failed; `message` is what the status line shows
    #[error("{message}")]
    Remote {
        message: String,
        #[source]
        source: RemoteError,
    },

    /// Another remote call is still in flight
    #[error("Another request is still in progress")]
    Busy,

    /// Deleting is locked while an item is being edited
    #[error("Finish or cancel the current edit first")]
    EditInProgress,

    #[error("Item {0} is not in the collection")]
    UnknownItem(ItemId),
}

/// Busy flag plus the last error message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub busy: bool,
    pub error: Option<String>,
}

/// Everything the UI renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    /// Mirror of the server collection, in server order plus appended creations
    pub items: Vec<Item>,
    /// Add-new form fields
    pub draft: NewDraft,
    /// Edit form, when an item is being edited
    pub edit: EditSession,
    pub status: Status,
}

impl SyncState {
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Row actions (edit/delete) are offered only when nothing else is going on
    pub fn row_actions_enabled(&self) -> bool {
        !self.status.busy && !self.edit.is_editing()
    }

    /// The edit target must stay inside the collection
    fn drop_stale_edit(&mut self) {
        if let Some(id) = self.edit.target() {
            if !self.items.iter().any(|item| &item.id == id) {
                log::info!("[SYNC] Edit target {} vanished, leaving edit mode", id);
                self.edit = EditSession::Idle;
            }
        }
    }
}

type Observer = Box<dyn Fn(&SyncState)>;

/// Drives [`SyncState`] against a [`RemoteCollection`]
///
/// State is only borrowed between awaits, never across one.
pub struct CollectionSynchronizer<R> {
    remote: R,
    state: RefCell<SyncState>,
    observer: Option<Observer>,
}

impl<R: RemoteCollection> CollectionSynchronizer<R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            state: RefCell::new(SyncState::default()),
            observer: None,
        }
    }

    /// Called with a snapshot after every state transition
    pub fn with_observer(mut self, observer: impl Fn(&SyncState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn state(&self) -> SyncState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().status.busy
    }

    pub fn is_editing(&self) -> bool {
        self.state.borrow().edit.is_editing()
    }

    // ========================
    // Transitions
    // ========================

    fn transition(&self, apply: impl FnOnce(&mut SyncState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        if let Some(observer) = &self.observer {
            observer(&snapshot);
        }
    }

    fn ensure_not_busy(&self) -> Result<(), SyncError> {
        if self.is_busy() {
            log::warn!("[SYNC] Rejected: request already in flight");
            return Err(SyncError::Busy);
        }
        Ok(())
    }

    /// Local rejection: report, no busy change, no remote call
    fn reject(&self, message: &str) -> Result<(), SyncError> {
        log::warn!("[SYNC] Validation failed: {}", message);
        self.transition(|s| s.status.error = Some(message.to_string()));
        Err(SyncError::Validation(message.to_string()))
    }

    fn begin_request(&self) {
        self.transition(|s| {
            s.status.busy = true;
            s.status.error = None;
        });
    }

    /// Apply a resolution; busy is cleared in the same transition
    fn resolve(&self, apply: impl FnOnce(&mut SyncState)) {
        self.transition(|s| {
            apply(s);
            s.status.busy = false;
        });
    }

    fn fail(
        &self,
        message: String,
        source: RemoteError,
        apply: impl FnOnce(&mut SyncState),
    ) -> Result<(), SyncError> {
        log::warn!("[SYNC] {}", message);
        let shown = message.clone();
        self.resolve(|s| {
            apply(s);
            s.status.error = Some(shown);
        });
        Err(SyncError::Remote { message, source })
    }

    // ========================
    // Remote Operations
    // ========================

    /// Replace the collection with the server's list
    ///
    /// On failure the collection is emptied so no stale list sits next to the error.
    pub async fn load(&self) -> Result<(), SyncError> {
        self.ensure_not_busy()?;
        self.begin_request();

        match self.remote.list().await {
            Ok(items) => {
                log::info!("[SYNC] Loaded {} items", items.len());
                self.resolve(|s| {
                    s.items = items;
                    s.drop_stale_edit();
                });
                Ok(())
            }
            Err(source) => {
                let message = format!(
                    "Failed to fetch items: {}. Is the backend running at {}?",
                    source.reason(),
                    self.remote.endpoint()
                );
                self.fail(message, source, |s| {
                    s.items.clear();
                    s.drop_stale_edit();
                })
            }
        }
    }

    /// Create an item and append the server's copy
    pub async fn create(&self, fields: ItemFields) -> Result<(), SyncError> {
        self.ensure_not_busy()?;
        if !fields.is_complete() {
            return self.reject(CREATE_EMPTY);
        }
        self.begin_request();

        match self.remote.create(&fields).await {
            Ok(item) => {
                log::info!("[SYNC] Created item {}", item.id);
                self.resolve(|s| {
                    s.items.push(item);
                    s.draft.clear();
                });
                Ok(())
            }
            Err(source) => {
                let message = format!("Failed to add item: {}", source.reason());
                self.fail(message, source, |_| {})
            }
        }
    }

    /// Send the edit draft; on success the item is replaced in place and edit mode ends
    ///
    /// On failure the edit session stays open for a retry or cancel.
    pub async fn update(&self) -> Result<(), SyncError> {
        self.ensure_not_busy()?;
        let target = {
            let state = self.state.borrow();
            state.edit.target().cloned().zip(state.edit.fields())
        };
        let Some((id, fields)) = target else {
            return self.reject(UPDATE_EMPTY);
        };
        if !fields.is_complete() {
            return self.reject(UPDATE_EMPTY);
        }
        self.begin_request();

        match self.remote.update(&id, &fields).await {
            Ok(updated) => {
                log::info!("[SYNC] Updated item {}", id);
                self.resolve(|s| {
                    if let Some(slot) = s.items.iter_mut().find(|item| item.id == id) {
                        *slot = updated;
                    }
                    s.edit = EditSession::Idle;
                });
                Ok(())
            }
            Err(source) => {
                let message = format!("Failed to update item: {}", source.reason());
                self.fail(message, source, |_| {})
            }
        }
    }

    /// Delete an item; the collection is untouched on failure
    pub async fn delete(&self, id: &ItemId) -> Result<(), SyncError> {
        self.ensure_not_busy()?;
        if self.is_editing() {
            log::warn!("[SYNC] Rejected delete of {}: edit in progress", id);
            return Err(SyncError::EditInProgress);
        }
        self.begin_request();

        match self.remote.delete(id).await {
            Ok(()) => {
                log::info!("[SYNC] Deleted item {}", id);
                self.resolve(|s| s.items.retain(|item| &item.id != id));
                Ok(())
            }
            Err(source) => {
                let message = format!("Failed to delete item: {}", source.reason());
                self.fail(message, source, |_| {})
            }
        }
    }

    /// The form's submit action: update in edit mode, create otherwise
    pub async fn submit(&self) -> Result<(), SyncError> {
        if self.is_editing() {
            return self.update().await;
        }
        let fields = self.state.borrow().draft.fields();
        self.create(fields).await
    }

    // ========================
    // Local Edits
    // ========================

    /// Enter edit mode for `id`, replacing any previous edit draft
    pub fn begin_edit(&self, id: &ItemId) -> Result<(), SyncError> {
        let session = self
            .state
            .borrow()
            .item(id)
            .map(EditSession::of)
            .ok_or_else(|| SyncError::UnknownItem(id.clone()))?;
        log::debug!("[SYNC] Editing item {}", id);
        self.transition(|s| s.edit = session);
        Ok(())
    }

    /// Leave edit mode without touching the collection
    pub fn cancel_edit(&self) {
        log::debug!("[SYNC] Edit cancelled");
        self.transition(|s| s.edit = EditSession::Idle);
    }

    pub fn set_draft_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.transition(|s| s.draft.name = name);
    }

    pub fn set_draft_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.transition(|s| s.draft.description = description);
    }

    /// No-op outside edit mode
    pub fn set_edit_name(&self, value: impl Into<String>) {
        let value = value.into();
        self.transition(|s| {
            if let EditSession::Editing { name, .. } = &mut s.edit {
                *name = value;
            }
        });
    }

    /// No-op outside edit mode
    pub fn set_edit_description(&self, value: impl Into<String>) {
        let value = value.into();
        self.transition(|s| {
            if let EditSession::Editing { description, .. } = &mut s.edit {
                *description = value;
            }
        });
    }
}
