//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use item_sync::{CollectionSynchronizer, HttpCollection, SyncError, SyncState};

pub type Synchronizer = CollectionSynchronizer<HttpCollection>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Latest synchronizer snapshot - read
    pub state: ReadSignal<SyncState>,
    /// The synchronizer itself (not `Send`, kept in local storage)
    sync: StoredValue<Rc<Synchronizer>, LocalStorage>,
}

impl AppContext {
    /// Wire the synchronizer's transitions into `state`
    pub fn new(remote: HttpCollection) -> Self {
        let (state, set_state) = signal(SyncState::default());
        let sync = CollectionSynchronizer::new(remote).with_observer(move |s| set_state.set(s.clone()));
        Self {
            state,
            sync: StoredValue::new_local(Rc::new(sync)),
        }
    }

    /// Run a remote operation in the background
    ///
    /// Failures already show up in `state.status`; the result is only logged.
    pub fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<Synchronizer>) -> Fut + 'static,
        Fut: Future<Output = Result<(), SyncError>> + 'static,
    {
        let sync = self.sync.get_value();
        spawn_local(async move {
            if let Err(e) = op(sync).await {
                log::debug!("[APP] Operation did not apply: {}", e);
            }
        });
    }

    /// Apply a local (no network) change
    pub fn with_sync<T>(&self, f: impl FnOnce(&Synchronizer) -> T) -> T {
        self.sync.with_value(|sync| f(sync))
    }

    pub fn busy(&self) -> bool {
        self.state.with(|s| s.status.busy)
    }

    pub fn editing(&self) -> bool {
        self.state.with(|s| s.edit.is_editing())
    }
}
