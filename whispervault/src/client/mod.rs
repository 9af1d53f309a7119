//! The item view model.
//!
//! [`Client`] ties the pieces together: it owns the gateway, the [`ItemStore`], the
//! [`Session`], the search query and a queue of [`Notice`]s. Every operation the UI
//! can trigger is a method here, so the whole interaction can be driven and tested
//! without a rendered interface.
//!
//! Failure policy: nothing is retried. A failed operation produces exactly one error
//! notice, the session returns to `Closed`, and the last good collection stays visible.

mod menu;
pub mod notice;
mod transfer;
mod vault;

pub use notice::{Notice, NoticeLevel};

use std::sync::Arc;
use tracing::{info, warn};

use crate::collection::{Collection, Presentation};
use crate::gateway::{GatewayError, ItemGateway};
use crate::item::{Item, ItemId};
use crate::session::{Session, SessionError, VaultAction};
use crate::store::ItemStore;

/// Errors returned by [`Client`] operations.
///
/// Each is also reported as a notice, so UIs that only display notices may ignore it.
//
// // Client 操作返回的错误。每个错误同时也会作为 notice 推送。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The requested transition is not legal in the current session state.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The id is not part of the current collection.
    #[error("No item with id '{0}' in the current view")]
    UnknownItem(ItemId),

    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The dialog was submitted with the wrong action for the item's state.
    #[error("Cannot {requested:?} an item that needs {required:?}")]
    ActionMismatch {
        requested: VaultAction,
        required: VaultAction,
    },

    /// The service rejected or never received the request.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A downloaded file could not be written locally.
    #[error("I/O error: {0}")]
    Io(String),
}

/// View model over one remote account.
pub struct Client<G: ItemGateway> {
    gateway: G,
    store: ItemStore,
    session: Session,
    query: String,
    last_deleted: Option<Item>,
    notices: Vec<Notice>,
}

impl<G: ItemGateway> Client<G> {
    /// Creates a client with an empty collection. Call [`Client::refresh`] to load it.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: ItemStore::new(),
            session: Session::Closed,
            query: String::new(),
            last_deleted: None,
            notices: Vec::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The current immutable snapshot.
    pub fn collection(&self) -> Arc<Collection> {
        self.store.snapshot()
    }

    pub fn search_query(&self) -> &str {
        &self.query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The items `presentation` shows for the current search query.
    pub fn view(&self, presentation: Presentation) -> Vec<&Item> {
        presentation.view(self.store.collection(), &self.query)
    }

    /// The last item deleted through this client, available for [`Client::undo_delete`].
    pub fn last_deleted(&self) -> Option<&Item> {
        self.last_deleted.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Removes and returns all queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Re-fetches both kinds and installs the result. On failure the previous
    /// collection stays in place.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.store.refresh(&self.gateway).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notify_error("Failed to fetch items");
                Err(e.into())
            }
        }
    }

    /// Opens the contextual menu for the item with `id`.
    ///
    /// Any menu or dialog that was open is replaced. An unknown id leaves the session untouched.
    pub fn open_menu(&mut self, id: &ItemId) -> Result<&Item, ClientError> {
        let item = self
            .store
            .collection()
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::UnknownItem(id.clone()))?;
        self.session.open_menu(item);
        self.session
            .target()
            .ok_or(ClientError::Session(SessionError::MenuNotOpen))
    }

    /// Dismisses the open menu or dialog without doing anything.
    pub fn close_menu(&mut self) {
        self.session.close_menu();
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::success(message));
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::error(message));
    }

    /// Common tail of every issued mutation: close the session, re-sync with the
    /// service, and report the outcome as one notice.
    async fn finish_mutation<T>(
        &mut self,
        result: Result<T, GatewayError>,
        success: &str,
        failure: &str,
    ) -> Result<T, ClientError> {
        self.session.close_menu();
        let refreshed = self.store.refresh(&self.gateway).await;

        match result {
            Ok(value) => {
                info!("{}", success);
                self.notify_success(success);
                if refreshed.is_err() {
                    self.notify_error("Failed to fetch items");
                }
                Ok(value)
            }
            Err(e) => {
                // 刷新失败只记录日志，避免同一次失败产生两条提示
                warn!("{}: {}", failure, e);
                self.notify_error(failure);
                Err(e.into())
            }
        }
    }
}
