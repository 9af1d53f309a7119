//! The client-side cache of server state.
//!
//! The store never edits items itself. After any mutation it pulls both listings again
//! and swaps the whole collection, so what the user sees is always what the service has.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::collection::Collection;
use crate::gateway::{GatewayError, ItemGateway};
use crate::item::ItemKind;

/// Owns the current [`Collection`] and replaces it wholesale on refresh.
#[derive(Debug, Default)]
pub struct ItemStore {
    snapshot: Arc<Collection>,
    generation: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current collection. Snapshots are immutable; a refresh installs a new one.
    pub fn snapshot(&self) -> Arc<Collection> {
        Arc::clone(&self.snapshot)
    }

    pub fn collection(&self) -> &Collection {
        &self.snapshot
    }

    /// How many refreshes have been installed. Zero means nothing was ever loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loaded(&self) -> bool {
        self.generation > 0
    }

    /// Fetches folders and files concurrently and installs the merged result.
    ///
    /// Nothing is installed unless both listings succeed; on error the previous
    /// snapshot stays in place.
    pub async fn refresh<G>(&mut self, gateway: &G) -> Result<(), GatewayError>
    where
        G: ItemGateway + ?Sized,
    {
        let result = tokio::try_join!(gateway.list(ItemKind::Folder), gateway.list(ItemKind::File));

        match result {
            Ok((folders, files)) => {
                let collection = Collection::merge(folders, files);
                debug!(
                    "Installed collection #{} with {} item(s)",
                    self.generation + 1,
                    collection.len()
                );
                self.snapshot = Arc::new(collection);
                self.generation += 1;
                Ok(())
            }
            Err(e) => {
                warn!("Refresh failed, keeping last known state: {}", e);
                Err(e)
            }
        }
    }
}
