//! An in-process stand-in for the document service.
//!
//! `MemoryGateway` keeps items in memory and enforces the same rules the service does:
//! empty keys are rejected, a decrypt only succeeds with the key used to encrypt, and
//! deleted items go to a trash from which they can be restored, and only files can be
//! shared or downloaded. Keys are never stored, only their SHA-256 fingerprint.
//!
//! Clones share state, so a test can keep a handle while a client owns another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use super::{GatewayError, ItemGateway, ShareLink};
use crate::common::EncryptionAlgorithm;
use crate::item::{Entry, Item, ItemId, ItemKind};

/// A request received by the [`MemoryGateway`], recorded in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ItemKind),
    ToggleFavorite(ItemKind, ItemId),
    Delete(ItemKind, ItemId),
    Restore(ItemKind, ItemId),
    Rename(ItemKind, ItemId, String),
    CreateFolder(String),
    Encrypt(ItemKind, ItemId, EncryptionAlgorithm),
    Decrypt(ItemKind, ItemId),
    Share(ItemId),
    Download(ItemId),
}

impl Call {
    /// Whether this call changes server state.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::List(_) | Call::Download(_))
    }
}

#[derive(Debug)]
struct Lock {
    fingerprint: String,
    algorithm: EncryptionAlgorithm,
}

#[derive(Debug, Default)]
struct State {
    folders: Vec<Entry>,
    files: Vec<Entry>,
    trash: Vec<(ItemKind, Entry)>,
    locks: HashMap<ItemId, Lock>,
    contents: HashMap<ItemId, Vec<u8>>,
    shares: Vec<ShareLink>,
    calls: Vec<Call>,
    failures: Vec<GatewayError>,
    list_failure: Option<GatewayError>,
    kind_failures: Vec<(ItemKind, GatewayError)>,
    offline: bool,
    next_id: u64,
}

impl State {
    fn entries_mut(&mut self, kind: ItemKind) -> &mut Vec<Entry> {
        match kind {
            ItemKind::File => &mut self.files,
            ItemKind::Folder => &mut self.folders,
        }
    }

    fn find_mut(&mut self, kind: ItemKind, id: &ItemId) -> Result<&mut Entry, GatewayError> {
        self.entries_mut(kind)
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("{} {}", kind, id)))
    }

    /// Records the call and returns the failure it should produce, if any.
    fn begin(&mut self, call: Call) -> Result<(), GatewayError> {
        self.calls.push(call);
        if self.offline {
            return Err(GatewayError::Network("Service unreachable".to_string()));
        }
        if !self.failures.is_empty() {
            return Err(self.failures.remove(0));
        }
        Ok(())
    }
}

/// In-memory implementation of [`ItemGateway`].
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    state: Arc<Mutex<State>>,
}

fn fingerprint(key: &SecretString) -> String {
    hex::encode(Sha256::digest(key.expose_secret().as_bytes()))
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the service with an item, flags stored as given. Use
    /// [`MemoryGateway::seed_locked`] for an item that should be decryptable.
    pub fn seed(&self, item: Item) {
        let mut state = self.lock();
        match item {
            Item::File(entry) => state.files.push(entry),
            Item::Folder(entry) => state.folders.push(entry),
        }
    }

    /// Seeds an item that is already locked with `key`.
    pub fn seed_locked(&self, mut item: Item, key: &str, algorithm: EncryptionAlgorithm) {
        item.entry_mut().is_encrypted = true;
        let id = item.id().clone();
        self.seed(item);
        self.lock().locks.insert(
            id,
            Lock {
                fingerprint: fingerprint(&SecretString::from(key.to_string())),
                algorithm,
            },
        );
    }

    /// Sets the bytes a download of file `id` returns. Files without content download empty.
    pub fn seed_content(&self, id: ItemId, content: impl Into<Vec<u8>>) {
        self.lock().contents.insert(id, content.into());
    }

    /// Share links created so far, oldest first.
    pub fn shares(&self) -> Vec<ShareLink> {
        self.lock().shares.clone()
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Only the state-changing calls received so far.
    pub fn mutations(&self) -> Vec<Call> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Makes the next call (of any operation) fail with `error`. Queued failures are
    /// consumed in order.
    pub fn fail_next(&self, error: GatewayError) {
        self.lock().failures.push(error);
    }

    /// Makes every `list` call fail with `error` until called again with `None`.
    /// Mutations keep working, which lets tests separate a failed action from a failed refresh.
    pub fn fail_listing(&self, error: Option<GatewayError>) {
        self.lock().list_failure = error;
    }

    /// Makes the next `list` of `kind` fail with `error`. Listings of the other kind
    /// are unaffected.
    pub fn fail_next_list(&self, kind: ItemKind, error: GatewayError) {
        self.lock().kind_failures.push((kind, error));
    }

    /// While offline every call fails with [`GatewayError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// The current server-side state of one item, if it exists (outside the trash).
    pub fn item(&self, id: &ItemId) -> Option<Item> {
        let state = self.lock();
        state
            .folders
            .iter()
            .find(|e| &e.id == id)
            .map(|e| Item::Folder(e.clone()))
            .or_else(|| {
                state
                    .files
                    .iter()
                    .find(|e| &e.id == id)
                    .map(|e| Item::File(e.clone()))
            })
    }

    /// The algorithm an item was locked with.
    pub fn algorithm_of(&self, id: &ItemId) -> Option<EncryptionAlgorithm> {
        self.lock().locks.get(id).map(|lock| lock.algorithm)
    }

    pub fn trash_len(&self) -> usize {
        self.lock().trash.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ItemGateway for MemoryGateway {
    async fn list(&self, kind: ItemKind) -> Result<Vec<Item>, GatewayError> {
        let mut state = self.lock();
        state.begin(Call::List(kind))?;
        if let Some(error) = &state.list_failure {
            return Err(error.clone());
        }
        if let Some(position) = state.kind_failures.iter().position(|(k, _)| *k == kind) {
            let (_, error) = state.kind_failures.remove(position);
            return Err(error);
        }
        Ok(state
            .entries_mut(kind)
            .iter()
            .cloned()
            .map(|entry| Item::new(kind, entry))
            .collect())
    }

    async fn toggle_favorite(&self, kind: ItemKind, id: &ItemId) -> Result<Item, GatewayError> {
        let mut state = self.lock();
        state.begin(Call::ToggleFavorite(kind, id.clone()))?;
        let entry = state.find_mut(kind, id)?;
        entry.is_favorite = !entry.is_favorite;
        Ok(Item::new(kind, entry.clone()))
    }

    async fn delete(&self, kind: ItemKind, id: &ItemId) -> Result<(), GatewayError> {
        let mut state = self.lock();
        state.begin(Call::Delete(kind, id.clone()))?;
        let entries = state.entries_mut(kind);
        let position = entries
            .iter()
            .position(|entry| &entry.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("{} {}", kind, id)))?;
        let entry = entries.remove(position);
        state.trash.push((kind, entry));
        Ok(())
    }

    async fn restore(&self, kind: ItemKind, id: &ItemId) -> Result<(), GatewayError> {
        let mut state = self.lock();
        state.begin(Call::Restore(kind, id.clone()))?;
        let position = state
            .trash
            .iter()
            .position(|(k, entry)| *k == kind && &entry.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("{} {} is not in the trash", kind, id)))?;
        let (_, entry) = state.trash.remove(position);
        state.entries_mut(kind).push(entry);
        Ok(())
    }

    async fn rename(&self, kind: ItemKind, id: &ItemId, name: &str) -> Result<Item, GatewayError> {
        let mut state = self.lock();
        state.begin(Call::Rename(kind, id.clone(), name.to_string()))?;
        if name.trim().is_empty() {
            return Err(GatewayError::Validation("Name cannot be empty".to_string()));
        }
        let entry = state.find_mut(kind, id)?;
        entry.name = name.trim().to_string();
        Ok(Item::new(kind, entry.clone()))
    }

    async fn create_folder(&self, name: &str) -> Result<Item, GatewayError> {
        let mut state = self.lock();
        state.begin(Call::CreateFolder(name.to_string()))?;
        if name.trim().is_empty() {
            return Err(GatewayError::Validation("Name cannot be empty".to_string()));
        }
        // 生成的 id 从 1000 开始，避免与测试数据冲突
        state.next_id += 1;
        let id = ItemId::from(1000 + state.next_id);
        let entry = Entry::new(id, name.trim());
        state.folders.push(entry.clone());
        Ok(Item::Folder(entry))
    }

    async fn encrypt(
        &self,
        kind: ItemKind,
        id: &ItemId,
        key: &SecretString,
        algorithm: EncryptionAlgorithm,
    ) -> Result<(), GatewayError> {
        let mut state = self.lock();
        state.begin(Call::Encrypt(kind, id.clone(), algorithm))?;
        if key.expose_secret().is_empty() {
            return Err(GatewayError::Validation("Encryption key cannot be empty".to_string()));
        }
        let entry = state.find_mut(kind, id)?;
        if entry.is_encrypted {
            return Err(GatewayError::Validation("Item is already encrypted".to_string()));
        }
        entry.is_encrypted = true;
        state.locks.insert(
            id.clone(),
            Lock {
                fingerprint: fingerprint(key),
                algorithm,
            },
        );
        Ok(())
    }

    async fn decrypt(&self, kind: ItemKind, id: &ItemId, key: &SecretString) -> Result<(), GatewayError> {
        let mut state = self.lock();
        state.begin(Call::Decrypt(kind, id.clone()))?;
        if key.expose_secret().is_empty() {
            return Err(GatewayError::Validation("Encryption key cannot be empty".to_string()));
        }
        let entry = state.find_mut(kind, id)?;
        if !entry.is_encrypted {
            return Err(GatewayError::Validation("Item is not encrypted".to_string()));
        }
        let matches = state
            .locks
            .get(id)
            .is_some_and(|lock| lock.fingerprint == fingerprint(key));
        if !matches {
            return Err(GatewayError::WrongKey);
        }
        state.locks.remove(id);
        state.find_mut(kind, id)?.is_encrypted = false;
        Ok(())
    }

    async fn share(&self, id: &ItemId, expires_at: Option<DateTime<Utc>>) -> Result<ShareLink, GatewayError> {
        let mut state = self.lock();
        state.begin(Call::Share(id.clone()))?;
        state.find_mut(ItemKind::File, id)?;
        let link = ShareLink {
            url: format!("memory://share/{}/{}", id, state.shares.len() + 1),
            expires_at,
        };
        state.shares.push(link.clone());
        Ok(link)
    }

    async fn download(&self, id: &ItemId) -> Result<Vec<u8>, GatewayError> {
        let mut state = self.lock();
        state.begin(Call::Download(id.clone()))?;
        state.find_mut(ItemKind::File, id)?;
        Ok(state.contents.get(id).cloned().unwrap_or_default())
    }
}
