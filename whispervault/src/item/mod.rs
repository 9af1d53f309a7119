pub mod id;
pub mod kind;

pub use id::{ItemId, ItemIdError};
pub use kind::{ItemKind, ItemKindParseError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The attribute contract shared by files and folders, as returned by the service.
///
/// Only the fields the client reasons about are typed. Everything else the service
/// sends (size, owner, child count, ...) is kept verbatim in `extra`.
//
// // 文件与文件夹共享的属性。客户端只解析它需要的字段，其余字段原样保存在 `extra` 中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Server-assigned identifier, stable for the item's lifetime.
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,

    /// Display name; the only field searched by the view functions.
    pub name: String,

    #[serde(default)]
    pub is_favorite: bool,

    /// True only after the service confirmed an encryption and before it confirmed a decryption.
    #[serde(default)]
    pub is_encrypted: bool,

    /// Maintained by the service. `None` when the item has never been opened.
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,

    /// Opaque passthrough fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Creates an entry with no flags set and no passthrough fields.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_favorite: false,
            is_encrypted: false,
            last_accessed: None,
            extra: Map::new(),
        }
    }
}

/// A file or a folder.
///
/// Presentation code treats both uniformly through the accessors below; remote calls
/// dispatch on the variant via [`Item::kind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    File(Entry),
    Folder(Entry),
}

impl Item {
    pub fn new(kind: ItemKind, entry: Entry) -> Self {
        match kind {
            ItemKind::File => Item::File(entry),
            ItemKind::Folder => Item::Folder(entry),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::File(_) => ItemKind::File,
            Item::Folder(_) => ItemKind::Folder,
        }
    }

    pub fn entry(&self) -> &Entry {
        match self {
            Item::File(entry) | Item::Folder(entry) => entry,
        }
    }

    pub fn entry_mut(&mut self) -> &mut Entry {
        match self {
            Item::File(entry) | Item::Folder(entry) => entry,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.entry().id
    }

    pub fn name(&self) -> &str {
        &self.entry().name
    }

    pub fn is_favorite(&self) -> bool {
        self.entry().is_favorite
    }

    pub fn is_encrypted(&self) -> bool {
        self.entry().is_encrypted
    }

    pub fn last_accessed(&self) -> Option<DateTime<Utc>> {
        self.entry().last_accessed
    }

    /// Case-insensitive substring match on the name. `needle` must already be lowercased.
    pub(crate) fn name_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.name().to_lowercase().contains(needle)
    }
}
