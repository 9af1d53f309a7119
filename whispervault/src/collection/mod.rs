pub mod view;

pub use view::{all_view, favorites_view, recent_view, vault_view, Presentation};

use crate::item::{Item, ItemId, ItemKind};
use std::collections::HashSet;
use tracing::warn;

/// An immutable snapshot of every item the service returned, unique by id.
///
/// The order is the merge order: all folders (in server order) followed by all
/// files (in server order). The recency view relies on this order to break ties.
//
// // 服务端状态的不可变快照，按 id 唯一。
// // 顺序为合并顺序：先文件夹后文件，最近访问视图依赖此顺序处理时间戳相同的情况。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    /// Merges the folder and file listings into one collection.
    ///
    /// Ids are unique across kinds. Should the service ever return the same id twice,
    /// the first occurrence is kept and the duplicate is dropped with a warning.
    pub fn merge(folders: Vec<Item>, files: Vec<Item>) -> Self {
        let mut seen = HashSet::with_capacity(folders.len() + files.len());
        let mut items = Vec::with_capacity(folders.len() + files.len());

        for item in folders.into_iter().chain(files) {
            if seen.insert(item.id().clone()) {
                items.push(item);
            } else {
                warn!(
                    "Dropping duplicate {} '{}' with id {}",
                    item.kind(),
                    item.name(),
                    item.id()
                );
            }
        }

        Self { items }
    }

    /// Builds a collection from an already merged sequence, applying the same id rule.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self::merge(items, Vec::new())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn count_kind(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind() == kind).count()
    }
}
