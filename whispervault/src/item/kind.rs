use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// The discriminant of an [`Item`](super::Item).
///
/// Every kind-specific remote call (favorite, delete, encrypt, ...) is routed through
/// [`ItemKind::collection_path`], so adding a kind forces every dispatch site to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown item kind '{0}', expected 'file' or 'folder'")]
pub struct ItemKindParseError(String);

impl ItemKind {
    /// The REST collection serving this kind, e.g. `files`.
    pub fn collection_path(self) -> &'static str {
        match self {
            ItemKind::File => "files",
            ItemKind::Folder => "folders",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::File => "file",
            ItemKind::Folder => "folder",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ItemKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(ItemKind::File),
            "folder" => Ok(ItemKind::Folder),
            other => Err(ItemKindParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        assert_eq!(ItemKind::File.collection_path(), "files");
        assert_eq!(ItemKind::Folder.collection_path(), "folders");
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Folder".parse::<ItemKind>().unwrap(), ItemKind::Folder);
        assert!("link".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_display_pads_to_width() {
        assert_eq!(format!("[{:<6}]", ItemKind::File), "[file  ]");
    }
}
