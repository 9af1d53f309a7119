use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque, server-assigned identifier for a file or folder.
///
/// The service emits document ids as strings, but older records and test fixtures
/// use plain integers. Both forms are accepted and normalized to a string.
//
// // 服务端分配的不透明标识符。
// // 服务端通常返回字符串，但旧记录与测试数据可能使用整数，两者都会被规范化为字符串。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

/// Errors that can occur while parsing an `ItemId` from user input.
#[derive(Debug, thiserror::Error)]
pub enum ItemIdError {
    #[error("Item id cannot be empty")]
    Empty,
    #[error("Item id cannot contain '/' or whitespace: {0}")]
    InvalidCharacter(String),
}

impl ItemId {
    /// 以字符串切片形式返回 id。
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 允许 `ItemId::from(42)`
impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// 允许 `println!("{:<26}", id)`，宽度与对齐参数有效
impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// 允许 `ItemId::from_str("...")`
///
/// This is the parser for ids typed by a user, so separators and whitespace are
/// rejected. Ids coming from the service go through `Deserialize` and are kept verbatim.
impl FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ItemIdError::Empty);
        }
        if s.contains('/') || s.chars().any(char::is_whitespace) {
            return Err(ItemIdError::InvalidCharacter(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ItemIdVisitor;

        impl<'de> serde::de::Visitor<'de> for ItemIdVisitor {
            type Value = ItemId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer item id")
            }

            // 服务端的 id 不做字符限制，只要求非空
            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if value.is_empty() {
                    return Err(E::custom(ItemIdError::Empty));
                }
                Ok(ItemId(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ItemId::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ItemId(value.to_string()))
            }
        }

        deserializer.deserialize_any(ItemIdVisitor)
    }
}
