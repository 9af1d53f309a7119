//! Pure projections of a [`Collection`] for the four presentations.
//!
//! Every view applies its presentation filter, then its sort rule, then the
//! case-insensitive name search. Nothing is cached; views are cheap to recompute.

use std::fmt;
use std::str::FromStr;
use super::Collection;
use crate::item::Item;

/// Which list the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    #[default]
    All,
    Favorites,
    Recent,
    Vault,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown view '{0}', expected one of: all, favorites, recent, vault")]
pub struct PresentationParseError(String);

impl Presentation {
    /// Derives this presentation's view of `collection` filtered by `query`.
    pub fn view<'a>(self, collection: &'a Collection, query: &str) -> Vec<&'a Item> {
        match self {
            Presentation::All => all_view(collection, query),
            Presentation::Favorites => favorites_view(collection, query),
            Presentation::Recent => recent_view(collection, query),
            Presentation::Vault => vault_view(collection, query),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Presentation::All => "all",
            Presentation::Favorites => "favorites",
            Presentation::Recent => "recent",
            Presentation::Vault => "vault",
        }
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Presentation {
    type Err = PresentationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Presentation::All),
            "favorites" | "fav" => Ok(Presentation::Favorites),
            "recent" => Ok(Presentation::Recent),
            "vault" => Ok(Presentation::Vault),
            other => Err(PresentationParseError(other.to_string())),
        }
    }
}

/// Every item, in merge order.
pub fn all_view<'a>(collection: &'a Collection, query: &str) -> Vec<&'a Item> {
    search(collection.iter(), query)
}

/// Items marked as favorite, in merge order.
pub fn favorites_view<'a>(collection: &'a Collection, query: &str) -> Vec<&'a Item> {
    search(collection.iter().filter(|item| item.is_favorite()), query)
}

/// Every item, most recently accessed first.
///
/// The sort is stable, so items with equal timestamps keep merge order (folders before
/// files). Items that were never accessed sort last.
pub fn recent_view<'a>(collection: &'a Collection, query: &str) -> Vec<&'a Item> {
    let mut items: Vec<&Item> = collection.iter().collect();
    // Option<DateTime> 的排序中 None 最小，因此倒序后自然排在最后
    items.sort_by(|a, b| b.last_accessed().cmp(&a.last_accessed()));
    search(items.into_iter(), query)
}

/// Items currently locked in the vault, in merge order.
pub fn vault_view<'a>(collection: &'a Collection, query: &str) -> Vec<&'a Item> {
    search(collection.iter().filter(|item| item.is_encrypted()), query)
}

fn search<'a>(items: impl Iterator<Item = &'a Item>, query: &str) -> Vec<&'a Item> {
    let needle = query.to_lowercase();
    items.filter(|item| item.name_contains(&needle)).collect()
}
