//! Client core for a remote document service with favorites, recents and an
//! encrypted vault.
//!
//! The crate is UI-independent: [`client::Client`] exposes every user action as a
//! method, the [`gateway`] module talks to the service, and the [`collection`] module
//! derives the four presentations from one shared snapshot.

pub mod auth;
pub mod client;
pub mod collection;
pub mod common;
pub mod config;
pub mod gateway;
pub mod item;
pub mod session;
pub mod store;
pub mod utils;

#[cfg(test)]
mod tests;

pub use client::{Client, ClientError, Notice, NoticeLevel};
pub use collection::{Collection, Presentation};
pub use gateway::{GatewayError, HttpGateway, ItemGateway, MemoryGateway, ShareLink};
pub use item::{Entry, Item, ItemId, ItemKind};
pub use session::{Session, SessionError, VaultAction};
