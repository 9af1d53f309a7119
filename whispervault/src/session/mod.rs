//! Selection and menu state.
//!
//! At most one item is ever the target of a contextual action. The state machine is
//! independent of any UI: every transition is a plain method.
//!
//! ```text
//! Closed ──open_menu──▶ MenuOpen(item) ──open_dialog──▶ DialogOpen(item, draft)
//!   ▲                        │                               │
//!   └──── close_menu / action done ◀──── cancel / submit done┘
//! ```

pub mod draft;

pub use draft::{VaultAction, VaultDraft};

use crate::item::Item;

/// Errors for transitions that are not legal from the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No item menu is open")]
    MenuNotOpen,

    #[error("The vault dialog is not open")]
    DialogNotOpen,
}

/// The contextual-action state of one UI session.
#[derive(Debug, Default)]
pub enum Session {
    #[default]
    Closed,
    MenuOpen(Item),
    DialogOpen { item: Item, draft: VaultDraft },
}

impl Session {
    /// Opens the menu for `item`, replacing whatever was open before.
    ///
    /// A replaced dialog's draft is dropped (and its key zeroized).
    pub fn open_menu(&mut self, item: Item) {
        *self = Session::MenuOpen(item);
    }

    /// Dismisses whatever is open. Always ends in `Closed`.
    pub fn close_menu(&mut self) {
        *self = Session::Closed;
    }

    /// `MenuOpen(item)` → `DialogOpen(item, empty draft)`.
    pub fn open_dialog(&mut self) -> Result<VaultAction, SessionError> {
        match std::mem::take(self) {
            Session::MenuOpen(item) => {
                let action = VaultAction::for_item(&item);
                *self = Session::DialogOpen {
                    item,
                    draft: VaultDraft::new(),
                };
                Ok(action)
            }
            other => {
                *self = other;
                Err(SessionError::MenuNotOpen)
            }
        }
    }

    /// `DialogOpen` → `Closed`, discarding the draft.
    pub fn cancel_dialog(&mut self) -> Result<(), SessionError> {
        match self {
            Session::DialogOpen { .. } => {
                *self = Session::Closed;
                Ok(())
            }
            _ => Err(SessionError::DialogNotOpen),
        }
    }

    /// The item targeted by the open menu or dialog.
    pub fn target(&self) -> Option<&Item> {
        match self {
            Session::Closed => None,
            Session::MenuOpen(item) | Session::DialogOpen { item, .. } => Some(item),
        }
    }

    /// The target of an open menu (not a dialog).
    pub fn menu_target(&self) -> Result<&Item, SessionError> {
        match self {
            Session::MenuOpen(item) => Ok(item),
            _ => Err(SessionError::MenuNotOpen),
        }
    }

    pub fn dialog(&self) -> Result<(&Item, &VaultDraft), SessionError> {
        match self {
            Session::DialogOpen { item, draft } => Ok((item, draft)),
            _ => Err(SessionError::DialogNotOpen),
        }
    }

    pub fn draft_mut(&mut self) -> Result<&mut VaultDraft, SessionError> {
        match self {
            Session::DialogOpen { draft, .. } => Ok(draft),
            _ => Err(SessionError::DialogNotOpen),
        }
    }

    /// The action a submit would perform, when the dialog is open.
    pub fn vault_action(&self) -> Option<VaultAction> {
        match self {
            Session::DialogOpen { item, .. } => Some(VaultAction::for_item(item)),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Session::Closed)
    }

    /// Short state name for prompts and logs.
    pub fn phase(&self) -> &'static str {
        match self {
            Session::Closed => "closed",
            Session::MenuOpen(_) => "menu",
            Session::DialogOpen { .. } => "dialog",
        }
    }
}
