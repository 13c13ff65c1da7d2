//! The global game mode toggle.
//!
//! `Enabled ⇄ PendingDeactivation ⇄ Disabled`. Disabling needs an explicit
//! confirmation because it discards progress; enabling is immediate.

use serde::{Deserialize, Serialize};

/// Whether games are playable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Games render and accept answers.
    #[default]
    Enabled,
    /// Deactivation requested, waiting for confirmation. Games stay playable.
    PendingDeactivation,
    /// Games show post-game content only.
    Disabled,
}

/// What a mode request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Nothing changed.
    Unchanged,
    /// Deactivation is pending; the host must ask for confirmation.
    AwaitingConfirmation,
    /// Games are now disabled.
    Deactivated,
    /// Games are enabled again; all sessions must be reset.
    Reactivated,
    /// A pending deactivation was withdrawn.
    Cancelled,
}

impl GameMode {
    /// Whether games are playable in this mode.
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Request the mode on or off.
    ///
    /// "On" while pending behaves like [`cancel`](Self::cancel).
    pub fn request(self, on: bool) -> (Self, ModeTransition) {
        match (self, on) {
            (Self::Enabled, true) => (self, ModeTransition::Unchanged),
            (Self::Enabled, false) => (
                Self::PendingDeactivation,
                ModeTransition::AwaitingConfirmation,
            ),
            (Self::PendingDeactivation, true) => self.cancel(),
            (Self::PendingDeactivation, false) => (self, ModeTransition::AwaitingConfirmation),
            (Self::Disabled, true) => (Self::Enabled, ModeTransition::Reactivated),
            (Self::Disabled, false) => (self, ModeTransition::Unchanged),
        }
    }

    /// Confirm a pending deactivation.
    pub fn confirm(self) -> (Self, ModeTransition) {
        match self {
            Self::PendingDeactivation => (Self::Disabled, ModeTransition::Deactivated),
            other => (other, ModeTransition::Unchanged),
        }
    }

    /// Withdraw a pending deactivation.
    pub fn cancel(self) -> (Self, ModeTransition) {
        match self {
            Self::PendingDeactivation => (Self::Enabled, ModeTransition::Cancelled),
            other => (other, ModeTransition::Unchanged),
        }
    }
}
