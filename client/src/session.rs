//! Identity and session state.
//!
//! Authentication itself is someone else's problem; all the sync layer needs
//! is the current principal, if any, and a way to observe transitions
//! (login, logout, session restore). The session is an explicit object
//! passed to whoever needs it, never ambient global state.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The authenticated identity that scopes remote operations.
///
/// Absence of a principal means "offline/guest": local CRUD keeps working,
/// sync does not run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque account id.
    pub id: String,
    /// Display address, when the identity provider supplies one.
    pub email: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    pub fn with_email(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
        }
    }
}

/// Observable authentication state.
#[derive(Debug)]
pub struct Session {
    state: watch::Sender<Option<Principal>>,
}

impl Session {
    /// A signed-out session.
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    /// A session that starts signed in, e.g. restored from a stored token.
    pub fn signed_in(principal: Principal) -> Self {
        let (state, _) = watch::channel(Some(principal));
        Self { state }
    }

    pub fn sign_in(&self, principal: Principal) {
        self.state.send_replace(Some(principal));
    }

    pub fn sign_out(&self) {
        self.state.send_replace(None);
    }

    pub fn current(&self) -> Option<Principal> {
        self.state.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Subscribe to auth state transitions. Every login, logout, and restore
    /// is delivered to the receiver.
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.state.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
