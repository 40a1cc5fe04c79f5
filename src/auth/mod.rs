//! Authentication gate
//!
//! The budget itself never looks at who is signed in. An [`AuthProvider`]
//! supplies the session and the allow-list check; [`AuthGate`] folds them
//! into a single "may this user see the data" answer.

pub mod local;

pub use local::LocalAuthProvider;

use std::sync::mpsc::Receiver;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BudgetResult;

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session changes pushed to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
    TokenRefreshed(Session),
}

/// Source of sessions and allow-list decisions
pub trait AuthProvider {
    /// The active session, if any
    fn current_session(&self) -> BudgetResult<Option<Session>>;

    /// Receive every session change from now on
    fn subscribe(&self) -> Receiver<SessionEvent>;

    /// Whether `email` may use the budget
    fn is_email_allowed(&self, email: &str) -> BudgetResult<bool>;

    fn sign_out(&self) -> BudgetResult<()>;
}

/// Tracks the session and answers `is_authenticated`
///
/// A failed allow-list check is logged and treated as "not allowed".
pub struct AuthGate<P: AuthProvider> {
    provider: P,
    events: Receiver<SessionEvent>,
    session: Option<Session>,
    allowed: bool,
}

impl<P: AuthProvider> AuthGate<P> {
    /// Subscribe first, then read the existing session
    pub fn new(provider: P) -> Self {
        let events = provider.subscribe();

        let session = match provider.current_session() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session");
                None
            }
        };

        let mut gate = Self {
            provider,
            events,
            session: None,
            allowed: false,
        };
        gate.set_session(session);
        gate
    }

    fn set_session(&mut self, session: Option<Session>) {
        self.allowed = match &session {
            Some(session) => self.check_allowed(&session.email),
            None => false,
        };
        self.session = session;
    }

    fn check_allowed(&self, email: &str) -> bool {
        match self.provider.is_email_allowed(email) {
            Ok(allowed) => {
                tracing::debug!(email, allowed, "checked allow-list");
                allowed
            }
            Err(e) => {
                tracing::error!(email, error = %e, "allow-list check failed");
                false
            }
        }
    }

    /// Apply any session events received since the last call
    pub fn refresh(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            tracing::debug!(?event, "session event");
            match event {
                SessionEvent::SignedIn(session) | SessionEvent::TokenRefreshed(session) => {
                    self.set_session(Some(session))
                }
                SessionEvent::SignedOut => self.set_session(None),
            }
        }
    }

    /// Signed in and on the allow-list
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some() && self.allowed
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Sign out; local state is only cleared if the provider succeeded
    pub fn sign_out(&mut self) -> BudgetResult<()> {
        self.provider.sign_out()?;
        self.session = None;
        self.allowed = false;
        Ok(())
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
