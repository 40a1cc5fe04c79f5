//! File-backed auth provider
//!
//! The session lives in `session.json` next to the config; the allow-list
//! is `allowed_emails` from the app config. There is no password: this
//! gates a single-user terminal, it doesn't secure the data files.

use std::fs;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

use chrono::{Duration, Utc};

use crate::config::{AppSettings, BudgetPaths};
use crate::error::{BudgetError, BudgetResult};
use crate::storage::file_io::{read_json_optional, write_json_atomic};

use super::{AuthProvider, Session, SessionEvent};

/// How long a local session stays valid
pub const SESSION_DAYS: i64 = 30;

pub struct LocalAuthProvider {
    paths: BudgetPaths,
    settings: AppSettings,
    subscribers: Mutex<Vec<Sender<SessionEvent>>>,
}

impl LocalAuthProvider {
    pub fn new(paths: BudgetPaths, settings: &AppSettings) -> Self {
        Self {
            paths,
            settings: settings.clone(),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Start a session for `email`
    ///
    /// Signing in isn't refused for emails off the allow-list; the gate
    /// decides what such a session may see.
    pub fn sign_in(&self, email: &str) -> BudgetResult<Session> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(BudgetError::Validation(format!(
                "'{}' is not an email address",
                email
            )));
        }

        let now = Utc::now();
        let session = Session {
            email: email.to_string(),
            signed_in_at: now,
            expires_at: now + Duration::days(SESSION_DAYS),
        };
        write_json_atomic(self.paths.session_file(), &session)?;

        tracing::info!(email, "signed in");
        self.notify(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    /// Extend the current session
    pub fn refresh_session(&self) -> BudgetResult<Option<Session>> {
        let Some(mut session) = self.current_session()? else {
            return Ok(None);
        };

        session.expires_at = Utc::now() + Duration::days(SESSION_DAYS);
        write_json_atomic(self.paths.session_file(), &session)?;

        self.notify(SessionEvent::TokenRefreshed(session.clone()));
        Ok(Some(session))
    }

    fn notify(&self, event: SessionEvent) {
        match self.subscribers.lock() {
            // Dropped receivers are pruned as we go
            Ok(mut subscribers) => subscribers.retain(|tx| tx.send(event.clone()).is_ok()),
            Err(e) => tracing::warn!(error = %e, "session subscribers unavailable"),
        }
    }
}

impl AuthProvider for LocalAuthProvider {
    fn current_session(&self) -> BudgetResult<Option<Session>> {
        let session: Option<Session> = read_json_optional(self.paths.session_file())?;

        Ok(session.filter(|s| {
            let expired = s.is_expired_at(Utc::now());
            if expired {
                tracing::debug!(email = %s.email, "stored session has expired");
            }
            !expired
        }))
    }

    fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = channel();
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(tx),
            Err(e) => tracing::warn!(error = %e, "could not register session subscriber"),
        }
        rx
    }

    fn is_email_allowed(&self, email: &str) -> BudgetResult<bool> {
        Ok(self.settings.is_email_allowed(email))
    }

    fn sign_out(&self) -> BudgetResult<()> {
        let path = self.paths.session_file();
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| BudgetError::Auth(format!("Failed to remove session: {}", e)))?;
        }

        tracing::info!("signed out");
        self.notify(SessionEvent::SignedOut);
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !email.contains(' '),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthGate;
    use tempfile::TempDir;

    fn provider(temp_dir: &TempDir, allowed: &[&str]) -> LocalAuthProvider {
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = AppSettings {
            allowed_emails: allowed.iter().map(|s| s.to_string()).collect(),
            ..AppSettings::default()
        };
        LocalAuthProvider::new(paths, &settings)
    }

    #[test]
    fn test_sign_in_persists_session() {
        let temp_dir = TempDir::new().unwrap();
        let auth = provider(&temp_dir, &["ana@example.com"]);

        assert!(auth.current_session().unwrap().is_none());
        auth.sign_in("ana@example.com").unwrap();

        let again = provider(&temp_dir, &["ana@example.com"]);
        let session = again.current_session().unwrap().unwrap();
        assert_eq!(session.email, "ana@example.com");
    }

    #[test]
    fn test_sign_in_rejects_non_email() {
        let temp_dir = TempDir::new().unwrap();
        let auth = provider(&temp_dir, &[]);
        assert!(auth.sign_in("not-an-email").unwrap_err().is_validation());
    }

    #[test]
    fn test_allow_list_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let auth = provider(&temp_dir, &["Ana@Example.com"]);

        assert!(auth.is_email_allowed("ana@example.com").unwrap());
        assert!(!auth.is_email_allowed("eve@example.com").unwrap());
    }

    #[test]
    fn test_expired_session_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let auth = provider(&temp_dir, &[]);
        let past = Utc::now() - Duration::days(SESSION_DAYS + 1);
        let stale = Session {
            email: "ana@example.com".into(),
            signed_in_at: past,
            expires_at: past + Duration::days(1),
        };
        write_json_atomic(temp_dir.path().join("session.json"), &stale).unwrap();

        assert!(auth.current_session().unwrap().is_none());
    }

    #[test]
    fn test_gate_follows_sign_in_and_out() {
        let temp_dir = TempDir::new().unwrap();
        let mut gate = AuthGate::new(provider(&temp_dir, &["ana@example.com"]));
        assert!(!gate.is_authenticated());

        gate.provider().sign_in("ana@example.com").unwrap();
        gate.refresh();
        assert!(gate.is_authenticated());

        gate.sign_out().unwrap();
        assert!(!gate.is_authenticated());
        assert!(!temp_dir.path().join("session.json").exists());
    }

    #[test]
    fn test_off_list_session_is_not_authenticated() {
        let temp_dir = TempDir::new().unwrap();
        let auth = provider(&temp_dir, &["ana@example.com"]);
        auth.sign_in("eve@example.com").unwrap();

        let gate = AuthGate::new(auth);
        assert!(gate.session().is_some());
        assert!(!gate.is_authenticated());
    }
}
