//! Credential verification and user identity.
//!
//! The core only ever reads the username and queries permission grants
//! by key; how credentials are checked is a collaborator concern. The
//! in-memory implementation here is seeded with demo accounts.

use std::collections::HashMap;

// ============================================================================
// UserIdentity
// ============================================================================

/// An authenticated user with permission grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    username: String,
    grants: HashMap<String, bool>,
}

impl UserIdentity {
    /// Creates an identity with no grants.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            grants: HashMap::new(),
        }
    }

    /// Adds a grant.
    pub fn with_grant(mut self, key: impl Into<String>, value: bool) -> Self {
        self.grants.insert(key.into(), value);
        self
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Looks up a grant by key. Unknown keys are false.
    pub fn has_grant(&self, key: &str) -> bool {
        self.grants.get(key).copied().unwrap_or(false)
    }
}

// ============================================================================
// Authenticator
// ============================================================================

/// Verifies credentials and exposes the current user identity.
pub trait Authenticator {
    /// Checks the credentials; a successful check sets the current user.
    fn authenticate(&mut self, username: &str, password: &str) -> bool;

    /// The identity established by the last successful check, if any.
    fn current_user(&self) -> Option<&UserIdentity>;
}

// ============================================================================
// StaticAuthenticator
// ============================================================================

/// In-memory authenticator over a fixed account table.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    accounts: HashMap<String, String>,
    current: Option<UserIdentity>,
}

impl StaticAuthenticator {
    /// Creates an authenticator with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an authenticator seeded with the demo accounts.
    pub fn with_demo_accounts() -> Self {
        let mut auth = Self::new();
        auth.add_account("ana", "focus123");
        auth.add_account("javier", "todo456");
        auth
    }

    /// Adds an account.
    pub fn add_account(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.accounts.insert(username.into(), password.into());
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&mut self, username: &str, password: &str) -> bool {
        let ok = self
            .accounts
            .get(username)
            .is_some_and(|stored| stored == password);

        if ok {
            tracing::debug!(username, "authentication succeeded");
            self.current = Some(UserIdentity::new(username).with_grant("login", true));
        } else {
            tracing::debug!(username, "authentication failed");
        }
        ok
    }

    fn current_user(&self) -> Option<&UserIdentity> {
        self.current.as_ref()
    }
}

// ============================================================================
// Tests
// ============================================================================
