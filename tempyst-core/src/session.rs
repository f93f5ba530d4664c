//! Session gate: decides whether the landing page or the dashboard mounts.
//!
//! The OAuth provider itself lives outside this crate; all the dashboard needs
//! is an async "current session" query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserIdentity {
    /// First whitespace-separated word of the name, used in the greeting.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Dashboard,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> Option<UserIdentity>;
}

/// Session backed by whatever identity was stored at sign-in.
#[derive(Debug, Clone, Default)]
pub struct StoredSession {
    user: Option<UserIdentity>,
}

impl StoredSession {
    pub fn new(user: Option<UserIdentity>) -> Self {
        Self { user }
    }
}

#[async_trait]
impl SessionProvider for StoredSession {
    async fn current_session(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}

pub fn select_view(session: Option<&UserIdentity>) -> View {
    match session {
        Some(_) => View::Dashboard,
        None => View::Landing,
    }
}

/// Header text: "Welcome, {first name}" or "Guest".
pub fn greeting(session: Option<&UserIdentity>) -> String {
    match session.map(UserIdentity::first_name).filter(|n| !n.is_empty()) {
        Some(first) => format!("Welcome, {first}"),
        None => "Guest".to_string(),
    }
}
