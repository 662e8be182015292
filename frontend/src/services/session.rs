use gloo::storage::{LocalStorage, Storage};

const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";

/// The authenticated session, backed by browser local storage.
///
/// The token and display username are the only client-persisted state; all
/// storage access goes through this type so the lifecycle is explicit:
/// loaded once at startup via [`Session::current`], written on login,
/// removed on logout or when the backend rejects the token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    /// Restores the session persisted by a previous login, if any.
    pub fn current() -> Option<Session> {
        let token: String = LocalStorage::get(TOKEN_KEY).ok()?;
        let username: String = LocalStorage::get(USERNAME_KEY).unwrap_or_default();
        Some(Session { token, username })
    }

    /// Persists a freshly obtained token and returns the live session.
    pub fn store(token: String, username: String) -> Session {
        // Storage can fail only in exotic browser configurations; a session
        // that does not survive reload is still usable for this tab.
        let _ = LocalStorage::set(TOKEN_KEY, &token);
        let _ = LocalStorage::set(USERNAME_KEY, &username);
        Session { token, username }
    }

    /// Clears the persisted session (logout or rejected token).
    pub fn clear() {
        LocalStorage::delete(TOKEN_KEY);
        LocalStorage::delete(USERNAME_KEY);
    }
}
