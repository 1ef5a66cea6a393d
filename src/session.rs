use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

// Mirrors the browser sessionStorage keys the service's web client uses.
#[derive(Debug, Serialize, Deserialize, Default)]
struct SessionFile {
    #[serde(rename = "authToken", skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(rename = "username", skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

pub fn resolve_session_path() -> PathBuf {
    if let Ok(path) = env::var("ACTIVITIES_SESSION_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/session.json")
}

/// Tab-scoped session persistence: a single JSON file holding the token and
/// username as a pair. All operations are best-effort; failures are logged
/// and the caller proceeds as if logged out.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the stored session. A missing, corrupt, or half-written file
    /// yields the logged-out session.
    pub async fn restore(&self) -> Session {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<SessionFile>(&bytes) {
                Ok(SessionFile {
                    auth_token: Some(token),
                    username: Some(username),
                }) => Session {
                    token: Some(token),
                    username: Some(username),
                },
                Ok(_) => Session::default(),
                Err(err) => {
                    error!("failed to parse session file: {err}");
                    Session::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Session::default(),
            Err(err) => {
                error!("failed to read session file: {err}");
                Session::default()
            }
        }
    }

    /// Writes token and username as one document so the pair stays consistent.
    pub async fn save(&self, token: &str, username: &str) {
        let file = SessionFile {
            auth_token: Some(token.to_string()),
            username: Some(username.to_string()),
        };
        match serde_json::to_vec_pretty(&file) {
            Ok(payload) => {
                if let Err(err) = fs::write(&self.path, payload).await {
                    error!("failed to persist session: {err}");
                }
            }
            Err(err) => error!("failed to encode session: {err}"),
        }
    }

    pub async fn clear(&self) {
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => error!("failed to clear session file: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_session_path() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("session_{}_{}.json", std::process::id(), nanos));
        path
    }

    #[test]
    fn empty_session_is_not_authenticated() {
        assert!(!Session::default().is_authenticated());
        assert!(Session::new("t1", "alice").is_authenticated());
    }

    #[tokio::test]
    async fn save_then_restore_roundtrips() {
        let store = SessionStore::new(unique_session_path());
        store.save("t1", "alice").await;

        let session = store.restore().await;
        assert_eq!(session, Session::new("t1", "alice"));

        store.clear().await;
    }

    #[tokio::test]
    async fn restore_missing_file_yields_logged_out() {
        let store = SessionStore::new(unique_session_path());
        assert_eq!(store.restore().await, Session::default());
    }

    #[tokio::test]
    async fn restore_partial_pair_yields_logged_out() {
        let path = unique_session_path();
        fs::write(&path, br#"{"authToken": "t1"}"#).await.unwrap();

        let store = SessionStore::new(&path);
        assert_eq!(store.restore().await, Session::default());

        store.clear().await;
    }

    #[tokio::test]
    async fn restore_corrupt_file_yields_logged_out() {
        let path = unique_session_path();
        fs::write(&path, b"not json").await.unwrap();

        let store = SessionStore::new(&path);
        assert_eq!(store.restore().await, Session::default());

        store.clear().await;
    }

    #[tokio::test]
    async fn clear_removes_stored_session() {
        let store = SessionStore::new(unique_session_path());
        store.save("t1", "alice").await;
        store.clear().await;
        assert_eq!(store.restore().await, Session::default());
    }
}
