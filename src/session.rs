//! Signed-in session: bearer token plus the principal it belongs to.
//!
//! `Session` is a cloneable handle passed into `ApiClient::new`. The client
//! reads the token on every request; login and logout write it. With a
//! `FileTokenStore` attached the token survives restarts.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{AuthUser, UserType};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Cannot read session file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot write session file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ═══════════════════════════════════════════════════════════
// FileTokenStore
// ═══════════════════════════════════════════════════════════

/// Persists the bearer token as a single line in a file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `config::session_file()`.
    pub fn default_location() -> Self {
        Self::new(crate::config::session_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or blank file means no saved token.
    pub fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SessionError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the token readable by the owner only. A directory created
    /// here is owner-only too.
    pub fn save(&self, token: &str) -> Result<(), SessionError> {
        let write_err = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
                set_dir_permissions(parent).map_err(write_err)?;
            }
        }
        write_private(&self.path, token).map_err(write_err)
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Set directory permissions to owner-only (0o700 on Unix).
/// On non-Unix platforms this is a no-op.
#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Create or truncate `path` with mode 0o600 on Unix. A file that already
/// existed with wider permissions is narrowed before the token is written.
#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

// ═══════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    user: Option<AuthUser>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

/// Shared session handle. Clones see the same token and user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
    store: Option<FileTokenStore>,
}

impl Session {
    /// No token; requests go out without an `Authorization` header.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// In-memory session with a known token (user unknown until
    /// `ApiClient::refresh_profile`).
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::default();
        session.write().token = Some(token.into());
        session
    }

    /// Session backed by a token file. A previously saved token is restored.
    pub fn persistent(store: FileTokenStore) -> Result<Self, SessionError> {
        let token = store.load()?;
        if token.is_some() {
            tracing::debug!(path = %store.path().display(), "Restored saved session token");
        }
        Ok(Self {
            state: Arc::new(RwLock::new(SessionState { token, user: None })),
            store: Some(store),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.read().user.clone()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.read().user.as_ref().map(AuthUser::user_type)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Record a successful login or registration.
    pub fn sign_in(&self, token: String, user: AuthUser) -> Result<(), SessionError> {
        if let Some(store) = &self.store {
            store.save(&token)?;
        }
        let mut state = self.write();
        state.token = Some(token);
        state.user = Some(user);
        Ok(())
    }

    /// Replace the cached principal (profile refresh or in-place update).
    pub fn set_user(&self, user: AuthUser) {
        self.write().user = Some(user);
    }

    /// Forget the token and user. The in-memory state is cleared even when
    /// removing the token file fails.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        {
            let mut state = self.write();
            state.token = None;
            state.user = None;
        }
        match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }

    // A panic while holding the lock cannot leave the two fields
    // inconsistent, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminUser;
    use uuid::Uuid;

    fn admin() -> AuthUser {
        AuthUser::Admin(AdminUser {
            id: Uuid::new_v4(),
            full_name: "District Officer".into(),
            email: "officer@example.org".into(),
        })
    }

    #[test]
    fn anonymous_has_no_token() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.user_type(), None);
    }

    #[test]
    fn clones_share_state() {
        let session = Session::anonymous();
        let clone = session.clone();
        session.sign_in("tok".into(), admin()).unwrap();
        assert_eq!(clone.token().as_deref(), Some("tok"));
        assert_eq!(clone.user_type(), Some(UserType::Admin));
        clone.sign_out().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn persistent_session_survives_restart() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("session");

        let session = Session::persistent(FileTokenStore::new(&path)).unwrap();
        assert!(!session.is_authenticated());
        session.sign_in("saved-token".into(), admin()).unwrap();

        let restored = Session::persistent(FileTokenStore::new(&path)).unwrap();
        assert_eq!(restored.token().as_deref(), Some("saved-token"));
        // The principal is not persisted, only the token.
        assert!(restored.user().is_none());

        restored.sign_out().unwrap();
        assert!(!path.exists());
        let again = Session::persistent(FileTokenStore::new(&path)).unwrap();
        assert!(!again.is_authenticated());
    }

    #[test]
    fn blank_token_file_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(FileTokenStore::new(&path).load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("RuralCare");
        let path = dir.join("session");

        FileTokenStore::new(&path).save("secret-token").unwrap();
        let file_mode = std::fs::metadata(&path).unwrap().permissions().mode();
        let dir_mode = std::fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(file_mode & 0o777, 0o600);
        assert_eq!(dir_mode & 0o777, 0o700);
    }

    #[cfg(unix)]
    #[test]
    fn existing_token_file_is_narrowed() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.save("new").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(store.load().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn clear_missing_file_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(tmp.path().join("absent"));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn with_token_has_token_but_no_user() {
        let session = Session::with_token("abc");
        assert!(session.is_authenticated());
        assert!(session.user().is_none());
    }
}
