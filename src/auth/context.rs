use log::{info, warn};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::storage::Storage;
use crate::error::StorageError;
use crate::models::{Role, User};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, Default)]
struct AuthState {
    user: Option<User>,
    token: Option<String>,
}

/// Process-wide `{user, token}` pair, mirrored to a `Storage`.
///
/// No refresh and no expiry tracking: a token the server stopped accepting
/// only shows up as a 401 on the next request.
pub struct AuthContext {
    state: RwLock<AuthState>,
    storage: Arc<dyn Storage>,
}

impl AuthContext {
    /// Empty context that is not backed by anything stored yet.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            state: RwLock::new(AuthState::default()),
            storage,
        }
    }

    /// Restores whatever a previous run left in `storage`.
    ///
    /// A half-written or unreadable pair is discarded and the context starts
    /// logged out.
    pub fn hydrate(storage: Arc<dyn Storage>) -> Self {
        let restored = match Self::read_stored(storage.as_ref()) {
            Ok(Some(state)) => state,
            Ok(None) => {
                discard_keys(storage.as_ref());
                AuthState::default()
            }
            Err(e) => {
                warn!("discarding stored auth state: {}", e);
                discard_keys(storage.as_ref());
                AuthState::default()
            }
        };

        Self {
            state: RwLock::new(restored),
            storage,
        }
    }

    fn read_stored(storage: &dyn Storage) -> Result<Option<AuthState>, StorageError> {
        let token = match storage.get(TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };
        let user = match storage.get(USER_KEY)? {
            Some(raw) => serde_json::from_str::<User>(&raw)?,
            None => return Ok(None),
        };
        Ok(Some(AuthState {
            user: Some(user),
            token: Some(token),
        }))
    }

    pub fn login(&self, user: User, token: impl Into<String>) -> Result<(), StorageError> {
        let token = token.into();
        self.storage.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.storage.set(TOKEN_KEY, &token)?;

        info!("logged in as {} ({})", user.email, user.role);
        let mut state = self.write();
        state.user = Some(user);
        state.token = Some(token);
        Ok(())
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        {
            let mut state = self.write();
            if let Some(user) = state.user.take() {
                info!("logged out {}", user.email);
            }
            state.token = None;
        }
        self.storage.remove(USER_KEY)?;
        self.storage.remove(TOKEN_KEY)
    }

    /// Replaces the cached user after a profile edit; the token is kept.
    pub fn update_user(&self, user: User) -> Result<(), StorageError> {
        self.storage.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.write().user = Some(user);
        Ok(())
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        let state = self.read();
        state.token.is_some() && state.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.read().user.as_ref().map(|u| u.role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|r| roles.contains(&r))
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }
}

fn discard_keys(storage: &dyn Storage) {
    for key in [USER_KEY, TOKEN_KEY] {
        if let Err(e) = storage.remove(key) {
            warn!("could not clear stored {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::{FileStorage, MemoryStorage};
    use crate::models::Id;

    fn user(role: Role) -> User {
        User {
            id: Id::from(5),
            email: "kim@example.com".to_string(),
            role,
            first_name: Some("Kim".to_string()),
            last_name: None,
            profile: None,
        }
    }

    #[test]
    fn survives_simulated_reload() {
        let path = std::env::temp_dir()
            .join("therapy-client-tests")
            .join(format!("{}.json", uuid::Uuid::new_v4()));

        let first = AuthContext::hydrate(Arc::new(FileStorage::new(&path)));
        assert!(!first.is_authenticated());
        first.login(user(Role::Psychologist), "tok-1").unwrap();
        drop(first);

        let second = AuthContext::hydrate(Arc::new(FileStorage::new(&path)));
        assert_eq!(second.user(), Some(user(Role::Psychologist)));
        assert_eq!(second.token().as_deref(), Some("tok-1"));

        second.logout().unwrap();
        let third = AuthContext::hydrate(Arc::new(FileStorage::new(&path)));
        assert!(third.user().is_none());
        assert!(third.token().is_none());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_does_not_block_login() {
        let path = std::env::temp_dir()
            .join("therapy-client-tests")
            .join(format!("{}.json", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{half written").unwrap();

        let ctx = AuthContext::hydrate(Arc::new(FileStorage::new(&path)));
        assert!(!ctx.is_authenticated());
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "{half written");

        ctx.login(user(Role::Client), "tok").unwrap();
        let reloaded = AuthContext::hydrate(Arc::new(FileStorage::new(&path)));
        assert_eq!(reloaded.token().as_deref(), Some("tok"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn has_role_matches_exactly() {
        let ctx = AuthContext::new(Arc::new(MemoryStorage::new()));
        assert!(!ctx.has_role(Role::Client));

        ctx.login(user(Role::Admin), "t").unwrap();
        assert!(ctx.has_role(Role::Admin));
        assert!(!ctx.has_role(Role::Superadmin));
        assert!(!ctx.has_role(Role::Client));
        assert!(ctx.has_any_role(&[Role::Admin, Role::Superadmin]));
        assert!(!ctx.has_any_role(&[Role::Client, Role::Psychologist]));
        assert!(!ctx.has_any_role(&[]));
    }

    #[test]
    fn unparsable_user_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{broken").unwrap();

        let ctx = AuthContext::hydrate(storage.clone());
        assert!(!ctx.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn token_without_user_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").unwrap();

        let ctx = AuthContext::hydrate(storage.clone());
        assert!(ctx.token().is_none());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn update_user_keeps_token() {
        let storage = Arc::new(MemoryStorage::new());
        let ctx = AuthContext::new(storage.clone());
        ctx.login(user(Role::Client), "tok").unwrap();

        let mut edited = user(Role::Client);
        edited.last_name = Some("Lee".to_string());
        ctx.update_user(edited.clone()).unwrap();

        let reloaded = AuthContext::hydrate(storage);
        assert_eq!(reloaded.user(), Some(edited));
        assert_eq!(reloaded.token().as_deref(), Some("tok"));
    }
}
