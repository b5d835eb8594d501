use crate::error::AuthError;
use crate::repository::user_repository::{FixtureUserRepository, UserRepositoryTrait};
use crate::service::auth_service::AuthService;
use crate::service::session_service::{FileSessionStore, SessionStore};
use crate::service::token_service::{TokenService, TokenServiceTrait};
use crate::service::user_service::UserService;
use std::sync::Arc;

/// Session-scoped composition root.
///
/// Construct one per "tab": every consumer gets the same working user
/// collection and session store by reference. Two states built
/// independently reseed from the fixture source and do not see each
/// other's registrations.
#[derive(Clone)]
pub struct AuthState {
    pub user_repo: Arc<dyn UserRepositoryTrait>,
    pub session_store: Arc<dyn SessionStore>,
    pub token_service: TokenService,
    pub user_service: UserService,
    pub auth_service: AuthService,
}

impl AuthState {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryTrait>,
        session_store: Arc<dyn SessionStore>,
    ) -> Result<Self, AuthError> {
        Self::with_token_service(user_repo, session_store, TokenService::new()?)
    }

    pub fn with_token_service(
        user_repo: Arc<dyn UserRepositoryTrait>,
        session_store: Arc<dyn SessionStore>,
        token_service: TokenService,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            user_service: UserService::new(Arc::clone(&user_repo)),
            auth_service: AuthService::new(
                Arc::clone(&user_repo),
                token_service.clone(),
                Arc::clone(&session_store),
            ),
            token_service,
            user_repo,
            session_store,
        })
    }

    /// Default wiring: bundled (or `USERS_FIXTURE_PATH`) fixtures and the
    /// on-disk session store at `SESSION_STORE_PATH`.
    pub fn from_config() -> Result<Self, AuthError> {
        let user_repo = FixtureUserRepository::load_shared()?;
        let session_store = Arc::new(FileSessionStore::from_config());
        Self::new(user_repo, session_store)
    }
}
