use crate::config::logging::secure_log;
use crate::dto::session_dto::{AuthSessionDto, SessionInfoDto};
use crate::dto::token_dto::TokenReadDto;
use crate::dto::user_dto::{UserReadDto, UserRegisterDto, UserUpdateDto};
use crate::entity::user::{Role, User};
use crate::error::{AuthError, SessionError, UserError};
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::session_service::{SessionRecord, SessionStore};
use crate::service::token_service::{TokenService, TokenServiceTrait};
use crate::service::user_service::UserService;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Orchestrates login, registration and session lifecycle over the user
/// store, the token service and the session store.
///
/// One instance stands in for one browser tab: it is handed its
/// collaborators by the composition root and owns no global state.
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    user_service: UserService,
    token_service: TokenService,
    session_store: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryTrait>,
        token_service: TokenService,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            user_service: UserService::new(Arc::clone(&user_repo)),
            user_repo,
            token_service,
            session_store,
        }
    }

    /// Validate any persisted session, clearing it when stale.
    /// Returns whether a live session survived.
    pub async fn restore_session(&self) -> Result<bool, SessionError> {
        match self.session_store.load().await? {
            Some(record) => {
                if self.is_token_valid(&record.token).await {
                    info!("Restored session for user {}", record.user_id);
                    Ok(true)
                } else {
                    warn!("Discarding stale session for user {}", record.user_id);
                    self.session_store.clear().await?;
                    Ok(false)
                }
            }
            None => Ok(false),
        }
    }

    /// A token is valid when it decodes, has not expired and still points
    /// at an existing user record.
    pub async fn is_token_valid(&self, token: &str) -> bool {
        let claims = match self.token_service.verify(token) {
            Ok(claims) => claims,
            Err(_) => return false,
        };
        self.user_repo.find(claims.id).await.is_some()
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthSessionDto, AuthError> {
        let user = self
            .user_repo
            .find_by_credentials(email, password, role)
            .await
            .ok_or_else(|| {
                warn!("Login rejected: credentials did not match any record");
                UserError::InvalidCredentials
            })?;

        let token = self.token_service.issue(&user)?;
        self.save_session(&user, &token).await?;

        info!("User {} logged in as {}", user.id, user.role);
        secure_log::sensitive_debug!("Login email: {}", user.email);
        Ok(AuthSessionDto {
            user: UserReadDto::from(user),
            token,
        })
    }

    /// Register a new user and open a session for them in one step.
    pub async fn register(&self, payload: UserRegisterDto) -> Result<AuthSessionDto, AuthError> {
        let user = self.user_service.register(payload).await?;
        let token = self.token_service.issue(&user)?;
        self.save_session(&user, &token).await?;

        info!("User {} registered and logged in", user.id);
        Ok(AuthSessionDto {
            user: UserReadDto::from(user),
            token,
        })
    }

    /// Drop the session unconditionally. Idempotent.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.session_store.clear().await?;
        info!("Session cleared");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        match self.session_store.load().await {
            Ok(Some(record)) => self.is_token_valid(&record.token).await,
            _ => false,
        }
    }

    /// Resolve the authenticated user, clearing the session when the stored
    /// token is missing, invalid, expired or orphaned.
    pub async fn current_user(&self) -> Result<Option<UserReadDto>, AuthError> {
        Ok(self
            .current_user_record()
            .await?
            .map(UserReadDto::from))
    }

    /// Re-issue a fresh credential for the current user; `None` when
    /// unauthenticated.
    pub async fn refresh_token(&self) -> Result<Option<TokenReadDto>, AuthError> {
        let Some(user) = self.current_user_record().await? else {
            return Ok(None);
        };
        let token = self.token_service.issue(&user)?;
        self.save_session(&user, &token).await?;
        info!("Token refreshed for user {}", user.id);
        Ok(Some(token))
    }

    /// Merge `updates` into the matching record. When the target is the
    /// authenticated user, the session record and token are re-issued so
    /// they reflect the new data.
    pub async fn update_user(
        &self,
        id: i64,
        updates: UserUpdateDto,
    ) -> Result<UserReadDto, AuthError> {
        let updated = self.user_service.update(id, updates).await?;

        if let Some(current) = self.current_user_record().await? {
            if current.id == id {
                let token = self.token_service.issue(&updated)?;
                self.save_session(&updated, &token).await?;
                info!("Session refreshed after profile update for user {}", id);
            }
        }

        Ok(UserReadDto::from(updated))
    }

    /// Diagnostic projection of the stored session. Read-only: an invalid
    /// token is reported via `is_valid`, not cleared.
    pub async fn session_info(&self) -> Result<Option<SessionInfoDto>, SessionError> {
        let Some(record) = self.session_store.load().await? else {
            return Ok(None);
        };
        let claims = match self.token_service.decode(&record.token) {
            Ok(claims) => claims,
            Err(_) => return Ok(None),
        };

        let is_valid = self.is_token_valid(&record.token).await;
        Ok(Some(SessionInfoDto {
            user_id: claims.id,
            email: claims.email,
            role: claims.role,
            last_login: Utc.timestamp_millis_opt(record.last_login).single(),
            expires_at: Utc.timestamp_millis_opt(record.session_expiry).single(),
            is_valid,
        }))
    }

    /// Diagnostic projection of the working user collection.
    pub async fn all_users(&self) -> Vec<UserReadDto> {
        self.user_service
            .all()
            .await
            .into_iter()
            .map(UserReadDto::from)
            .collect()
    }

    async fn current_user_record(&self) -> Result<Option<User>, AuthError> {
        let Some(record) = self.session_store.load().await? else {
            return Ok(None);
        };

        let claims = match self.token_service.verify(&record.token) {
            Ok(claims) => claims,
            Err(_) => {
                self.session_store.clear().await?;
                return Ok(None);
            }
        };

        match self.user_repo.find(claims.id).await {
            Some(user) => Ok(Some(user)),
            None => {
                warn!("Session user {} no longer exists; clearing", claims.id);
                self.session_store.clear().await?;
                Ok(None)
            }
        }
    }

    async fn save_session(&self, user: &User, token: &TokenReadDto) -> Result<(), SessionError> {
        let record = SessionRecord {
            token: token.token.clone(),
            user_id: user.id,
            user_name: user.username.clone(),
            user_role: user.role,
            email: user.email.clone(),
            historia: user.farmer_story.clone(),
            last_login: token.iat,
            session_expiry: token.exp,
        };
        self.session_store.save(&record).await
    }
}
