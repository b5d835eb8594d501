//! Fixture-backed authentication and session management for the Acaiacá
//! marketplace demo.
//!
//! The crate wires four pieces together: a user store seeded from a static
//! dataset, a signed time-bounded credential, a single-record session store
//! and the [`service::auth_service::AuthService`] that orchestrates them.
//! Build everything at once with [`state::AuthState::from_config`], or
//! compose the pieces yourself for tests and embedding.

pub mod config;
pub mod dto;
pub mod entity;
pub mod error;
pub mod repository;
pub mod service;
pub mod state;

pub use dto::session_dto::{AuthSessionDto, SessionInfoDto};
pub use dto::token_dto::{TokenClaimsDto, TokenReadDto};
pub use dto::user_dto::{UserReadDto, UserRegisterDto, UserUpdateDto};
pub use entity::user::{Role, User};
pub use error::{AuthError, SessionError, TokenError, UserError};
pub use repository::user_repository::{FixtureUserRepository, UserRepositoryTrait};
pub use service::auth_service::AuthService;
pub use service::session_service::{
    FileSessionStore, InMemorySessionStore, SessionRecord, SessionStore,
};
pub use service::token_service::{TokenService, TokenServiceTrait};
pub use service::user_service::UserService;
pub use state::auth_state::AuthState;
