use crate::dto::token_dto::TokenReadDto;
use crate::dto::user_dto::UserReadDto;
use crate::entity::user::Role;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of a successful login or registration.
#[derive(Clone, Debug, Serialize)]
pub struct AuthSessionDto {
    pub user: UserReadDto,
    pub token: TokenReadDto,
}

/// Read-only diagnostic projection of the persisted session.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoDto {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_valid: bool,
}
