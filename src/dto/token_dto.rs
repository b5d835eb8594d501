use crate::entity::user::Role;
use serde::{Deserialize, Serialize};

/// An issued credential plus its time envelope (epoch milliseconds).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenReadDto {
    pub token: String,
    pub iat: i64,
    pub exp: i64,
}

/// The claims carried by a session credential. `iat`/`exp` are epoch
/// milliseconds; `exp` is `iat` plus the configured TTL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenClaimsDto {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}
