use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Missing session token")]
    MissingToken,
    #[error("Invalid session token")]
    InvalidToken,
    #[error("Session token has expired")]
    TokenExpired,
    #[error("Token error: {0}")]
    TokenCreationError(String),
}
