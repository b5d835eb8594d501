pub mod session_error;
pub mod token_error;
pub mod user_error;

pub use session_error::SessionError;
pub use token_error::TokenError;
pub use user_error::UserError;

// Unified application error type
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Configuration error: {0}")]
    Config(String),
}
