pub mod auth_service;
pub mod session_service;
pub mod token_service;
pub mod user_service;
