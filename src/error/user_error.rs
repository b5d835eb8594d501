use thiserror::Error;

/// User-facing failures keep the original marketplace wording.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UserError {
    #[error("Credenciais inválidas")]
    InvalidCredentials,
    #[error("Email já cadastrado")]
    DuplicateEmail,
    #[error("Usuário não encontrado")]
    UserNotFound,
    #[error("Cadastro inválido: {details}")]
    InvalidPayload { details: String },
}
