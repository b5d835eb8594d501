use acaiaca_auth::config::{logging, parameter};
use acaiaca_auth::repository::user_repository::UserRepositoryTrait;
use acaiaca_auth::state::auth_state::AuthState;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_subscriber();

    info!("Starting Acaiacá auth demo...");

    parameter::init();

    let state = AuthState::from_config()?;
    info!(
        "User store seeded with {} records",
        state.user_repo.count().await
    );

    match state.auth_service.restore_session().await {
        Ok(true) => {
            if let Some(info_dto) = state.auth_service.session_info().await? {
                info!(
                    "Active session: user {} ({}), expires {}",
                    info_dto.user_id,
                    info_dto.role,
                    info_dto
                        .expires_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "unknown".to_string())
                );
            }
            if let Some(user) = state.auth_service.current_user().await? {
                info!("Welcome back, {}", user.username);
            }
        }
        Ok(false) => {
            info!("No stored session; log in through the application to create one");
        }
        Err(e) => {
            warn!("Could not restore session: {}", e);
        }
    }

    Ok(())
}
