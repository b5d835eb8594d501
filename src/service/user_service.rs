use crate::dto::user_dto::{UserRegisterDto, UserUpdateDto};
use crate::entity::user::{Role, User};
use crate::error::UserError;
use crate::repository::user_repository::UserRepositoryTrait;
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;
use validator::Validate;

/// Profile image assigned to farmers until they upload their own.
const DEFAULT_PROFILE_IMAGE: &str = "/src/assets/fotosPerfis/default.png";

#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { user_repo }
    }

    /// Validate and append a new user record. Farmers get their
    /// profile fields initialized; everyone else gets none of them.
    pub async fn register(&self, payload: UserRegisterDto) -> Result<User, UserError> {
        payload.validate().map_err(|e| {
            warn!("Registration payload rejected");
            UserError::InvalidPayload {
                details: e.to_string(),
            }
        })?;

        if self.user_repo.email_exists(&payload.email).await {
            return Err(UserError::DuplicateEmail);
        }

        let farmer = payload.role == Role::Agricultor;
        let template = User {
            // assigned by the repository
            id: 0,
            username: payload.username,
            email: payload.email,
            password: payload.password,
            role: payload.role,
            state: payload.state,
            city: payload.city,
            phone_number: payload.phone_number,
            member_since: Utc::now().date_naive(),
            property_name: if farmer { payload.property_name } else { None },
            farmer_story: if farmer { payload.farmer_story } else { None },
            profile_image: farmer.then(|| DEFAULT_PROFILE_IMAGE.to_string()),
            rating: farmer.then_some(0.0),
            total_sales: farmer.then_some(0),
        };

        self.user_repo.create(template).await
    }

    pub async fn update(&self, id: i64, updates: UserUpdateDto) -> Result<User, UserError> {
        updates
            .validate()
            .map_err(|e| UserError::InvalidPayload {
                details: e.to_string(),
            })?;
        self.user_repo.update(id, updates).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<User, UserError> {
        self.user_repo.find(id).await.ok_or(UserError::UserNotFound)
    }

    pub async fn all(&self) -> Vec<User> {
        self.user_repo.all().await
    }
}
