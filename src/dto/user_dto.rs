use crate::entity::user::{Role, User};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration payload, as submitted by the sign-up flow.
/// Farmer-only fields are ignored unless `role` is `agricultor`.
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRegisterDto {
    #[validate(
        email(message = "Email format is invalid"),
        length(max = 254, message = "Email must not exceed 254 characters")
    )]
    pub email: String,
    #[validate(length(
        min = 1,
        max = 128,
        message = "Password must be between 1 and 128 characters"
    ))]
    pub password: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Username must be between 1 and 100 characters"
    ))]
    pub username: String,
    pub role: Role,
    #[validate(length(max = 50, message = "State must not exceed 50 characters"))]
    pub state: String,
    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    pub city: String,
    #[validate(length(max = 30, message = "Phone number must not exceed 30 characters"))]
    pub phone_number: String,
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub farmer_story: Option<String>,
}

/// Partial update merged into an existing record; `None` fields are left
/// untouched. Email is deliberately not updatable (uniqueness anchor).
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Username must be between 1 and 100 characters"
    ))]
    pub username: Option<String>,
    #[validate(length(
        min = 1,
        max = 128,
        message = "Password must be between 1 and 128 characters"
    ))]
    pub password: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub phone_number: Option<String>,
    pub property_name: Option<String>,
    pub farmer_story: Option<String>,
    pub profile_image: Option<String>,
}

/// Public projection of a user record: everything but the password.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReadDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub state: String,
    pub city: String,
    pub phone_number: String,
    pub member_since: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sales: Option<u32>,
}

impl UserReadDto {
    pub fn from(model: User) -> UserReadDto {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role,
            state: model.state,
            city: model.city,
            phone_number: model.phone_number,
            member_since: model.member_since,
            property_name: model.property_name,
            farmer_story: model.farmer_story,
            profile_image: model.profile_image,
            rating: model.rating,
            total_sales: model.total_sales,
        }
    }
}

impl std::fmt::Debug for UserRegisterDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegisterDto")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

impl std::fmt::Debug for UserUpdateDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserUpdateDto")
            .field("username", &self.username)
            .field("state", &self.state)
            .field("city", &self.city)
            .finish()
    }
}
