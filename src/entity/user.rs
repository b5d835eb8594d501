use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Profile kind a user signs up as. Wire values match the fixture dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Agricultor,
    Consumidor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Agricultor => "agricultor",
            Role::Consumidor => "consumidor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marketplace user record, shaped as in the fixture dataset.
/// The farmer-only fields are populated only when `role` is `agricultor`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
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

impl User {
    pub fn is_agricultor(&self) -> bool {
        self.role == Role::Agricultor
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}
