use crate::config::logging::secure_log;
use crate::config::parameter;
use crate::dto::user_dto::UserUpdateDto;
use crate::entity::user::{Role, User};
use crate::error::{AuthError, UserError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Seed dataset bundled with the crate. A page-reload equivalent
/// (constructing a fresh repository) always starts from this list.
const FIXTURE_USERS: &str = include_str!("usuarios.json");

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn find(&self, id: i64) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    /// The login scan: exact match on all three fields.
    async fn find_by_credentials(&self, email: &str, password: &str, role: Role) -> Option<User>;
    async fn email_exists(&self, email: &str) -> bool;
    /// Append a new record. The given `id` is ignored; the stored one is
    /// assigned from the monotonic counter under the write lock.
    async fn create(&self, template: User) -> Result<User, UserError>;
    /// Merge the `Some` fields of `updates` into the matching record.
    async fn update(&self, id: i64, updates: UserUpdateDto) -> Result<User, UserError>;
    async fn delete(&self, id: i64) -> Result<(), UserError>;
    async fn all(&self) -> Vec<User>;
    async fn count(&self) -> usize;
}

/// In-memory user store seeded from a static fixture dataset.
///
/// Mutations live only as long as this repository: nothing is written back
/// to the fixture source.
pub struct FixtureUserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI64,
}

impl FixtureUserRepository {
    /// Seed from the bundled dataset, or from `USERS_FIXTURE_PATH` when set.
    pub fn load() -> Result<Self, AuthError> {
        if let Some(path) = parameter::get_optional("USERS_FIXTURE_PATH") {
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                AuthError::Config(format!("Cannot read user fixture '{}': {}", path, e))
            })?;
            info!("Seeding users from {}", path);
            return Self::from_json(&raw);
        }
        Self::from_json(FIXTURE_USERS)
    }

    pub fn from_json(raw: &str) -> Result<Self, AuthError> {
        let users: Vec<User> = serde_json::from_str(raw)
            .map_err(|e| AuthError::Config(format!("Invalid user fixture: {}", e)))?;
        Ok(Self::with_users(users))
    }

    /// Seed from an explicit list (tests and alternate composition roots).
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: RwLock::new(users),
            next_id: AtomicI64::new(next_id),
        }
    }

    pub fn load_shared() -> Result<Arc<Self>, AuthError> {
        Ok(Arc::new(Self::load()?))
    }
}

#[async_trait]
impl UserRepositoryTrait for FixtureUserRepository {
    async fn find(&self, id: i64) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    async fn find_by_credentials(&self, email: &str, password: &str, role: Role) -> Option<User> {
        let user = self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email && u.password == password && u.role == role)
            .cloned();
        secure_log::sensitive_debug!(
            "Credential scan for {}: {}",
            email,
            if user.is_some() { "match" } else { "no match" }
        );
        user
    }

    async fn email_exists(&self, email: &str) -> bool {
        self.users.read().await.iter().any(|u| u.email == email)
    }

    async fn create(&self, template: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == template.email) {
            return Err(UserError::DuplicateEmail);
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            ..template
        };
        users.push(user.clone());
        info!("User {} registered (id {})", user.username, user.id);
        Ok(user)
    }

    async fn update(&self, id: i64, updates: UserUpdateDto) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserError::UserNotFound)?;

        if let Some(username) = updates.username {
            user.username = username;
        }
        if let Some(password) = updates.password {
            user.password = password;
        }
        if let Some(state) = updates.state {
            user.state = state;
        }
        if let Some(city) = updates.city {
            user.city = city;
        }
        if let Some(phone_number) = updates.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(property_name) = updates.property_name {
            user.property_name = Some(property_name);
        }
        if let Some(farmer_story) = updates.farmer_story {
            user.farmer_story = Some(farmer_story);
        }
        if let Some(profile_image) = updates.profile_image {
            user.profile_image = Some(profile_image);
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), UserError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(UserError::UserNotFound);
        }
        Ok(())
    }

    async fn all(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> FixtureUserRepository {
        FixtureUserRepository::from_json(FIXTURE_USERS).unwrap()
    }

    #[tokio::test]
    async fn bundled_fixture_parses_and_seeds() {
        let repo = seeded();
        assert_eq!(repo.count().await, 5);
        assert!(repo.find(1).await.is_some());
        assert!(repo.find(99).await.is_none());
    }

    #[tokio::test]
    async fn credential_scan_requires_all_three_fields() {
        let repo = seeded();
        let hit = repo
            .find_by_credentials("joao.silva@acaiaca.com.br", "acai2024", Role::Agricultor)
            .await;
        assert_eq!(hit.unwrap().id, 1);

        assert!(repo
            .find_by_credentials("joao.silva@acaiaca.com.br", "acai2024", Role::Consumidor)
            .await
            .is_none());
        assert!(repo
            .find_by_credentials("joao.silva@acaiaca.com.br", "errada", Role::Agricultor)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn lookup_by_email_ignores_credentials() {
        let repo = seeded();
        assert_eq!(repo.find_by_email("maria.souza@acaiaca.com.br").await.unwrap().id, 2);
        assert!(repo.find_by_email("desconhecida@acaiaca.com.br").await.is_none());
        assert!(repo.email_exists("maria.souza@acaiaca.com.br").await);
        assert!(!repo.email_exists("desconhecida@acaiaca.com.br").await);
    }

    #[tokio::test]
    async fn create_assigns_max_plus_one() {
        let repo = seeded();
        let template: User = serde_json::from_str(
            r#"{"id":0,"username":"Novo","email":"novo@acaiaca.com.br","password":"nova1",
                "role":"consumidor","state":"MG","city":"Ouro Preto",
                "phoneNumber":"(31) 91111-2222","memberSince":"2024-06-01"}"#,
        )
        .unwrap();

        let created = repo.create(template).await.unwrap();
        assert_eq!(created.id, 6);
        assert_eq!(repo.count().await, 6);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_without_mutation() {
        let repo = seeded();
        let template: User = serde_json::from_str(
            r#"{"id":0,"username":"Clone","email":"maria.souza@acaiaca.com.br","password":"x",
                "role":"consumidor","state":"SP","city":"Campinas",
                "phoneNumber":"(19) 90000-0000","memberSince":"2024-06-01"}"#,
        )
        .unwrap();

        let err = repo.create(template).await.unwrap_err();
        assert_eq!(err, UserError::DuplicateEmail);
        assert_eq!(repo.count().await, 5);
    }

    #[tokio::test]
    async fn update_merges_only_given_fields() {
        let repo = seeded();
        let updates = UserUpdateDto {
            username: Some("João S.".to_string()),
            farmer_story: Some("História nova.".to_string()),
            ..Default::default()
        };

        let updated = repo.update(1, updates).await.unwrap();
        assert_eq!(updated.username, "João S.");
        assert_eq!(updated.farmer_story.as_deref(), Some("História nova."));
        assert_eq!(updated.city, "Belém");
        assert_eq!(updated.password, "acai2024");
    }

    #[tokio::test]
    async fn update_unknown_id_fails() {
        let repo = seeded();
        let err = repo.update(42, UserUpdateDto::default()).await.unwrap_err();
        assert_eq!(err, UserError::UserNotFound);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = seeded();
        repo.delete(2).await.unwrap();
        assert!(repo.find(2).await.is_none());
        assert_eq!(repo.delete(2).await.unwrap_err(), UserError::UserNotFound);
    }

    #[tokio::test]
    async fn empty_seed_starts_ids_at_one() {
        let repo = FixtureUserRepository::with_users(Vec::new());
        let template: User = serde_json::from_str(
            r#"{"id":0,"username":"Primeiro","email":"p@acaiaca.com.br","password":"p",
                "role":"consumidor","state":"SP","city":"SP",
                "phoneNumber":"(11) 90000-0001","memberSince":"2024-06-01"}"#,
        )
        .unwrap();
        let created = repo.create(template).await.unwrap();
        assert_eq!(created.id, 1);
    }
}
