use std::sync::Arc;

use async_trait::async_trait;
use auth::HashFormat;
use auth::HybridPasswordHasher;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PasswordStatistics;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Role;
use crate::user::models::Username;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Minimum plaintext password length accepted on create, update, and reset.
/// The only strength policy applied.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Domain service implementation for user operations.
///
/// Owns the hybrid password hasher: every password written through this
/// service is stored as an Argon2id hash, while stored BCrypt hashes keep
/// verifying until the per-login migration replaces them.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: HybridPasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with an injected repository.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: HybridPasswordHasher::new(),
        }
    }

    fn check_password_length(password: &str) -> Result<(), UserError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        Self::check_password_length(&command.password)?;

        let password_hash = self.password_hasher.hash(&command.password)?;
        let now = Utc::now();

        let user = User {
            id: UserId::new(),
            name: command.name,
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn get_users_by_role(&self, role: &Role) -> Result<Vec<User>, UserError> {
        self.repository.find_by_role(role).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_role) = command.role {
            user.role = new_role;
        }

        if let Some(new_password) = command.password {
            Self::check_password_length(&new_password)?;
            user.password_hash = self.password_hasher.hash(&new_password)?;
        }

        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }

    async fn reset_password(
        &self,
        id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if !self
            .password_hasher
            .verify(current_password, &user.password_hash)
        {
            return Err(UserError::InvalidCredentials);
        }

        Self::check_password_length(new_password)?;

        if new_password == current_password {
            return Err(UserError::PasswordUnchanged);
        }

        let password_hash = self.password_hasher.hash(new_password)?;
        self.repository.update_password(id, &password_hash).await
    }

    async fn upgrade_password_if_needed(&self, username: &Username, password: &str) {
        let user = match self.repository.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(%username, "User not found for password upgrade");
                return;
            }
            Err(e) => {
                tracing::error!(%username, error = %e, "Lookup failed during password upgrade");
                return;
            }
        };

        if !self.password_hasher.needs_upgrade(&user.password_hash) {
            return;
        }

        tracing::info!(
            %username,
            from = %HashFormat::classify(&user.password_hash),
            to = %HashFormat::Argon2id,
            "Upgrading password encoding"
        );

        let new_hash = match self.password_hasher.hash(password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!(%username, error = %e, "Re-encoding failed during password upgrade");
                return;
            }
        };

        // Login already succeeded; an upgrade failure must stay invisible
        // to the caller.
        match self.repository.update_password(&user.id, &new_hash).await {
            Ok(()) => tracing::info!(%username, "Password encoding upgraded"),
            Err(e) => {
                tracing::error!(%username, error = %e, "Failed to persist upgraded password hash")
            }
        }
    }

    async fn password_statistics(&self) -> Result<PasswordStatistics, UserError> {
        let users = self.repository.list_all().await?;

        let mut stats = PasswordStatistics::default();
        for user in &users {
            stats.record(HashFormat::classify(&user.password_hash));
        }

        Ok(stats)
    }
}
