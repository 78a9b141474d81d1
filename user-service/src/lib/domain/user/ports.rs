use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PasswordStatistics;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Role;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with validated fields; the password is hashed with
    /// the modern algorithm before it is stored.
    ///
    /// # Errors
    /// * `PasswordTooShort` - Password below the minimum length
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve all users holding the given role.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_users_by_role(&self, role: &Role) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields. A provided password is
    /// re-hashed with the modern algorithm.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `PasswordTooShort` - New password below the minimum length
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;

    /// Change a user's password after verifying the current one.
    ///
    /// The caller supplies an authenticated identity; the current password
    /// is verified against that identity's stored hash, never located by
    /// scanning records.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InvalidCredentials` - Current password does not match
    /// * `PasswordTooShort` - New password below the minimum length
    /// * `PasswordUnchanged` - New password equals the current one
    /// * `DatabaseError` - Database operation failed
    async fn reset_password(
        &self,
        id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UserError>;

    /// Re-encode a legacy stored hash with the modern algorithm.
    ///
    /// Must only be called immediately after a successful verification of
    /// this exact (username, password) pair. Infallible by contract: every
    /// failure is swallowed and logged, since login has already succeeded.
    async fn upgrade_password_if_needed(&self, username: &Username, password: &str);

    /// Classify every stored hash and report per-format counts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn password_statistics(&self) -> Result<PasswordStatistics, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users holding the given role.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_role(&self, role: &Role) -> Result<Vec<User>, UserError>;

    /// Retrieve all users from storage. No ordering guarantee.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Replace only the stored password hash, keyed by identity.
    ///
    /// A single-field atomic update: concurrent logins may both write a
    /// re-encoded hash (last write wins, both verify), but unrelated
    /// fields are never part of the write.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
