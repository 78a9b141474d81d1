use std::fmt;
use std::str::FromStr;

use auth::HashFormat;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// `password_hash` is an opaque self-describing string; its prefix
/// identifies the hashing algorithm (see [`auth::HashFormat`]). It is
/// never a plaintext password: every write path hashes first.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric,
/// underscore, hyphen, and dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains characters outside the allowed set
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role value type
///
/// Application-defined role strings (e.g. "admin", "user"). The set is
/// open-ended; authorization decisions switch on the string value carried
/// in the token at issuance time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role(String);

impl Role {
    /// Create a new validated role, normalized to lowercase.
    ///
    /// # Errors
    /// * `Empty` - Role is empty or whitespace
    /// * `InvalidCharacters` - Contains non-alphanumeric characters
    pub fn new(role: String) -> Result<Self, RoleError> {
        let role = role.trim().to_lowercase();
        if role.is_empty() {
            return Err(RoleError::Empty);
        }
        if !role.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RoleError::InvalidCharacters);
        }
        Ok(Self(role))
    }

    /// Get role as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: String,
    pub username: Username,
    pub email: EmailAddress,
    pub role: Role,
    pub password: String,
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated. A provided password is re-hashed
/// with the modern algorithm by the service.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub name: Option<String>,
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub role: Option<Role>,
    pub password: Option<String>,
}

/// Per-format counts over all stored password hashes.
///
/// Derived on demand, never persisted. Tracks the progress of the lazy
/// BCrypt -> Argon2id migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordStatistics {
    pub argon2id_count: usize,
    pub bcrypt_count: usize,
    pub unknown_count: usize,
    pub total: usize,
}

impl PasswordStatistics {
    /// Count one stored hash under its classified format.
    pub fn record(&mut self, format: HashFormat) {
        match format {
            HashFormat::Argon2id => self.argon2id_count += 1,
            HashFormat::Bcrypt => self.bcrypt_count += 1,
            HashFormat::Unknown => self.unknown_count += 1,
        }
        self.total += 1;
    }

    /// Share of Argon2id hashes, in percent. 0.0 for an empty store.
    pub fn argon2id_percentage(&self) -> f64 {
        self.percentage(self.argon2id_count)
    }

    /// Share of BCrypt hashes, in percent. 0.0 for an empty store.
    pub fn bcrypt_percentage(&self) -> f64 {
        self.percentage(self.bcrypt_count)
    }

    /// True once no legacy hashes remain.
    pub fn migration_complete(&self) -> bool {
        self.bcrypt_count == 0
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}
