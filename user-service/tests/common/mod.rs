#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::HybridPasswordHasher;
use auth::JwtHandler;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::Role;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::models::Username;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::domain::user::errors::UserError;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory user repository backing the in-process test application.
///
/// Enforces the same username/email uniqueness the production schema does.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read of a stored record, bypassing the service layer.
    pub fn stored_user(&self, username: &str) -> Option<User> {
        let users = self.users.read().unwrap();
        users
            .values()
            .find(|u| u.username.as_str() == username)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().unwrap();
        if users
            .values()
            .any(|u| u.username.as_str() == user.username.as_str())
        {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|u| u.email.as_str() == user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().unwrap().get(&id.0).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.stored_user(username.as_str()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_role(&self, role: &Role) -> Result<Vec<User>, UserError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .filter(|u| u.role.as_str() == role.as_str())
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.read().unwrap().values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().unwrap();
        if users
            .values()
            .any(|u| u.id != user.id && u.username.as_str() == user.username.as_str())
        {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        if !users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(&id.0)
            .ok_or(UserError::NotFound(id.to_string()))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.write().unwrap();
        users
            .remove(&id.0)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

/// In-process test application driving the router directly.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryUserRepository>,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(Arc::clone(&repository)));
        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));

        let router = create_router(user_service, authenticator, 24);

        Self {
            router,
            repository,
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
        }
    }

    /// Seed a user directly into the repository with a pre-encoded hash.
    pub async fn seed_user(&self, username: &str, password_hash: &str, role: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: format!("{username} Test"),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{username}@example.com")).unwrap(),
            password_hash: password_hash.to_string(),
            role: Role::new(role.to_string()).unwrap(),
            created_at: now,
            updated_at: now,
        };
        self.repository.create(user).await.unwrap()
    }

    /// Mint a token signed with the application's secret.
    pub fn issue_token(&self, username: &str, role: &str) -> String {
        self.jwt_handler
            .encode(&Claims::for_user(username, role, 24))
            .unwrap()
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body was not JSON")
        };

        (status, json)
    }
}

/// Produce a legacy-format hash the way the system being migrated away
/// from would have. Minimum cost keeps the tests fast.
pub fn legacy_hash(password: &str) -> String {
    bcrypt::hash(password, 4).unwrap()
}

/// Produce a modern-format hash.
pub fn modern_hash(password: &str) -> String {
    HybridPasswordHasher::new().hash(password).unwrap()
}
