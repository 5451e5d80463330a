//! Authentication service.
//!
//! Issues and verifies JWT tokens. Login deliberately answers every failure
//! with the same generic error so callers cannot probe for account
//! existence.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, ROLE_ADMIN, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user with the given role code
    async fn register(
        &self,
        email: String,
        password: String,
        name: String,
        role: String,
    ) -> AppResult<User>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a subject
fn generate_token(sub: Uuid, email: &str, role: &str, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub,
        email: email.to_string(),
        role: role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        email: String,
        password: String,
        name: String,
        role: String,
    ) -> AppResult<User> {
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow.users().create(email, password_hash, name, role).await
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let email = email.trim().to_string();
        let password = password.trim().to_string();

        // Bootstrap credential from configuration; username compared
        // case-insensitively. Always wins over stored users.
        if email.eq_ignore_ascii_case(&self.config.bootstrap_username)
            && password == self.config.bootstrap_password
        {
            tracing::warn!("Bootstrap credential used for login");
            return generate_token(Uuid::nil(), &email.to_lowercase(), ROLE_ADMIN, &self.config);
        }

        let user_result = self.uow.users().find_by_email(&email).await?;

        // Verify against a dummy hash when the user is unknown so response
        // timing does not leak account existence.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = user_result.as_ref().unwrap();
        generate_token(user.id, &user.email, &user.role.to_string(), &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ROLE_USER;
    use crate::domain::UserRole;
    use crate::infra::MockUserRepository;
    use crate::services::test_support::TestUnitOfWork;

    fn stored_user(email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            name: "Stored User".to_string(),
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    fn authenticator(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            users: Some(Arc::new(users)),
            ..Default::default()
        };
        Authenticator::new(Arc::new(uow), Config::for_tests())
    }

    #[tokio::test]
    async fn bootstrap_login_succeeds_without_stored_users() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let auth = authenticator(users);

        // case-insensitive username, surrounding whitespace trimmed
        let token = auth
            .login("  ADMIN ".to_string(), " 2025 ".to_string())
            .await
            .expect("bootstrap login must succeed");

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.sub, Uuid::nil());
    }

    #[tokio::test]
    async fn wrong_password_answers_with_generic_error() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("user@example.com", "correct-horse-1"))));
        let auth = authenticator(users);

        let err = auth
            .login("user@example.com".to_string(), "wrong-password".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_user_answers_with_the_same_generic_error() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let auth = authenticator(users);

        let err = auth
            .login("ghost@example.com".to_string(), "whatever-123".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn valid_credentials_yield_a_verifiable_token() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("user@example.com", "correct-horse-1"))));
        let auth = authenticator(users);

        let token = auth
            .login("user@example.com".to_string(), "correct-horse-1".to_string())
            .await
            .unwrap();

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.role, ROLE_USER);
    }

    #[tokio::test]
    async fn register_conflicts_on_taken_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user("taken@example.com", "whatever-123"))));
        let auth = authenticator(users);

        let err = auth
            .register(
                "taken@example.com".to_string(),
                "password123".to_string(),
                "New User".to_string(),
                ROLE_USER.to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }
}
