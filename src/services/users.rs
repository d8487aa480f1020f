//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    auth::TokenCodec,
    error::{AppError, AppResult},
    models::user::{RegisterRequest, Role, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    codec: TokenCodec,
}

impl UsersService {
    pub fn new(repository: Repository, codec: TokenCodec) -> Self {
        Self { repository, codec }
    }

    /// Register a new account with the given role. The password is hashed
    /// before it ever reaches the repository.
    pub async fn register(&self, request: &RegisterRequest, role: Role) -> AppResult<User> {
        if self.repository.users_email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;

        let user = self
            .repository
            .users_create(&request.name, &request.email, &password_hash, role)
            .await?;

        tracing::info!("Registered {} account for user id={}", role, user.id);

        Ok(user)
    }

    /// Authenticate by email and password, returning a signed token and
    /// the user. Unknown email and wrong password are indistinguishable
    /// to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users_get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.codec.issue(user.id, user.role, None)?;

        Ok((token, user))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users_get_by_id(id).await
    }

    /// Create the first admin account when it does not exist yet.
    /// Without this there is no identity allowed to reach the admin
    /// registration endpoint.
    pub async fn bootstrap_admin(&self, name: &str, email: &str, password: &str) -> AppResult<()> {
        if self.repository.users_email_exists(email).await? {
            return Ok(());
        }

        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let user = self.register(&request, Role::Admin).await?;

        tracing::info!("Bootstrapped admin account {} (id={})", email, user.id);

        Ok(())
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        Ok(hash.to_string())
    }
}
