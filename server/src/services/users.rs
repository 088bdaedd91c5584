//! In-memory account store.
//!
//! DESIGN
//! ======
//! Accounts are keyed by normalized e-mail in a `tokio::sync::RwLock`-guarded
//! map. Passwords are stored as Argon2id PHC strings and never leave this
//! module. `UserDescriptor` is the only shape handed to clients.

use std::collections::HashMap;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use client::state::session::{Provider, Role};
use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("name is required")]
    InvalidName,
    #[error("password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters")]
    InvalidPassword,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is blocked")]
    Blocked,
    #[error("user not found")]
    NotFound,
    #[error("password hashing failed: {0}")]
    Hash(String),
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    password_hash: String,
    pub role: Role,
    pub provider: Provider,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub created_at: OffsetDateTime,
}

/// Session descriptor returned to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDescriptor {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub provider: Provider,
}

impl User {
    #[must_use]
    pub fn descriptor(&self) -> UserDescriptor {
        UserDescriptor {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            is_verified: self.is_verified,
            is_blocked: self.is_blocked,
            provider: self.provider,
        }
    }
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || normalized.chars().any(char::is_whitespace) {
        return None;
    }
    Some(normalized)
}

pub fn check_password(password: &str) -> Result<(), UserError> {
    let len = password.chars().count();
    if (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        Ok(())
    } else {
        Err(UserError::InvalidPassword)
    }
}

fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::Hash(e.to_string()))
}

fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

#[derive(Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a local, unverified account.
    ///
    /// # Errors
    ///
    /// Invalid input, or `EmailTaken` when the address is already registered.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<User, UserError> {
        let email = normalize_email(email).ok_or(UserError::InvalidEmail)?;
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(UserError::InvalidName);
        }
        check_password(password)?;
        let password_hash = hash_password(password)?;

        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(UserError::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.clone(),
            name: name.to_owned(),
            password_hash,
            role: Role::User,
            provider: Provider::Local,
            is_verified: false,
            is_blocked: false,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(email, user.clone());
        Ok(user)
    }

    /// Check credentials. The block is only revealed to callers who know the
    /// password.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` or `Blocked`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let email = normalize_email(email).ok_or(UserError::InvalidCredentials)?;
        let user = self.users.read().await.get(&email).cloned().ok_or(UserError::InvalidCredentials)?;
        if !verify_password(&user.password_hash, password) {
            return Err(UserError::InvalidCredentials);
        }
        if user.is_blocked {
            return Err(UserError::Blocked);
        }
        Ok(user)
    }

    pub async fn find(&self, email: &str) -> Option<User> {
        let email = normalize_email(email)?;
        self.users.read().await.get(&email).cloned()
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown address.
    pub async fn mark_verified(&self, email: &str) -> Result<User, UserError> {
        self.modify(email, |user| user.is_verified = true).await
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown address.
    pub async fn set_blocked(&self, email: &str, blocked: bool) -> Result<User, UserError> {
        self.modify(email, |user| user.is_blocked = blocked).await
    }

    /// # Errors
    ///
    /// `InvalidPassword` or `NotFound`.
    pub async fn set_password(&self, email: &str, password: &str) -> Result<User, UserError> {
        check_password(password)?;
        let password_hash = hash_password(password)?;
        self.modify(email, |user| user.password_hash = password_hash).await
    }

    /// Create a verified admin account, or promote and re-key an existing one.
    ///
    /// # Errors
    ///
    /// Invalid e-mail or password.
    pub async fn seed_admin(&self, email: &str, password: &str) -> Result<User, UserError> {
        let email = normalize_email(email).ok_or(UserError::InvalidEmail)?;
        check_password(password)?;
        let password_hash = hash_password(password)?;

        let mut users = self.users.write().await;
        let user = users.entry(email.clone()).or_insert_with(|| User {
            id: Uuid::new_v4(),
            name: "Administrator".to_owned(),
            email,
            password_hash: String::new(),
            role: Role::Admin,
            provider: Provider::Local,
            is_verified: true,
            is_blocked: false,
            created_at: OffsetDateTime::now_utc(),
        });
        user.password_hash = password_hash;
        user.role = Role::Admin;
        user.is_verified = true;
        user.is_blocked = false;
        Ok(user.clone())
    }

    /// All accounts, oldest first.
    pub async fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.email.cmp(&b.email)));
        users
    }

    async fn modify<F>(&self, email: &str, apply: F) -> Result<User, UserError>
    where
        F: FnOnce(&mut User),
    {
        let email = normalize_email(email).ok_or(UserError::NotFound)?;
        let mut users = self.users.write().await;
        let user = users.get_mut(&email).ok_or(UserError::NotFound)?;
        apply(user);
        Ok(user.clone())
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
