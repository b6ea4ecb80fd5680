use std::sync::Arc;

use uuid::Uuid;

use crate::auth::PasswordHasher;
use crate::database::models::{NewUser, PublicUser};
use crate::database::{StoreError, UserStore};
use crate::error::ApiError;
use crate::validation::{LoginInput, SignupInput};

/// Signup, login and lookup of user accounts.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub async fn signup(&self, input: SignupInput) -> Result<PublicUser, ApiError> {
        if self.store.find_user_by_email(&input.email).await?.is_some() {
            return Err(email_taken());
        }

        let password_hash = self.hash_password(input.password).await?;

        let user = self
            .store
            .insert_user(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent signup for the same email
                StoreError::Conflict(_) => email_taken(),
                other => other.into(),
            })?;

        tracing::info!("Registered user {}", user.id);
        Ok(user.into())
    }

    /// Unknown email and wrong password yield the same error.
    pub async fn login(&self, input: LoginInput) -> Result<PublicUser, ApiError> {
        let user = self.store.find_user_by_email(&input.email).await?;
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());

        let verified = self.verify_password(input.password, stored_hash).await?;
        let Some(user) = user else {
            tracing::warn!("Failed login attempt for unknown account");
            return Err(ApiError::invalid_credentials());
        };

        if !verified {
            tracing::warn!("Failed login attempt for user {}", user.id);
            return Err(ApiError::invalid_credentials());
        }

        tracing::info!("User {} logged in", user.id);
        Ok(user.into())
    }

    /// A valid token for a user that no longer exists is treated as no session.
    pub async fn current_user(&self, user_id: Uuid) -> Result<PublicUser, ApiError> {
        self.store
            .find_user_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(ApiError::unauthorized)
    }
}

// bcrypt is CPU-bound; both helpers run it on the blocking pool
impl AccountService {
    async fn hash_password(&self, password: String) -> Result<String, ApiError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ApiError::internal("Password hashing task failed", e))?
            .map_err(|e| ApiError::internal("Password hashing failed", e))
    }

    /// With no stored hash, runs a dummy verification and returns `false`.
    async fn verify_password(&self, password: String, stored_hash: Option<String>) -> Result<bool, ApiError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => {
                hasher.verify_dummy(&password);
                false
            }
        })
        .await
        .map_err(|e| ApiError::internal("Password verification task failed", e))
    }
}

fn email_taken() -> ApiError {
    ApiError::conflict("An account with this email already exists")
}
