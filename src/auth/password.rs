use std::sync::Arc;

use once_cell::sync::OnceCell;

/// Work factor used when nothing else is configured.
pub const DEFAULT_COST: u32 = 10;

/// Salted one-way password hashing with a fixed bcrypt work factor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    // Hash of a throwaway password at the same cost, built on first use
    dummy_hash: Arc<OnceCell<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(plaintext, self.cost)
    }

    /// Malformed hashes verify as `false` rather than erroring.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        bcrypt::verify(plaintext, hashed).unwrap_or(false)
    }

    /// Burn one verification so a missing account costs the same as a bad password.
    pub fn verify_dummy(&self, plaintext: &str) {
        let dummy = self
            .dummy_hash
            .get_or_init(|| self.hash("taskboard-dummy-password").unwrap_or_default());
        let _ = self.verify(plaintext, dummy);
    }
}
