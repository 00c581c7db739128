use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Wraps bcrypt with a fixed work factor chosen at construction.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor used by [`PasswordHasher::new`].
    pub const DEFAULT_COST: u32 = 10;

    /// Lowest work factor bcrypt accepts.
    pub const MIN_COST: u32 = 4;

    /// Highest work factor bcrypt accepts.
    pub const MAX_COST: u32 = 31;

    /// bcrypt only reads the first 72 bytes of its input.
    pub const MAX_PASSWORD_BYTES: usize = 72;

    /// Create a new password hasher with the default work factor.
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Create a password hasher with an explicit bcrypt cost.
    ///
    /// # Arguments
    /// * `cost` - bcrypt work factor (4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// A random salt is generated for every call, so hashing the same
    /// password twice yields different digests.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format digest (`$2b$<cost>$<salt+hash>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Password longer than 72 bytes, invalid cost, or primitive failure
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > Self::MAX_PASSWORD_BYTES {
            return Err(PasswordError::HashingFailed(format!(
                "password exceeds {} bytes",
                Self::MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// The cost and salt are read from the digest itself, so digests produced
    /// with a different work factor still verify.
    ///
    /// # Errors
    /// * `Mismatch` - Password is wrong or the digest is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        match bcrypt::verify(password, hash) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(PasswordError::Mismatch),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
