//! PasswordHasher trait for credential hashing.
//!
//! Defined in chatforge-core so the account service can hash and verify
//! passwords without coupling to a specific algorithm. The argon2
//! adapter lives in chatforge-infra; tests use a transparent fake.

use chatforge_types::error::AccountError;

/// Abstraction over password hashing and verification.
pub trait PasswordHasher: Send + Sync {
    /// Produce an opaque, salted hash of the password.
    fn hash(&self, password: &str) -> Result<String, AccountError>;

    /// Check a candidate password against a stored hash. An unparseable
    /// hash verifies as false rather than erroring.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

impl<T: PasswordHasher> PasswordHasher for std::sync::Arc<T> {
    fn hash(&self, password: &str) -> Result<String, AccountError> {
        (**self).hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        (**self).verify(password, hash)
    }
}
