//! Cryptographic adapters: argon2 password hashing.

pub mod password;

pub use password::Argon2PasswordHasher;
