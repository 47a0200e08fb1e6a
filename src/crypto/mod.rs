//! Cryptographic building blocks.
//!
//! - **random**: OS-entropy helpers and salt generation
//! - **phc**: strict PHC codec for scrypt credentials
//! - **password_hash**: the hashing/verification facade

pub mod password_hash;
pub mod phc;
pub mod random;

pub use password_hash::{hash_password, verify_password, HashError, PasswordHasher};
pub use phc::{ParseError, PhcHash};
pub use random::{fill_random, generate_salt, SALT_LEN};
