//!
//! OS-entropy helpers and salt generation.
//!

use base64::Engine;
use rand::{rngs::OsRng, TryRngCore};

/// Size of a password salt in bytes.
pub const SALT_LEN: usize = 16;

/// Fills `buf` from the operating system's CSPRNG.
///
/// # Panics
///
/// Panics if the OS entropy source is unavailable. This is the one fatal
/// condition in this crate; every other failure is a recoverable `Result`.
pub fn fill_random(buf: &mut [u8]) {
    if let Err(err) = OsRng.try_fill_bytes(buf) {
        panic!("OS entropy source unavailable: {err}");
    }
}

/// Generates a fresh 16-byte salt and returns its url-safe, unpadded base64
/// text (22 ASCII characters, no `$`, safe to embed in a PHC string).
///
/// The text form is what the rest of the subsystem works with: it is stored
/// in the encoded credential and its bytes are what the KDF consumes.
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    fill_random(&mut salt);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(salt)
}
