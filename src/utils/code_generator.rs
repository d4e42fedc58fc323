//! Short code generation.
//!
//! Codes are random bytes from the OS entropy source encoded as URL-safe base64
//! without padding.

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 6;

/// Length of a generated code in characters.
pub const CODE_LENGTH: usize = CODE_LENGTH_BYTES * 4 / 3;

/// Source of candidate short codes.
///
/// The registry asks for a fresh candidate on every insert attempt, so an
/// implementation does not need to check uniqueness itself.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// [`CodeGenerator`] producing random 8-character codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a random short code from `[A-Za-z0-9_-]`.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
