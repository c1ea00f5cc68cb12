//! Size limit and window constants

/// Maximum length for a compact ID Token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RS256 signatures are 256-512 bytes for 2048-4096 bit keys
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum size for decoded public key DER (16KB)
pub(crate) const MAX_DECODED_KEY_SIZE: usize = 16 * 1024;

/// Accepted RSA modulus sizes, in bits
pub(crate) const MIN_RSA_MODULUS_BITS: usize = 2048;
pub(crate) const MAX_RSA_MODULUS_BITS: usize = 8192;

/// How long after `iat` an ID Token is still accepted (10 minutes)
pub const DEFAULT_ACCEPTABLE_RANGE_SECONDS: i64 = 600;
