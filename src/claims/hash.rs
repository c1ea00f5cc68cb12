use crate::utils::base64url;
use sha2::{Digest, Sha256};

/// Compute the `at_hash` claim value for an access token
///
/// Left-most 128 bits of the SHA-256 digest, Base64URL encoded without
/// padding (OpenID Connect Core 1.0, section 3.1.3.6).
pub fn at_hash(access_token: &str) -> String {
    let digest = Sha256::digest(access_token.as_bytes());
    base64url::encode_bytes(&digest[..digest.len() / 2])
}
