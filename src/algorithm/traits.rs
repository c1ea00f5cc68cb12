use crate::error::Result;
use crate::keys::Key;

/// Signature algorithm an ID Token can be verified with
pub trait Algorithm {
    /// The JOSE identifier (e.g., "HS256", "RS256")
    fn name(&self) -> &'static str;

    /// Verify a signature
    ///
    /// # Arguments
    /// * `signing_input` - The data that was signed (header.payload)
    /// * `signature` - The Base64URL-encoded signature segment
    /// * `key` - The key to use for verification
    fn verify(&self, signing_input: &str, signature: &str, key: &Key) -> Result<()>;
}

/// Get the signature verifier for the given algorithm
pub fn get_verifier(algorithm: super::AlgorithmType) -> &'static (dyn Algorithm + Send + Sync) {
    match algorithm {
        super::AlgorithmType::RS256 => &super::rsa::RS256,
        super::AlgorithmType::HS256 => &super::hmac::HS256,
    }
}
