use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::utils::base64url;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

impl Algorithm for HS256 {
    fn name(&self) -> &'static str {
        "HS256"
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &Key) -> Result<()> {
        let secret = key.as_symmetric()?;
        verify_hs256(signing_input, signature, secret.as_bytes())
    }
}

/// Compare the unpadded Base64URL HMAC against the signature segment in
/// constant time. Trailing `=` on the segment is ignored.
fn verify_hs256(signing_input: &str, signature: &str, secret: &[u8]) -> Result<()> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(|_| Error::SignatureInvalid)?;
    mac.update(signing_input.as_bytes());
    let expected = base64url::encode_bytes(&mac.finalize().into_bytes());

    let provided = signature.trim_end_matches('=');

    if constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}
