use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::utils::base64url;

use aws_lc_rs::signature::{self, UnparsedPublicKey};

/// RS256 algorithm (RSASSA-PKCS1-v1_5 with SHA-256)
pub struct RS256;

impl Algorithm for RS256 {
    fn name(&self) -> &'static str {
        "RS256"
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &Key) -> Result<()> {
        let rsa_key = key.as_rsa_public()?;

        // An undecodable signature is a bad signature, not a malformed token.
        let signature_bytes = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)
            .map_err(|_| Error::SignatureInvalid)?;

        UnparsedPublicKey::new(&signature::RSA_PKCS1_2048_8192_SHA256, rsa_key.as_der())
            .verify(signing_input.as_bytes(), &signature_bytes)
            .map_err(|_| Error::SignatureInvalid)
    }
}
