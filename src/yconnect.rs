//! Yahoo! JAPAN YConnect v2 endpoints

use crate::keys::PublicKeys;
use crate::validator::IdTokenVerifier;
use std::sync::Arc;

/// `iss` of every YConnect v2 ID Token
pub const ISSUER: &str = "https://auth.login.yahoo.co.jp/yconnect/v2";

/// Where the public-keys document for RS256 tokens is published
///
/// Fetch it with any HTTP client and pass the body to
/// [`PublicKeys::from_json`].
pub const PUBLIC_KEYS_ENDPOINT: &str = "https://auth.login.yahoo.co.jp/yconnect/v2/public-keys";

impl IdTokenVerifier {
    /// Verifier for YConnect v2 RS256 ID Tokens issued to `client_id`
    pub fn yconnect(client_id: impl Into<String>, public_keys: impl Into<Arc<PublicKeys>>) -> Self {
        Self::new()
            .issuer(ISSUER)
            .client_id(client_id)
            .public_keys(public_keys)
            .build()
    }
}
