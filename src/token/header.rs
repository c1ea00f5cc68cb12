use miniserde::Deserialize;

/// ID Token header as it appears on the wire
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenHeader {
    /// Token type, "JWT" for every YConnect token
    #[serde(rename = "typ")]
    pub token_type: Option<String>,

    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: Option<String>,

    /// Key ID, selects the provider public key for RS256
    #[serde(rename = "kid")]
    pub key_id: Option<String>,
}
