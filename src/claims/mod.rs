//! ID Token payload claims

mod hash;

pub use hash::at_hash;

use miniserde::Deserialize;
use miniserde::json::Value;

/// ID Token payload as it appears on the wire
///
/// Every field is optional here; [`IdToken`](crate::IdToken) decides which
/// ones are required.
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct RawClaims {
    #[serde(rename = "iss")]
    pub issuer: Option<String>,

    #[serde(rename = "sub")]
    pub subject: Option<String>,

    /// Subject claim name used by older YConnect tokens
    pub user_id: Option<String>,

    /// Pairwise subject, present when the client uses PPID
    #[serde(rename = "ppid_sub")]
    pub ppid_subject: Option<String>,

    /// Array of client ids, or a single client id string
    #[serde(rename = "aud")]
    pub audience: Option<Value>,

    pub nonce: Option<String>,

    pub at_hash: Option<String>,

    /// NumericDate claims stay untyped so `1411647139.0` is accepted too
    #[serde(rename = "exp")]
    pub expiration: Option<Value>,

    #[serde(rename = "iat")]
    pub issued_at: Option<Value>,

    pub auth_time: Option<Value>,
}
