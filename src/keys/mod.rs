//! Verification keys
//!
//! - [`PublicKeys`] is the provider's `kid -> public key` registry used for RS256
//! - [`SharedSecret`] is the client secret used for legacy HS256 tokens
//! - [`Key`] is what an [`Algorithm`](crate::algorithm::Algorithm) verifies against

use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_KEY_SIZE;
use crate::utils::der::{check_rsa_public_key, rsa_public_key_from_spki};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use std::collections::BTreeMap;
use std::fmt;

const PEM_BEGIN: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_END: &str = "-----END PUBLIC KEY-----";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// A key that can be used for ID Token signature verification
#[derive(Debug, Clone)]
pub enum Key {
    /// Client secret for HS256
    Symmetric(SharedSecret),

    /// Provider public key for RS256
    Rsa(RsaPublicKey),
}

impl Key {
    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Symmetric(_) => "Symmetric",
            Key::Rsa(_) => "RSA",
        }
    }

    /// Get as symmetric key or return error
    pub fn as_symmetric(&self) -> Result<&SharedSecret> {
        match self {
            Key::Symmetric(key) => Ok(key),
            _ => Err(Error::KeyTypeMismatch {
                algorithm: "HS256".to_string(),
                expected: "Symmetric".to_string(),
                actual: self.key_type().to_string(),
            }),
        }
    }

    /// Get as RSA public key or return error
    pub fn as_rsa_public(&self) -> Result<&RsaPublicKey> {
        match self {
            Key::Rsa(key) => Ok(key),
            _ => Err(Error::KeyTypeMismatch {
                algorithm: "RS256".to_string(),
                expected: "RSA".to_string(),
                actual: self.key_type().to_string(),
            }),
        }
    }
}

impl From<SharedSecret> for Key {
    fn from(secret: SharedSecret) -> Self {
        Key::Symmetric(secret)
    }
}

impl From<RsaPublicKey> for Key {
    fn from(key: RsaPublicKey) -> Self {
        Key::Rsa(key)
    }
}

/// Client secret shared with the provider
#[derive(Clone)]
pub struct SharedSecret {
    secret: Vec<u8>,
}

impl SharedSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<&str> for SharedSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<String> for SharedSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&[u8]> for SharedSecret {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}

/// RSA public key as PKCS#1 `RSAPublicKey` DER
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    der: Vec<u8>,
}

impl RsaPublicKey {
    /// Parse a DER-encoded X.509 SubjectPublicKeyInfo holding an RSA key
    pub fn from_spki_der(kid: &str, spki_der: &[u8]) -> Result<Self> {
        rsa_public_key_from_spki(kid, spki_der).map(|der| Self { der })
    }

    /// Wrap PKCS#1 `RSAPublicKey` DER
    pub fn from_pkcs1_der(kid: &str, der: &[u8]) -> Result<Self> {
        check_rsa_public_key(kid, der)?;
        Ok(Self { der: der.to_vec() })
    }

    /// Parse base64 SubjectPublicKeyInfo text, PEM armour allowed
    pub fn from_key_text(kid: &str, text: &str) -> Result<Self> {
        let spki_der = decode_key_text(kid, text)?;
        Self::from_spki_der(kid, &spki_der)
    }

    /// Get the PKCS#1 DER bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

/// Strip PEM armour and whitespace, then base64 decode
fn decode_key_text(kid: &str, text: &str) -> Result<Vec<u8>> {
    let body: String = text
        .replace(PEM_BEGIN, "")
        .replace(PEM_END, "")
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    if body.is_empty() {
        return Err(Error::InvalidKeyMaterial {
            kid: kid.into(),
            reason: "empty key".into(),
        });
    }

    let engine = if body.contains(['-', '_']) {
        &URL_SAFE_LENIENT
    } else {
        &STANDARD_LENIENT
    };

    let der = engine.decode(&body).map_err(|e| Error::InvalidKeyMaterial {
        kid: kid.into(),
        reason: format!("base64 decode failed: {e}"),
    })?;

    if der.len() > MAX_DECODED_KEY_SIZE {
        return Err(Error::InvalidKeyMaterial {
            kid: kid.into(),
            reason: format!(
                "decoded key is {} bytes (max: {MAX_DECODED_KEY_SIZE})",
                der.len()
            ),
        });
    }

    Ok(der)
}

/// Provider public keys indexed by `kid`
///
/// Key text is stored as registered and decoded on [`lookup`](Self::lookup),
/// so one bad entry in a public-keys document does not poison the others.
#[derive(Debug, Clone, Default)]
pub struct PublicKeys {
    keys: BTreeMap<String, String>,
}

impl PublicKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the provider's public-keys document
    ///
    /// The document is a JSON object mapping each `kid` to its key text:
    ///
    /// ```json
    /// { "0cc175b9c0f1b6a831c399e269772661": "-----BEGIN PUBLIC KEY-----\nMIIB..." }
    /// ```
    pub fn from_json(document: &str) -> Result<Self> {
        use miniserde::json::{self, Value};

        let value: Value = json::from_str(document).map_err(|_| Error::InvalidKeyMaterial {
            kid: String::new(),
            reason: "public keys document is not valid JSON".into(),
        })?;

        let Value::Object(entries) = value else {
            return Err(Error::InvalidKeyMaterial {
                kid: String::new(),
                reason: "public keys document is not a JSON object".into(),
            });
        };

        let mut keys = Self::new();
        for (kid, entry) in entries.iter() {
            match entry {
                Value::String(text) => {
                    keys.register(kid.as_str(), text.as_str());
                }
                _ => {
                    return Err(Error::InvalidKeyMaterial {
                        kid: kid.clone(),
                        reason: "key is not a JSON string".into(),
                    });
                }
            }
        }

        tracing::debug!(count = keys.len(), "loaded public keys document");
        Ok(keys)
    }

    /// Register key text under `kid`, replacing any previous entry
    pub fn register(&mut self, kid: impl Into<String>, key: impl Into<String>) -> &mut Self {
        self.keys.insert(kid.into(), key.into());
        self
    }

    /// Find and decode the key for `kid`
    ///
    /// Returns `Ok(None)` for an unknown `kid` and
    /// [`Error::InvalidKeyMaterial`] when the registered text is not an RSA
    /// SubjectPublicKeyInfo.
    pub fn lookup(&self, kid: &str) -> Result<Option<RsaPublicKey>> {
        self.keys
            .get(kid)
            .map(|text| RsaPublicKey::from_key_text(kid, text))
            .transpose()
    }

    pub fn contains(&self, kid: &str) -> bool {
        self.keys.contains_key(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Registered key ids in sorted order
    pub fn key_ids(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for PublicKeys
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut keys = Self::new();
        for (kid, key) in iter {
            keys.register(kid, key);
        }
        keys
    }
}
