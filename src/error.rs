//! Errors for ID Token decoding and verification
//!
//! Two layers of failure exist. [`Error`] covers everything that stops a token
//! from being processed at all (malformed input, bad key material, crypto
//! failures). [`Rejection`] is the outcome of a claim or signature check that
//! ran to completion and said "no": it carries the stable error code and the
//! human readable description that callers surface to users or logs.

use thiserror::Error;

/// Crate errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Structural Errors
    // ============================================================================
    #[error("No ID Token was supplied")]
    NullInput,

    #[error("Malformed ID Token: {0}")]
    MalformedToken(String),

    #[error("Required claim '{0}' is missing or has the wrong type")]
    MissingClaim(String),

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("Invalid key material for kid '{kid}': {reason}")]
    InvalidKeyMaterial { kid: String, reason: String },

    #[error("Key type mismatch for algorithm '{algorithm}': expected {expected}, got {actual}")]
    KeyTypeMismatch {
        algorithm: String,
        expected: String,
        actual: String,
    },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Verification Errors
    // ============================================================================
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

impl Error {
    /// Whether this error comes from the decode step (bad compact string,
    /// bad JSON, missing claims or absent input)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::NullInput
                | Error::MalformedToken(_)
                | Error::MissingClaim(_)
                | Error::TokenTooLarge { .. }
        )
    }

    /// The rejection, if this error is a failed verification
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Error::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Stable error codes reported by ID Token verification
///
/// The string forms are part of the public contract: callers branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionCode {
    InvalidType,
    InvalidAlgorithm,
    InvalidIssuer,
    NotMatchNonce,
    InvalidAudience,
    InvalidAtHash,
    FailedToCreateHash,
    ExpiredIdToken,
    OverAcceptableRange,
    PublicKeyNotFound,
    InvalidSignature,
    UnexpectedError,
}

impl RejectionCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RejectionCode::InvalidType => "invalid_type",
            RejectionCode::InvalidAlgorithm => "invalid_algorithm",
            RejectionCode::InvalidIssuer => "invalid_issuer",
            RejectionCode::NotMatchNonce => "not_match_nonce",
            RejectionCode::InvalidAudience => "invalid_audience",
            RejectionCode::InvalidAtHash => "invalid_at_hash",
            RejectionCode::FailedToCreateHash => "failed_to_create_hash",
            RejectionCode::ExpiredIdToken => "expired_id_token",
            RejectionCode::OverAcceptableRange => "over_acceptable_range",
            RejectionCode::PublicKeyNotFound => "public_key_not_found",
            RejectionCode::InvalidSignature => "invalid_signature",
            RejectionCode::UnexpectedError => "unexpected_error",
        }
    }
}

impl std::fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RejectionCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A failed ID Token check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {description}")]
pub struct Rejection {
    code: RejectionCode,
    description: String,
}

impl Rejection {
    pub(crate) fn new(code: RejectionCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    /// Machine readable code, e.g. `expired_id_token`
    pub fn code(&self) -> RejectionCode {
        self.code
    }

    /// Human readable description, e.g. `Re-issue Id Token. (1411647139)`
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
