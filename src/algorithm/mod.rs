//! Signature algorithms YConnect issues ID Tokens with

mod traits;

pub mod hmac;
pub mod rsa;

pub use traits::{Algorithm, get_verifier};

/// Algorithm identifier from the ID Token header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    /// RSASSA-PKCS1-v1_5 with SHA-256, current YConnect tokens
    RS256,

    /// HMAC with SHA-256 keyed by the client secret, legacy tokens
    HS256,
}

impl AlgorithmType {
    /// Parse the `alg` header value; anything else is unsupported
    pub fn parse(alg: &str) -> Option<Self> {
        match alg {
            "RS256" => Some(AlgorithmType::RS256),
            "HS256" => Some(AlgorithmType::HS256),
            _ => None,
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::HS256 => "HS256",
        }
    }

    /// Name used in rejection descriptions
    pub const fn long_name(&self) -> &'static str {
        match self {
            AlgorithmType::RS256 => "RSA-SHA256",
            AlgorithmType::HS256 => "HmacSHA256",
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
