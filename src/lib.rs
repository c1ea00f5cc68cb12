//! # yconnect-idtoken - ID Token verification for Yahoo! JAPAN YConnect
//!
//! A relying party finishing an OpenID Connect Authorization Code flow
//! against YConnect receives an ID Token next to its access token. This
//! crate decodes that token and decides whether to trust it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use yconnect_idtoken::*;
//!
//! // Body of GET yconnect::PUBLIC_KEYS_ENDPOINT, fetched by the caller
//! let keys = PublicKeys::from_json(&public_keys_document)?;
//! let verifier = IdTokenVerifier::yconnect("APPLICATION_ID", keys);
//!
//! match verifier.verify(&nonce, &raw_id_token, Some(&access_token)) {
//!     Ok(id_token) => println!("Subject: {}", id_token.subject()),
//!     Err(Error::Rejected(rejection)) => eprintln!("{}", rejection.code()),
//!     Err(e) => eprintln!("unreadable ID Token: {e}"),
//! }
//! ```
//!
//! ## Verification
//!
//! Checks run in a fixed order and the first failure wins; see
//! [`validator`] for the list. Each failure carries one of the stable
//! [`RejectionCode`] strings (`invalid_issuer`, `expired_id_token`, ...)
//! and a description naming the offending value.
//!
//! ## Algorithms
//!
//! - **RS256**: RSASSA-PKCS1-v1_5 with SHA-256, checked with `aws-lc-rs`
//!   against the provider key named by the header `kid`
//! - **HS256**: legacy tokens, HMAC-SHA256 keyed by the client secret and
//!   compared in constant time
//!
//! Any other `alg`, including `none`, is rejected with `invalid_algorithm`.
//!
//! ## References
//!
//! - [OpenID Connect Core 1.0](https://openid.net/specs/openid-connect-core-1_0.html)
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519): JSON Web Token (JWT)

// Core modules
pub mod clock;
pub mod error;
mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod keys;

// Token and claims
pub mod claims;
pub mod token;

// Verifier (main public API)
pub mod validator;
pub mod yconnect;

pub use algorithm::AlgorithmType;
pub use claims::at_hash;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Rejection, RejectionCode, Result};
pub use keys::{Key, PublicKeys, RsaPublicKey, SharedSecret};
pub use limits::DEFAULT_ACCEPTABLE_RANGE_SECONDS;
pub use token::IdToken;
pub use validator::{IdTokenVerifier, Scheme};
