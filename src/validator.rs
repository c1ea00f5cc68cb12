//! ID Token verification
//!
//! [`IdTokenVerifier`] is configured once with the values the relying party
//! expects (issuer, client id, keys) and then checks any number of tokens.
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `typ` is `JWT`
//! 2. `alg` matches the configured [`Scheme`]
//! 3. `iss` is the expected issuer
//! 4. `nonce` is the one sent in the authorization request
//! 5. the first `aud` entry is the client id
//! 6. `at_hash` matches the access token (RS256 only, when present)
//! 7. the token has not expired
//! 8. the token was issued within the acceptable range
//! 9. the provider has a public key for `kid` (RS256 only)
//! 10. the signature verifies
//!
//! A failed check is reported as a [`Rejection`] carrying a stable
//! [`RejectionCode`].

use crate::algorithm::{AlgorithmType, get_verifier};
use crate::claims::at_hash;
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Rejection, RejectionCode, Result};
use crate::keys::{Key, PublicKeys, SharedSecret};
use crate::limits::DEFAULT_ACCEPTABLE_RANGE_SECONDS;
use crate::token::IdToken;
use crate::yconnect;
use std::sync::Arc;

/// How ID Token signatures are verified
#[derive(Debug, Clone)]
pub enum Scheme {
    /// RS256 against the provider public key named by `kid`
    Rs256(Arc<PublicKeys>),

    /// Legacy HS256 keyed by the client secret
    Hs256(SharedSecret),
}

impl Scheme {
    pub fn algorithm(&self) -> AlgorithmType {
        match self {
            Scheme::Rs256(_) => AlgorithmType::RS256,
            Scheme::Hs256(_) => AlgorithmType::HS256,
        }
    }
}

/// ID Token verifier
///
/// The verifier is configured once and can be reused (and cloned) across
/// requests; the public key registry is shared, not copied.
///
/// # Example
///
/// ```ignore
/// let keys = PublicKeys::from_json(&public_keys_document)?;
///
/// let verifier = IdTokenVerifier::new()
///     .issuer(yconnect::ISSUER)
///     .client_id("APPLICATION_ID")
///     .public_keys(keys)
///     .build();
///
/// let id_token = verifier.verify(&session_nonce, &raw_id_token, Some(&access_token))?;
/// println!("signed in as {}", id_token.subject());
/// ```
#[derive(Debug, Clone)]
pub struct IdTokenVerifier {
    config_issuer: String,
    config_client_id: String,
    config_scheme: Scheme,
    config_clock: Arc<dyn Clock>,
    config_acceptable_range: i64,
}

impl IdTokenVerifier {
    /// Create a verifier expecting the YConnect issuer
    ///
    /// Until keys are configured every RS256 token fails with
    /// `public_key_not_found`.
    pub fn new() -> Self {
        Self {
            config_issuer: yconnect::ISSUER.to_string(),
            config_client_id: String::new(),
            config_scheme: Scheme::Rs256(Arc::new(PublicKeys::new())),
            config_clock: Arc::new(SystemClock),
            config_acceptable_range: DEFAULT_ACCEPTABLE_RANGE_SECONDS,
        }
    }

    /// Configure the expected `iss`
    pub fn issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.config_issuer = issuer.into();
        self
    }

    /// Configure the client id expected as the first `aud` entry
    pub fn client_id(&mut self, client_id: impl Into<String>) -> &mut Self {
        self.config_client_id = client_id.into();
        self
    }

    /// Verify RS256 tokens against the provider public keys
    pub fn public_keys(&mut self, keys: impl Into<Arc<PublicKeys>>) -> &mut Self {
        self.config_scheme = Scheme::Rs256(keys.into());
        self
    }

    /// Verify legacy HS256 tokens with the client secret
    pub fn shared_secret(&mut self, secret: impl Into<SharedSecret>) -> &mut Self {
        self.config_scheme = Scheme::Hs256(secret.into());
        self
    }

    /// Configure the time source
    pub fn clock(&mut self, clock: impl Clock + 'static) -> &mut Self {
        self.config_clock = Arc::new(clock);
        self
    }

    /// Configure how many seconds after `iat` a token is accepted
    pub fn acceptable_range(&mut self, seconds: i64) -> &mut Self {
        self.config_acceptable_range = seconds;
        self
    }

    pub fn build(&mut self) -> Self {
        self.clone()
    }

    pub fn scheme(&self) -> &Scheme {
        &self.config_scheme
    }
}

impl Default for IdTokenVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IdTokenVerifier {
    /// Decode and check a compact ID Token
    ///
    /// Returns the decoded token if every check passes. Decode failures are
    /// structural errors; failed checks are [`Error::Rejected`].
    pub fn verify(&self, nonce: &str, id_token: &str, access_token: Option<&str>) -> Result<IdToken> {
        let token = IdToken::from_string(id_token)?;
        self.check(nonce, &token, access_token)?;
        Ok(token)
    }

    /// Check a decoded ID Token
    ///
    /// `access_token` is needed only when the token carries `at_hash`.
    pub fn check(
        &self,
        nonce: &str,
        token: &IdToken,
        access_token: Option<&str>,
    ) -> std::result::Result<(), Rejection> {
        tracing::info!(
            alg = token.algorithm(),
            kid = token.key_id(),
            "checking ID Token"
        );

        self.run_checks(nonce, token, access_token)
            .inspect_err(|rejection| {
                tracing::warn!(
                    code = %rejection.code(),
                    description = rejection.description(),
                    "ID Token rejected"
                );
            })
    }

    fn run_checks(
        &self,
        nonce: &str,
        token: &IdToken,
        access_token: Option<&str>,
    ) -> std::result::Result<(), Rejection> {
        let algorithm = self.config_scheme.algorithm();

        // 1. typ
        if token.token_type() != "JWT" {
            return Err(Rejection::new(
                RejectionCode::InvalidType,
                format!("The type is not JWT. ({})", token.token_type()),
            ));
        }

        // 2. alg
        if AlgorithmType::parse(token.algorithm()) != Some(algorithm) {
            return Err(Rejection::new(
                RejectionCode::InvalidAlgorithm,
                format!(
                    "The algorithm is not {}. ({})",
                    algorithm.long_name(),
                    token.algorithm()
                ),
            ));
        }

        // 3. iss
        if token.issuer() != self.config_issuer {
            return Err(Rejection::new(
                RejectionCode::InvalidIssuer,
                format!("The issuer did not match. ({})", token.issuer()),
            ));
        }

        // 4. nonce
        if token.nonce() != nonce {
            return Err(Rejection::new(
                RejectionCode::NotMatchNonce,
                format!("The nonce did not match. ({})", token.nonce()),
            ));
        }

        // 5. aud, first entry only
        let audience = token.audience().first().map(String::as_str).unwrap_or_default();
        if audience != self.config_client_id {
            return Err(Rejection::new(
                RejectionCode::InvalidAudience,
                format!("The client id did not match. ({audience})"),
            ));
        }

        // 6. at_hash
        if let (AlgorithmType::RS256, Some(expected)) = (algorithm, token.at_hash()) {
            let Some(access_token) = access_token else {
                return Err(Rejection::new(
                    RejectionCode::FailedToCreateHash,
                    "Failed to create the at_hash of the access token.",
                ));
            };
            if at_hash(access_token) != expected {
                return Err(Rejection::new(
                    RejectionCode::InvalidAtHash,
                    format!("The at_hash did not match. ({expected})"),
                ));
            }
        }

        // 7. exp
        let now = self.config_clock.now();
        tracing::debug!(now, exp = token.expires_at(), iat = token.issued_at(), "ID Token times");

        if now > token.expires_at() {
            return Err(Rejection::new(
                RejectionCode::ExpiredIdToken,
                format!("Re-issue Id Token. ({})", token.expires_at()),
            ));
        }

        // 8. iat
        let age = now.saturating_sub(token.issued_at());
        if age > self.config_acceptable_range {
            tracing::debug!(age, range = self.config_acceptable_range, "ID Token issued too long ago");
            return Err(Rejection::new(
                RejectionCode::OverAcceptableRange,
                format!("This access has expired possible. ({})", token.issued_at()),
            ));
        }

        // 9. kid
        let key = match &self.config_scheme {
            Scheme::Rs256(keys) => {
                let kid = token.key_id().unwrap_or_default();
                if !keys.contains(kid) {
                    return Err(Rejection::new(
                        RejectionCode::PublicKeyNotFound,
                        "PublicKey for kid not found.",
                    ));
                }
                match keys.lookup(kid) {
                    Ok(Some(key)) => Key::from(key),
                    Ok(None) => {
                        return Err(Rejection::new(
                            RejectionCode::PublicKeyNotFound,
                            "PublicKey for kid not found.",
                        ));
                    }
                    Err(e) => {
                        tracing::error!(kid, error = %e, "unusable public key");
                        return Err(unexpected());
                    }
                }
            }
            Scheme::Hs256(secret) => Key::from(secret.clone()),
        };

        // 10. signature
        match get_verifier(algorithm).verify(token.signing_input(), token.signature(), &key) {
            Ok(()) => Ok(()),
            Err(Error::SignatureInvalid) => Err(Rejection::new(
                RejectionCode::InvalidSignature,
                "Signature verification failed.",
            )),
            Err(e) => {
                tracing::error!(error = %e, "signature verification failed unexpectedly");
                Err(unexpected())
            }
        }
    }
}

fn unexpected() -> Rejection {
    Rejection::new(RejectionCode::UnexpectedError, "Unexpected error.")
}
