use crate::claims::RawClaims;
use crate::error::{Error, Result};
use crate::limits::{MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH};
use crate::token::TokenHeader;
use crate::utils::base64url;
use miniserde::json::{self, Number, Value};

/// A decoded ID Token
///
/// Decoding only checks that the compact string is well formed and carries
/// the required claims. Nothing about the token is trusted until
/// [`IdTokenVerifier`](crate::IdTokenVerifier) has checked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdToken {
    token_type: String,
    algorithm: String,
    key_id: Option<String>,
    issuer: String,
    subject: String,
    ppid_subject: Option<String>,
    audience: Vec<String>,
    nonce: String,
    at_hash: Option<String>,
    expires_at: i64,
    issued_at: i64,
    auth_time: i64,
    signing_input: String,
    signature: String,
}

impl IdToken {
    /// Decode an ID Token that may be absent
    ///
    /// `None` fails with [`Error::NullInput`].
    pub fn decode(token: Option<&str>) -> Result<Self> {
        token.ok_or(Error::NullInput).and_then(Self::from_string)
    }

    /// Decode a compact ID Token ("header.payload.signature")
    ///
    /// # Example
    /// ```ignore
    /// let token = IdToken::from_string("eyJ...")?;
    /// println!("{}", token.subject());
    /// ```
    pub fn from_string(token: &str) -> Result<Self> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::MalformedToken(format!(
                "expected 3 segments, found {}",
                token.split('.').count()
            )));
        };

        let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header: TokenHeader = json::from_str(&header_json)
            .map_err(|e| Error::MalformedToken(format!("Failed to parse header: {e}")))?;

        let payload_json = base64url::decode_string(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        let claims: RawClaims = json::from_str(&payload_json)
            .map_err(|e| Error::MalformedToken(format!("Failed to parse payload: {e}")))?;

        let token_type = required(header.token_type, "typ")?;
        let algorithm = required(header.algorithm, "alg")?;
        if algorithm == "RS256" && header.key_id.is_none() {
            return Err(Error::MissingClaim("kid".into()));
        }

        Ok(Self {
            token_type,
            algorithm,
            key_id: header.key_id,
            issuer: required(claims.issuer, "iss")?,
            subject: required(claims.subject.or(claims.user_id), "sub")?,
            ppid_subject: claims.ppid_subject,
            audience: audience(claims.audience)?,
            nonce: required(claims.nonce, "nonce")?,
            at_hash: claims.at_hash,
            expires_at: required(numeric_date(claims.expiration, "exp")?, "exp")?,
            issued_at: required(numeric_date(claims.issued_at, "iat")?, "iat")?,
            auth_time: numeric_date(claims.auth_time, "auth_time")?.unwrap_or(0),
            signing_input: format!("{header_b64}.{payload_b64}"),
            signature: signature.to_string(),
        })
    }

    /// Header `typ`
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Header `alg`
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Header `kid`, always present for RS256 tokens
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// `sub`, or `user_id` for tokens that predate it
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn ppid_subject(&self) -> Option<&str> {
        self.ppid_subject.as_deref()
    }

    /// `aud`, never empty
    pub fn audience(&self) -> &[String] {
        &self.audience
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn at_hash(&self) -> Option<&str> {
        self.at_hash.as_deref()
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// `auth_time`, 0 when absent
    pub fn auth_time(&self) -> i64 {
        self.auth_time
    }

    /// The signed data, `header.payload` exactly as received
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    /// Third segment, still Base64URL encoded
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

fn required<T>(value: Option<T>, claim: &str) -> Result<T> {
    value.ok_or_else(|| Error::MissingClaim(claim.into()))
}

/// Seconds since the epoch as an integer, or a float with no fractional part
fn numeric_date(value: Option<Value>, claim: &str) -> Result<Option<i64>> {
    let seconds = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(Number::I64(n))) => Some(n),
        Some(Value::Number(Number::U64(n))) => i64::try_from(n).ok(),
        Some(Value::Number(Number::F64(n)))
            if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 =>
        {
            Some(n as i64)
        }
        Some(_) => None,
    };

    seconds
        .map(Some)
        .ok_or_else(|| Error::MalformedToken(format!("`{claim}` is not an integer NumericDate")))
}

/// `aud` is an array of strings, or a single string treated as a one-element list
fn audience(value: Option<Value>) -> Result<Vec<String>> {
    let invalid = || Error::MissingClaim("aud".into());

    let audience = match value.ok_or_else(invalid)? {
        Value::String(aud) => vec![aud],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(aud) => Ok(aud.clone()),
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<_>>>()?,
        _ => return Err(invalid()),
    };

    if audience.is_empty() {
        return Err(invalid());
    }

    Ok(audience)
}
