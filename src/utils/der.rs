//! DER decoding of RSA SubjectPublicKeyInfo
//!
//! Provider keys arrive as X.509 SubjectPublicKeyInfo. aws-lc-rs verifies
//! against the inner PKCS#1 `RSAPublicKey`, so the wrapper is unpacked and
//! the inner structure checked here using the RustCrypto `spki` and `der`
//! crates.

use crate::error::{Error, Result};
use crate::limits::{MAX_RSA_MODULUS_BITS, MIN_RSA_MODULUS_BITS};
use der::{Decode, Sequence, asn1::UintRef};
use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};

/// rsaEncryption (1.2.840.113549.1.1.1)
const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// RSAPublicKey as defined in RFC 8017:
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

fn key_error(kid: &str, operation: &str, details: impl std::fmt::Display) -> Error {
    Error::InvalidKeyMaterial {
        kid: kid.into(),
        reason: format!("{operation}: {details}"),
    }
}

/// Unwrap a DER SubjectPublicKeyInfo into PKCS#1 `RSAPublicKey` DER
pub(crate) fn rsa_public_key_from_spki(kid: &str, spki_der: &[u8]) -> Result<Vec<u8>> {
    let spki = SubjectPublicKeyInfoRef::from_der(spki_der)
        .map_err(|e| key_error(kid, "not a SubjectPublicKeyInfo", e))?;

    if spki.algorithm.oid != RSA_ENCRYPTION_OID {
        return Err(key_error(
            kid,
            "unsupported key algorithm",
            spki.algorithm.oid,
        ));
    }

    let pkcs1 = spki
        .subject_public_key
        .as_bytes()
        .ok_or_else(|| key_error(kid, "malformed subject public key", "unused bits"))?;

    check_rsa_public_key(kid, pkcs1)?;
    Ok(pkcs1.to_vec())
}

/// Check that `pkcs1` is a well-formed PKCS#1 `RSAPublicKey` whose modulus
/// is between 2048 and 8192 bits, the range RS256 verification supports
pub(crate) fn check_rsa_public_key(kid: &str, pkcs1: &[u8]) -> Result<()> {
    let key = RsaPublicKey::from_der(pkcs1)
        .map_err(|e| key_error(kid, "malformed RSA public key", e))?;

    if key.modulus.as_bytes().is_empty() || key.public_exponent.as_bytes().is_empty() {
        return Err(key_error(kid, "malformed RSA public key", "missing n or e"));
    }

    let bits = modulus_bits(key.modulus.as_bytes());
    if bits < MIN_RSA_MODULUS_BITS {
        return Err(key_error(
            kid,
            "unsupported RSA key",
            format!("modulus of {bits} bits is below {MIN_RSA_MODULUS_BITS}"),
        ));
    }
    if bits > MAX_RSA_MODULUS_BITS {
        return Err(key_error(
            kid,
            "unsupported RSA key",
            format!("modulus of {bits} bits is above {MAX_RSA_MODULUS_BITS}"),
        ));
    }

    Ok(())
}

/// `UintRef` strips leading zero bytes, so only the first byte can be short
fn modulus_bits(modulus: &[u8]) -> usize {
    match modulus.first() {
        Some(first) => modulus.len() * 8 - first.leading_zeros() as usize,
        None => 0,
    }
}
