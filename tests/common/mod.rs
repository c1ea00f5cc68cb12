//! Shared fixtures for integration tests
//!
//! RSA keys are generated once per test binary; 2048-bit key generation is
//! slow in debug builds.

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{RSA_PKCS1_SHA256, RsaKeyPair};
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use serde_json::{Value, json};
use sha2::Sha256;
use std::sync::OnceLock;
use yconnect_idtoken::utils::base64url;
use yconnect_idtoken::yconnect;

pub const CLIENT_ID: &str = "APPLICATION_ID";
pub const NONCE: &str = "abcdefg";
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN_FROM_TOKEN_ENDPOINT";

/// `iat` of the sample token in the YConnect documentation
pub const IAT: i64 = 1410437540;
/// `exp` of the sample token in the YConnect documentation
pub const EXP: i64 = 1411647139;

/// An RSA key pair with its public half in the forms providers publish
pub struct TestKey {
    pub kid: &'static str,
    pkcs8: Vec<u8>,
    /// Bare base64 SubjectPublicKeyInfo
    pub spki_base64: String,
    /// PEM SubjectPublicKeyInfo with armour and newlines
    pub spki_pem: String,
    pub spki_der: Vec<u8>,
}

impl TestKey {
    fn generate(kid: &'static str) -> Self {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate key");
        let public_key = private_key.to_public_key();

        let pkcs8 = private_key
            .to_pkcs8_der()
            .expect("Failed to serialize to PKCS#8")
            .as_bytes()
            .to_vec();
        let spki_der = public_key
            .to_public_key_der()
            .expect("Failed to serialize SPKI")
            .as_bytes()
            .to_vec();
        let spki_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .expect("Failed to serialize PEM");

        Self {
            kid,
            pkcs8,
            spki_base64: STANDARD.encode(&spki_der),
            spki_pem,
            spki_der,
        }
    }

    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        let keypair = RsaKeyPair::from_pkcs8(&self.pkcs8).expect("Failed to create RsaKeyPair");
        let mut signature = vec![0u8; keypair.public_modulus_len()];
        keypair
            .sign(&RSA_PKCS1_SHA256, &SystemRandom::new(), data, &mut signature)
            .expect("Signing failed");
        signature
    }
}

pub fn key_a() -> &'static TestKey {
    static KEY: OnceLock<TestKey> = OnceLock::new();
    KEY.get_or_init(|| TestKey::generate("0cc175b9c0f1b6a831c399e269772661"))
}

pub fn key_b() -> &'static TestKey {
    static KEY: OnceLock<TestKey> = OnceLock::new();
    KEY.get_or_init(|| TestKey::generate("92eb5ffee6ae2fec3ad71c777531578f"))
}

/// Bare base64 SubjectPublicKeyInfo of a fresh RSA key of the given size
pub fn rsa_spki_base64(bits: usize) -> String {
    let private_key =
        RsaPrivateKey::new(&mut rand::thread_rng(), bits).expect("Failed to generate key");
    let spki_der = private_key
        .to_public_key()
        .to_public_key_der()
        .expect("Failed to serialize SPKI");
    STANDARD.encode(spki_der.as_bytes())
}

/// Builder for compact ID Tokens
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    header: Value,
    claims: Value,
}

impl TokenBuilder {
    /// RS256 header naming `kid`, YConnect claims issued at [`IAT`]
    pub fn rs256(kid: &str) -> Self {
        Self {
            header: json!({ "typ": "JWT", "alg": "RS256", "kid": kid }),
            claims: yconnect_claims(),
        }
    }

    /// HS256 header, YConnect claims issued at [`IAT`]
    pub fn hs256() -> Self {
        Self {
            header: json!({ "typ": "JWT", "alg": "HS256" }),
            claims: yconnect_claims(),
        }
    }

    pub fn header(mut self, name: &str, value: Value) -> Self {
        self.header[name] = value;
        self
    }

    pub fn claim(mut self, name: &str, value: Value) -> Self {
        self.claims[name] = value;
        self
    }

    pub fn without_claim(mut self, name: &str) -> Self {
        if let Some(claims) = self.claims.as_object_mut() {
            claims.remove(name);
        }
        self
    }

    /// Set `at_hash` for the given access token
    pub fn at_hash_for(self, access_token: &str) -> Self {
        self.claim("at_hash", json!(yconnect_idtoken::at_hash(access_token)))
    }

    pub fn signing_input(&self) -> String {
        format!(
            "{}.{}",
            base64url::encode(&self.header.to_string()),
            base64url::encode(&self.claims.to_string())
        )
    }

    /// Compact token carrying `signature` verbatim
    pub fn with_signature(&self, signature: &str) -> String {
        format!("{}.{signature}", self.signing_input())
    }

    pub fn sign_rs256(&self, key: &TestKey) -> String {
        let signing_input = self.signing_input();
        let signature = key.sign(signing_input.as_bytes());
        format!("{signing_input}.{}", base64url::encode_bytes(&signature))
    }

    pub fn sign_hs256(&self, secret: &[u8]) -> String {
        let signing_input = self.signing_input();
        let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
        mac.update(signing_input.as_bytes());
        let signature = base64url::encode_bytes(&mac.finalize().into_bytes());
        format!("{signing_input}.{signature}")
    }
}

fn yconnect_claims() -> Value {
    json!({
        "iss": yconnect::ISSUER,
        "sub": "SUBJECT",
        "aud": [CLIENT_ID],
        "exp": EXP,
        "iat": IAT,
        "auth_time": IAT,
        "nonce": NONCE,
    })
}

/// Flip the lowest bit of the first byte of `input`
pub fn flip_first_bit(input: &str) -> String {
    let mut bytes = input.as_bytes().to_vec();
    bytes[0] ^= 0x01;
    String::from_utf8(bytes).unwrap()
}
