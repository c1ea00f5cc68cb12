//! Verifies a freshly minted YConnect-style ID Token end to end
//!
//! Run with
//!
//! ```not_rust
//! RUST_LOG=debug cargo run --example verify
//! ```

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{RSA_PKCS1_SHA256, RsaKeyPair};
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yconnect_idtoken::utils::base64url;
use yconnect_idtoken::*;

const KID: &str = "0cc175b9c0f1b6a831c399e269772661";
const CLIENT_ID: &str = "APPLICATION_ID";
const NONCE: &str = "abcdefg";
const ACCESS_TOKEN: &str = "ACCESS_TOKEN";

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yconnect_idtoken=debug,verify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let private_key =
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("Failed to generate key");
    let public_pem = private_key
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("Failed to serialize public key");
    let keypair = RsaKeyPair::from_pkcs8(
        private_key
            .to_pkcs8_der()
            .expect("Failed to serialize private key")
            .as_bytes(),
    )
    .expect("Failed to create RsaKeyPair");

    // What the public-keys endpoint would return
    let document = format!(r#"{{"{KID}":{:?}}}"#, public_pem);
    let keys = PublicKeys::from_json(&document).expect("public keys document");
    let verifier = IdTokenVerifier::yconnect(CLIENT_ID, keys);

    let now = SystemClock.now();
    let header = format!(r#"{{"typ":"JWT","alg":"RS256","kid":"{KID}"}}"#);
    let payload = format!(
        r#"{{"iss":"{}","sub":"SUBJECT","aud":["{CLIENT_ID}"],"exp":{},"iat":{now},"nonce":"{NONCE}","at_hash":"{}"}}"#,
        yconnect::ISSUER,
        now + 3600,
        at_hash(ACCESS_TOKEN)
    );
    let signing_input = format!("{}.{}", base64url::encode(&header), base64url::encode(&payload));
    let mut signature = vec![0u8; keypair.public_modulus_len()];
    keypair
        .sign(&RSA_PKCS1_SHA256, &SystemRandom::new(), signing_input.as_bytes(), &mut signature)
        .expect("Failed to sign");
    let id_token = format!("{signing_input}.{}", base64url::encode_bytes(&signature));

    match verifier.verify(NONCE, &id_token, Some(ACCESS_TOKEN)) {
        Ok(token) => tracing::info!(sub = token.subject(), "ID Token accepted"),
        Err(e) => tracing::error!(error = %e, "ID Token refused"),
    }

    match verifier.verify("another-nonce", &id_token, Some(ACCESS_TOKEN)) {
        Ok(_) => tracing::error!("replayed ID Token accepted"),
        Err(e) => tracing::info!(error = %e, "replayed ID Token refused"),
    }
}
