mod common;

use common::{CLIENT_ID, EXP, IAT, NONCE, TokenBuilder, key_a};
use serde_json::json;
use yconnect_idtoken::*;

#[test]
fn decodes_every_claim() {
    let raw = TokenBuilder::rs256("kid-1")
        .claim("ppid_sub", json!("PAIRWISE"))
        .claim("at_hash", json!("LDktKdoQak3Pk0cnXxCltA"))
        .with_signature("U0lHTkFUVVJF");

    let token = IdToken::from_string(&raw).unwrap();

    assert_eq!(token.token_type(), "JWT");
    assert_eq!(token.algorithm(), "RS256");
    assert_eq!(token.key_id(), Some("kid-1"));
    assert_eq!(token.issuer(), yconnect::ISSUER);
    assert_eq!(token.subject(), "SUBJECT");
    assert_eq!(token.ppid_subject(), Some("PAIRWISE"));
    assert_eq!(token.audience(), [CLIENT_ID.to_string()]);
    assert_eq!(token.nonce(), NONCE);
    assert_eq!(token.at_hash(), Some("LDktKdoQak3Pk0cnXxCltA"));
    assert_eq!(token.expires_at(), EXP);
    assert_eq!(token.issued_at(), IAT);
    assert_eq!(token.auth_time(), IAT);
    assert_eq!(token.signature(), "U0lHTkFUVVJF");
}

#[test]
fn signing_input_is_first_two_segments() {
    let raw = TokenBuilder::rs256(key_a().kid).sign_rs256(key_a());
    let token = IdToken::from_string(&raw).unwrap();

    let (signing_input, signature) = raw.rsplit_once('.').unwrap();
    assert_eq!(token.signing_input(), signing_input);
    assert_eq!(token.signature(), signature);
}

#[test]
fn wrong_segment_count_is_structural() {
    let valid = TokenBuilder::hs256().with_signature("sig");

    for raw in [
        String::new(),
        "onlyone".to_string(),
        valid.rsplit_once('.').unwrap().0.to_string(),
        format!("{valid}.extra"),
        format!("{valid}.extra.more"),
    ] {
        let err = IdToken::from_string(&raw).unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)), "{raw:?}: {err:?}");
        assert!(err.is_structural());
    }
}

#[test]
fn absent_input_is_null_input() {
    let err = IdToken::decode(None).unwrap_err();
    assert_eq!(err, Error::NullInput);
    assert!(err.is_structural());

    let raw = TokenBuilder::hs256().with_signature("sig");
    assert!(IdToken::decode(Some(raw.as_str())).is_ok());
}

#[test]
fn missing_required_claims_fail_decode() {
    for claim in ["iss", "sub", "aud", "nonce", "exp", "iat"] {
        let raw = TokenBuilder::hs256().without_claim(claim).with_signature("sig");
        let err = IdToken::from_string(&raw).unwrap_err();
        assert_eq!(err, Error::MissingClaim(claim.into()), "{claim}");
    }
}

#[test]
fn optional_claims_default() {
    let raw = TokenBuilder::hs256()
        .without_claim("auth_time")
        .with_signature("sig");
    let token = IdToken::from_string(&raw).unwrap();

    assert_eq!(token.auth_time(), 0);
    assert_eq!(token.at_hash(), None);
    assert_eq!(token.ppid_subject(), None);
    assert_eq!(token.key_id(), None);
}

#[test]
fn legacy_user_id_is_subject() {
    let raw = TokenBuilder::hs256()
        .without_claim("sub")
        .claim("user_id", json!("LEGACY_USER"))
        .with_signature("sig");
    assert_eq!(IdToken::from_string(&raw).unwrap().subject(), "LEGACY_USER");

    // sub wins when both are present
    let raw = TokenBuilder::hs256()
        .claim("user_id", json!("LEGACY_USER"))
        .with_signature("sig");
    assert_eq!(IdToken::from_string(&raw).unwrap().subject(), "SUBJECT");
}

#[test]
fn audience_forms() {
    let raw = TokenBuilder::hs256()
        .claim("aud", json!(CLIENT_ID))
        .with_signature("sig");
    assert_eq!(IdToken::from_string(&raw).unwrap().audience(), [CLIENT_ID.to_string()]);

    let raw = TokenBuilder::hs256()
        .claim("aud", json!([CLIENT_ID, "another"]))
        .with_signature("sig");
    assert_eq!(IdToken::from_string(&raw).unwrap().audience().len(), 2);

    for aud in [json!([]), json!(42), json!([CLIENT_ID, 1])] {
        let raw = TokenBuilder::hs256().claim("aud", aud.clone()).with_signature("sig");
        assert_eq!(
            IdToken::from_string(&raw).unwrap_err(),
            Error::MissingClaim("aud".into()),
            "{aud}"
        );
    }
}

#[test]
fn rs256_requires_kid() {
    let raw = TokenBuilder::rs256("kid")
        .header("kid", serde_json::Value::Null)
        .with_signature("sig");
    assert_eq!(
        IdToken::from_string(&raw).unwrap_err(),
        Error::MissingClaim("kid".into())
    );
}

#[test]
fn mistyped_claims_are_structural() {
    for (claim, value) in [
        ("exp", json!("1411647139")),
        ("iat", json!(1410437540.5)),
        ("nonce", json!(7)),
        ("iss", json!({ "url": yconnect::ISSUER })),
    ] {
        let raw = TokenBuilder::hs256().claim(claim, value).with_signature("sig");
        let err = IdToken::from_string(&raw).unwrap_err();
        assert!(err.is_structural(), "{claim}: {err:?}");
    }
}

#[test]
fn undecodable_segments_are_malformed() {
    let valid = TokenBuilder::hs256().with_signature("sig");
    let (header, rest) = valid.split_once('.').unwrap();

    let bad_header = format!("***.{rest}");
    assert!(matches!(
        IdToken::from_string(&bad_header),
        Err(Error::MalformedToken(_))
    ));

    let not_json = format!("{}.{rest}", utils::base64url::encode("JWT RS256"));
    assert!(matches!(
        IdToken::from_string(&not_json),
        Err(Error::MalformedToken(_))
    ));

    let not_utf8 = format!("{}.{rest}", utils::base64url::encode_bytes(&[0xc3, 0x28]));
    assert!(matches!(
        IdToken::from_string(&not_utf8),
        Err(Error::MalformedToken(_))
    ));

    let bad_payload = format!("{header}.%%%.sig");
    assert!(matches!(
        IdToken::from_string(&bad_payload),
        Err(Error::MalformedToken(_))
    ));
}

#[test]
fn oversized_token_is_rejected_before_decoding() {
    let raw = TokenBuilder::hs256()
        .claim("padding", json!("x".repeat(70 * 1024)))
        .with_signature("sig");
    assert!(matches!(
        IdToken::from_string(&raw),
        Err(Error::TokenTooLarge { max: 65536, .. })
    ));
}

#[test]
fn unknown_claims_are_ignored() {
    let raw = TokenBuilder::rs256("kid")
        .header("x5t", json!("thumbprint"))
        .claim("amr", json!(["pwd"]))
        .claim("email", json!("user@example.com"))
        .with_signature("sig");
    assert!(IdToken::from_string(&raw).is_ok());
}
