//! Shared test fixtures and helper utilities.
//!
//! Provides pre-built tokens and key documents with known contents for
//! the integration tests.
#![allow(dead_code)]

/// An HS256-signed JWS.
///
/// Header: `{"alg":"HS256","typ":"JWT"}`
/// Payload: `{"sub":"1234567890","name":"Test User","iat":1516239022}`
pub const VALID_HS256_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
     eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IlRlc3QgVXNlciIsImlhdCI6MTUxNjIzOTAyMn0.\
     SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

/// A direct-encryption JWE with an empty encrypted-key segment.
///
/// Header: `{"alg":"dir","enc":"A128GCM"}`
pub const DIR_JWE_TOKEN: &str =
    "eyJhbGciOiJkaXIiLCJlbmMiOiJBMTI4R0NNIn0..aXYtMTIzNDU2Nzg.Y2lwaGVydGV4dA.dGFnLTEyMzQ1Njc4OTAxMg";

/// A malformed token with only two parts.
pub const MALFORMED_TOKEN_TWO_PARTS: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

/// A completely invalid token string.
pub const INVALID_TOKEN: &str = "not-a-valid-jwt";

/// JWK set holding one EC key (kid `1`) and one 2048-bit RSA key (kid `fixture-rsa`).
pub const JWKS_PATH: &str = "tests/fixtures/jwks.json";

/// Path to the test RSA public key fixture, matching the RSA entry of [`JWKS_PATH`].
pub const RSA_PUBLIC_KEY_PATH: &str = "tests/fixtures/rsa_public.pem";

/// Path to the test RSA private key fixture.
pub const RSA_PRIVATE_KEY_PATH: &str = "tests/fixtures/rsa_private.pem";

/// Create an RS256-signed token using the test RSA private key.
pub fn create_rs256_token(claims: &serde_json::Value) -> String {
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    let private_key = std::fs::read(RSA_PRIVATE_KEY_PATH).unwrap();
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some("fixture-rsa".to_string());
    let key = EncodingKey::from_rsa_pem(&private_key).unwrap();
    encode(&header, claims, &key).unwrap()
}

/// Standard test claims.
pub fn standard_claims() -> serde_json::Value {
    serde_json::json!({
        "sub": "1234567890",
        "name": "Test User",
        "iat": 1516239022
    })
}
