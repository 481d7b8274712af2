//! JSON Web Key parsing and RSA public key reconstruction.
//!
//! A key document is parsed up front into a [`KeyDocument`]: either a
//! single key or a key set under `keys`. Every candidate is dispatched on
//! its exact `kty` into a closed set of [`KeyDescriptor`] variants, each
//! validating its own fields. Extraction is best effort: candidates of the
//! wrong type or with broken fields are skipped, never fatal, because the
//! input is observed or attacker-supplied data of unknown quality.

use std::borrow::Cow;
use std::fmt;

use jsonwebtoken::DecodingKey;
use rsa::{BigUint, RsaPublicKey};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::core::decoder::decode_segment_with_limits;
use crate::core::limits::Limits;
use crate::error::JoseError;

/// Outcome of interpreting one element of a key document.
pub type Candidate = Result<KeyDescriptor, SkipReason>;

/// Why a key candidate was left out of an extraction.
///
/// Skips are routine for hostile or sloppy input and are only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The candidate is not a JSON object.
    NotAnObject,
    /// The candidate has no string `kty` field.
    MissingKeyType,
    /// The `kty` value is not one this engine models.
    UnsupportedKeyType(String),
    /// Required fields of the key type are missing or mistyped.
    InvalidFields {
        /// The candidate's `kty`.
        kty: String,
        /// What was wrong with the fields.
        reason: String,
    },
    /// A field holds material that cannot be decoded into a key component.
    InvalidKeyMaterial(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => f.write_str("candidate is not a JSON object"),
            SkipReason::MissingKeyType => f.write_str("candidate has no `kty`"),
            SkipReason::UnsupportedKeyType(kty) => write!(f, "unsupported key type '{kty}'"),
            SkipReason::InvalidFields { kty, reason } => write!(f, "invalid {kty} key: {reason}"),
            SkipReason::InvalidKeyMaterial(reason) => write!(f, "invalid key material: {reason}"),
        }
    }
}

/// An RSA key descriptor (`kty` = `RSA`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RsaKeyDescriptor {
    /// Base64url modulus.
    pub n: String,
    /// Base64url public exponent.
    pub e: String,
    /// Key id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub kid: Option<String>,
    /// Algorithm hint.
    #[serde(default, deserialize_with = "lenient_string")]
    pub alg: Option<String>,
    /// Intended use (`sig` or `enc`), from the `use` member.
    #[serde(default, rename = "use", deserialize_with = "lenient_string")]
    pub key_use: Option<String>,
}

/// An elliptic-curve key descriptor (`kty` = `EC`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EcKeyDescriptor {
    /// Curve name, e.g. `P-256`.
    pub crv: String,
    /// Base64url x coordinate.
    pub x: String,
    /// Base64url y coordinate.
    pub y: String,
    /// Key id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub kid: Option<String>,
    /// Algorithm hint.
    #[serde(default, deserialize_with = "lenient_string")]
    pub alg: Option<String>,
    /// Intended use (`sig` or `enc`), from the `use` member.
    #[serde(default, rename = "use", deserialize_with = "lenient_string")]
    pub key_use: Option<String>,
}

/// A symmetric key descriptor (`kty` = `oct`).
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct OctKeyDescriptor {
    /// Base64url shared secret.
    pub k: String,
    /// Key id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub kid: Option<String>,
    /// Algorithm hint.
    #[serde(default, deserialize_with = "lenient_string")]
    pub alg: Option<String>,
    /// Intended use (`sig` or `enc`), from the `use` member.
    #[serde(default, rename = "use", deserialize_with = "lenient_string")]
    pub key_use: Option<String>,
}

/// Redacts the shared secret.
impl fmt::Debug for OctKeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OctKeyDescriptor")
            .field("k", &"[REDACTED]")
            .field("kid", &self.kid)
            .field("alg", &self.alg)
            .field("key_use", &self.key_use)
            .finish()
    }
}

/// A key descriptor, dispatched on its exact `kty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDescriptor {
    Rsa(RsaKeyDescriptor),
    Ec(EcKeyDescriptor),
    Oct(OctKeyDescriptor),
}

impl KeyDescriptor {
    /// Interpret one JSON value as a key descriptor.
    ///
    /// `kty` is compared exactly (`"RSA"`, `"EC"`, `"oct"`). Optional
    /// string fields of the wrong JSON type are treated as absent.
    pub fn from_value(value: &Value) -> Candidate {
        let object = value.as_object().ok_or(SkipReason::NotAnObject)?;
        let kty = object
            .get("kty")
            .and_then(Value::as_str)
            .ok_or(SkipReason::MissingKeyType)?;

        let parsed = match kty {
            "RSA" => RsaKeyDescriptor::deserialize(value).map(KeyDescriptor::Rsa),
            "EC" => EcKeyDescriptor::deserialize(value).map(KeyDescriptor::Ec),
            "oct" => OctKeyDescriptor::deserialize(value).map(KeyDescriptor::Oct),
            other => return Err(SkipReason::UnsupportedKeyType(other.to_string())),
        };

        parsed.map_err(|e| SkipReason::InvalidFields {
            kty: kty.to_string(),
            reason: e.to_string(),
        })
    }

    /// The `kty` discriminant of this descriptor.
    pub fn kty(&self) -> &'static str {
        match self {
            KeyDescriptor::Rsa(_) => "RSA",
            KeyDescriptor::Ec(_) => "EC",
            KeyDescriptor::Oct(_) => "oct",
        }
    }

    /// The key id, when the descriptor carries one.
    pub fn kid(&self) -> Option<&str> {
        match self {
            KeyDescriptor::Rsa(key) => key.kid.as_deref(),
            KeyDescriptor::Ec(key) => key.kid.as_deref(),
            KeyDescriptor::Oct(key) => key.kid.as_deref(),
        }
    }
}

impl RsaKeyDescriptor {
    /// Decode `n` and `e` into an RSA public key.
    ///
    /// Both components are read as unsigned big-endian integers.
    pub fn to_public_key(&self, limits: &Limits) -> Result<RsaPublicKeyMaterial, SkipReason> {
        let modulus = decode_component("n", &self.n, limits)?;
        let exponent = decode_component("e", &self.e, limits)?;

        Ok(RsaPublicKeyMaterial {
            kid: self.kid.clone(),
            modulus: BigUint::from_bytes_be(&modulus),
            exponent: BigUint::from_bytes_be(&exponent),
        })
    }
}

/// Decode one base64url key component, ignoring embedded ASCII whitespace.
fn decode_component(field: &str, value: &str, limits: &Limits) -> Result<Vec<u8>, SkipReason> {
    let compact = if value.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(value.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(value)
    };

    let bytes = decode_segment_with_limits(&compact, limits)
        .map_err(|e| SkipReason::InvalidKeyMaterial(format!("`{field}`: {e}")))?;
    if bytes.is_empty() {
        return Err(SkipReason::InvalidKeyMaterial(format!("`{field}` is empty")));
    }
    Ok(bytes)
}

/// Deserialize an optional string, treating any other JSON type as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A parsed key document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDocument {
    /// A bare object without `keys`, interpreted as one key.
    Single(Candidate),
    /// An object with `keys`; its other top-level fields are ignored.
    Set(Vec<Candidate>),
}

impl KeyDocument {
    /// Classify an already parsed JSON value.
    ///
    /// A `keys` field that is not an array yields an empty set.
    pub fn from_value(value: &Value) -> Self {
        match value.get("keys") {
            Some(Value::Array(keys)) => {
                KeyDocument::Set(keys.iter().map(KeyDescriptor::from_value).collect())
            }
            Some(_) => {
                debug!("`keys` is not an array, treating the key set as empty");
                KeyDocument::Set(Vec::new())
            }
            None => KeyDocument::Single(KeyDescriptor::from_value(value)),
        }
    }

    /// Parse raw JSON bytes into a key document.
    ///
    /// # Errors
    ///
    /// Returns [`JoseError::KeyParseError`] if the input exceeds
    /// `limits.max_key_document_len` or is not valid JSON.
    pub fn parse(input: &[u8], limits: &Limits) -> Result<Self, JoseError> {
        if input.len() > limits.max_key_document_len {
            return Err(JoseError::KeyParseError {
                reason: format!(
                    "document of {} bytes exceeds the maximum of {} bytes",
                    input.len(),
                    limits.max_key_document_len
                ),
            });
        }

        let value: Value = serde_json::from_slice(input).map_err(|e| JoseError::KeyParseError {
            reason: e.to_string(),
        })?;
        Ok(Self::from_value(&value))
    }

    /// All candidates, in document order.
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            KeyDocument::Single(candidate) => std::slice::from_ref(candidate),
            KeyDocument::Set(candidates) => candidates,
        }
    }

    /// Successfully parsed descriptors of any key type, in document order.
    pub fn descriptors(&self) -> impl Iterator<Item = &KeyDescriptor> {
        self.candidates().iter().filter_map(|c| c.as_ref().ok())
    }

    /// Every reconstructable RSA public key, in document order.
    ///
    /// Candidates of other types and broken RSA candidates are skipped.
    /// No deduplication is performed.
    pub fn rsa_public_keys(&self, limits: &Limits) -> Vec<RsaPublicKeyMaterial> {
        let mut keys = Vec::new();
        for (index, candidate) in self.candidates().iter().enumerate() {
            match candidate {
                Ok(KeyDescriptor::Rsa(descriptor)) => match descriptor.to_public_key(limits) {
                    Ok(key) => keys.push(key),
                    Err(reason) => debug!(index, %reason, "skipping RSA key candidate"),
                },
                Ok(other) => debug!(index, kty = other.kty(), "skipping non-RSA key"),
                Err(reason) => debug!(index, %reason, "skipping key candidate"),
            }
        }
        keys
    }
}

/// An RSA public key reconstructed from a key descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKeyMaterial {
    kid: Option<String>,
    modulus: BigUint,
    exponent: BigUint,
}

impl RsaPublicKeyMaterial {
    /// Build key material directly from its components.
    pub fn new(modulus: BigUint, exponent: BigUint) -> Self {
        Self {
            kid: None,
            modulus,
            exponent,
        }
    }

    /// The `kid` of the descriptor this key came from.
    pub fn kid(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn exponent(&self) -> &BigUint {
        &self.exponent
    }

    /// Size of the modulus in bits.
    pub fn modulus_bits(&self) -> usize {
        self.modulus.bits()
    }

    /// Convert into an `rsa` public key.
    ///
    /// # Errors
    ///
    /// Returns [`JoseError::InvalidKeyMaterial`] when the `rsa` crate
    /// rejects the modulus size or exponent.
    pub fn to_rsa_public_key(&self) -> Result<RsaPublicKey, JoseError> {
        RsaPublicKey::new(self.modulus.clone(), self.exponent.clone()).map_err(|e| {
            JoseError::InvalidKeyMaterial {
                reason: e.to_string(),
            }
        })
    }

    /// Convert into a `jsonwebtoken` decoding key.
    pub fn to_decoding_key(&self) -> DecodingKey {
        DecodingKey::from_rsa_raw_components(
            &self.modulus.to_bytes_be(),
            &self.exponent.to_bytes_be(),
        )
    }
}

/// Extracts RSA public keys under a set of [`Limits`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyExtractor {
    limits: Limits,
}

impl KeyExtractor {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// RSA keys from an already parsed JSON value. Never fails.
    pub fn rsa_public_keys(&self, json: &Value) -> Vec<RsaPublicKeyMaterial> {
        KeyDocument::from_value(json).rsa_public_keys(&self.limits)
    }

    /// RSA keys from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`JoseError::KeyParseError`] if the text is not valid JSON
    /// or exceeds the document size limit.
    pub fn rsa_public_keys_from_str(
        &self,
        input: &str,
    ) -> Result<Vec<RsaPublicKeyMaterial>, JoseError> {
        self.rsa_public_keys_from_slice(input.as_bytes())
    }

    /// RSA keys from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Same as [`KeyExtractor::rsa_public_keys_from_str`].
    pub fn rsa_public_keys_from_slice(
        &self,
        input: &[u8],
    ) -> Result<Vec<RsaPublicKeyMaterial>, JoseError> {
        Ok(KeyDocument::parse(input, &self.limits)?.rsa_public_keys(&self.limits))
    }
}

/// RSA public keys from a parsed JSON value, using default limits.
pub fn extract_rsa_public_keys(json: &Value) -> Vec<RsaPublicKeyMaterial> {
    KeyExtractor::default().rsa_public_keys(json)
}

/// RSA public keys from JSON text, using default limits.
///
/// # Errors
///
/// Returns [`JoseError::KeyParseError`] if the text is not valid JSON.
pub fn extract_rsa_public_keys_from_str(
    input: &str,
) -> Result<Vec<RsaPublicKeyMaterial>, JoseError> {
    KeyExtractor::default().rsa_public_keys_from_str(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, EncodingKey, Header, Validation, decode, encode};
    use rsa::pkcs8::DecodePublicKey;
    use serde_json::json;
    use std::collections::HashSet;

    /// 2048-bit modulus encoded with a leading zero byte.
    const MODULUS_A: &str = "AK9LhraAG8Tz55FnLk99Q1V-rJEAS7PhXcaXK5z4tw0IOWVXVHKf7xXibbPRwQVIyF4YUaoanmrkzUa0aU-oWXGdBsBmo4CIhj8jcY5YZFtZF7ynov_3a-8-dQNcfjc6_1U6bBw95bsP6C-oJhaXmX2fnAuVpcK0BjkQ3zoI7SGikTLGwclPJ1WsvTo2pX3HR6QCc1puvDjaO3gBA0mn_S6q3TL6mOqYDIeD3b6aklNbobHe1QSm1rRLO7I-j7B-qiAGb_gGLTRndBc4ZI-sWkwQGOkZeEugJukgspmWAmFYd821RXQ9M8egqCYsVM7FsEm_raKvSG2ehxFo7ZSVbLM";

    const MODULUS_A_DECIMAL: &str = "22128946737323913239210052479333027707901510060102775675830991813349418659538199300647898430584144500806059458278321518777044762899512296866600872394644380219013320495156971514431190023600729602211122577883306928327035481763181383360484196857466673122026840292263234856687762092039930273840883706411057986999291723263528956058054902470342623926525220419403492184749748080083440782860930153041629788053392850350190345701856884676367792841834106393147716901597512639433053628947682648446566660847625123370647049602729290059736582541200917525808306486312868092094709254446973240693245640735124383753810943940731642145971";

    /// 2048-bit modulus whose first encoded byte has the high bit set.
    const MODULUS_B: &str = "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw";

    const MODULUS_B_DECIMAL: &str = "26634547600177008912365441464036882611104634136430581696102639463075266436216946316053845642300166320042915031924501272705275043130211783228252369194856949397782880847235143381529207382262647906987655738647387007320361149854766523417293323739185308113373529512728932838100141612048712597178695720651344295450174895369923383396704334331627261565907266749863744707920606364678231639106403854977302183719246256958550651555767664134467706614553219592981545363271425781391262006405169505726523023628770285432062044391310047445749287563161668548354322560223509946990827691654627968182167826397015368836435965354956581554819";

    const EC_KEY: &str = r#"{"kty":"EC","crv":"P-256","x":"MKBCTNIcKUSDii11ySs3526iDZ8AiTo7Tu6KPAqv7D4","y":"4Etl6SRW2YiLUrN5vfvVHuhp7x8PxltmWWlbbM4IFyM","use":"enc","kid":"1"}"#;

    fn rsa_key(n: &str) -> Value {
        json!({"kty": "RSA", "use": "sig", "n": n, "e": "AQAB"})
    }

    // --- Original extraction cases ---

    #[test]
    fn test_single_rsa_key_yields_one_key() {
        let keys = extract_rsa_public_keys(&rsa_key(MODULUS_A));

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].modulus().to_string(), MODULUS_A_DECIMAL);
        assert_eq!(keys[0].exponent(), &BigUint::from(65537u32));
        assert_eq!(keys[0].modulus_bits(), 2048);
    }

    #[test]
    fn test_single_ec_key_yields_nothing() {
        let keys = extract_rsa_public_keys_from_str(EC_KEY).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_mixed_set_yields_only_rsa_key() {
        let input = format!(
            r#"{{"keys":[{EC_KEY},{{"kty":"RSA","n":"{MODULUS_B}","e":"AQAB","alg":"RS256","kid":"2011-04-29"}}]}}"#
        );
        let keys = extract_rsa_public_keys_from_str(&input).unwrap();

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].kid(), Some("2011-04-29"));
        assert_eq!(keys[0].modulus().to_string(), MODULUS_B_DECIMAL);
    }

    #[test]
    fn test_two_rsa_keys_keep_input_order() {
        let set = json!({"keys": [rsa_key(MODULUS_A), rsa_key(MODULUS_B)]});
        let keys = extract_rsa_public_keys(&set);

        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].modulus().to_string(), MODULUS_A_DECIMAL);
        assert_eq!(keys[1].modulus().to_string(), MODULUS_B_DECIMAL);
        assert!(keys.iter().all(|k| k.exponent() == &BigUint::from(65537u32)));
    }

    #[test]
    fn test_high_bit_modulus_is_never_sign_extended() {
        let keys = extract_rsa_public_keys(&rsa_key(MODULUS_B));
        let expected = decode_segment_with_limits(MODULUS_B, &Limits::default()).unwrap();
        assert!(expected[0] & 0x80 != 0);
        assert_eq!(keys[0].modulus().to_bytes_be(), expected);
    }

    #[test]
    fn test_wrapped_modulus_with_whitespace_is_accepted() {
        let wrapped = format!(
            "{} {}\n{}",
            &MODULUS_B[..100],
            &MODULUS_B[100..200],
            &MODULUS_B[200..]
        );
        let keys = extract_rsa_public_keys(&rsa_key(&wrapped));
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].modulus().to_string(), MODULUS_B_DECIMAL);
    }

    // --- Best-effort skipping ---

    #[test]
    fn test_candidate_missing_modulus_is_skipped() {
        let set = json!({"keys": [
            {"kty": "RSA", "e": "AQAB", "kid": "broken"},
            {"kty": "RSA", "n": MODULUS_A, "e": "AQAB", "kid": "good"},
        ]});
        let keys = extract_rsa_public_keys(&set);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].kid(), Some("good"));
    }

    #[test]
    fn test_candidate_with_undecodable_exponent_is_skipped() {
        let set = json!({"keys": [
            {"kty": "RSA", "n": MODULUS_A, "e": "!!"},
            {"kty": "RSA", "n": MODULUS_A, "e": ""},
            {"kty": "RSA", "n": 12345, "e": "AQAB"},
        ]});
        assert!(extract_rsa_public_keys(&set).is_empty());
    }

    #[test]
    fn test_candidate_without_kty_is_skipped() {
        let set = json!({"keys": [{"n": MODULUS_A, "e": "AQAB"}, rsa_key(MODULUS_B)]});
        let document = KeyDocument::from_value(&set);
        assert_eq!(document.candidates()[0], Err(SkipReason::MissingKeyType));
        assert_eq!(document.rsa_public_keys(&Limits::default()).len(), 1);
    }

    #[test]
    fn test_kty_is_matched_exactly() {
        let key = json!({"kty": "rsa", "n": MODULUS_A, "e": "AQAB"});
        assert!(extract_rsa_public_keys(&key).is_empty());
        assert_eq!(
            KeyDescriptor::from_value(&key),
            Err(SkipReason::UnsupportedKeyType("rsa".to_string()))
        );
    }

    #[test]
    fn test_mistyped_optional_fields_do_not_reject_key() {
        let key = json!({"kty": "RSA", "n": MODULUS_A, "e": "AQAB", "kid": 7, "use": ["sig"]});
        let keys = extract_rsa_public_keys(&key);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].kid(), None);
    }

    #[test]
    fn test_set_ignores_its_own_top_level_fields() {
        let set = json!({"kty": "RSA", "n": MODULUS_A, "e": "AQAB", "keys": []});
        assert!(extract_rsa_public_keys(&set).is_empty());
    }

    #[test]
    fn test_non_array_keys_is_an_empty_set() {
        let set = json!({"keys": rsa_key(MODULUS_A)});
        assert_eq!(KeyDocument::from_value(&set), KeyDocument::Set(Vec::new()));
    }

    #[test]
    fn test_non_object_documents_yield_nothing() {
        for value in [json!([rsa_key(MODULUS_A)]), json!("RSA"), json!(null), json!(42)] {
            assert!(extract_rsa_public_keys(&value).is_empty());
        }
    }

    #[test]
    fn test_identical_keys_are_not_deduplicated() {
        let set = json!({"keys": [rsa_key(MODULUS_A), rsa_key(MODULUS_A)]});
        let keys = extract_rsa_public_keys(&set);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], keys[1]);
    }

    #[test]
    fn test_oversized_component_is_skipped() {
        let extractor = KeyExtractor::new(Limits::default().with_max_segment_len(16));
        assert!(extractor.rsa_public_keys(&rsa_key(MODULUS_A)).is_empty());
    }

    // --- Top-level failures ---

    #[test]
    fn test_malformed_json_is_a_key_parse_error() {
        let err = extract_rsa_public_keys_from_str(r#"{"keys": [ {"kty": "RSA""#).unwrap_err();
        assert!(matches!(err, JoseError::KeyParseError { .. }));
    }

    #[test]
    fn test_oversized_document_is_a_key_parse_error() {
        let extractor = KeyExtractor::new(Limits::default().with_max_key_document_len(10));
        let err = extractor.rsa_public_keys_from_str(EC_KEY).unwrap_err();
        assert!(matches!(
            err,
            JoseError::KeyParseError { reason } if reason.contains("exceeds the maximum")
        ));
    }

    #[test]
    fn test_deeply_nested_json_fails_without_overflow() {
        let nested = format!("{}{}", "[".repeat(10_000), "]".repeat(10_000));
        assert!(extract_rsa_public_keys_from_str(&nested).is_err());
    }

    // --- Descriptor variants ---

    #[test]
    fn test_ec_descriptor_is_parsed_into_its_variant() {
        let document = KeyDocument::parse(EC_KEY.as_bytes(), &Limits::default()).unwrap();
        let descriptors: Vec<_> = document.descriptors().collect();
        assert_eq!(descriptors.len(), 1);
        match descriptors[0] {
            KeyDescriptor::Ec(ec) => {
                assert_eq!(ec.crv, "P-256");
                assert_eq!(ec.key_use.as_deref(), Some("enc"));
            }
            other => panic!("expected EC descriptor, got {other:?}"),
        }
        assert_eq!(descriptors[0].kid(), Some("1"));
    }

    #[test]
    fn test_ec_descriptor_missing_coordinate_is_invalid() {
        let candidate = KeyDescriptor::from_value(&json!({"kty": "EC", "crv": "P-256", "x": "AA"}));
        assert!(matches!(
            candidate,
            Err(SkipReason::InvalidFields { kty, .. }) if kty == "EC"
        ));
    }

    #[test]
    fn test_oct_descriptor_debug_redacts_secret() {
        let candidate =
            KeyDescriptor::from_value(&json!({"kty": "oct", "k": "c2VjcmV0", "kid": "hmac"}));
        let descriptor = candidate.unwrap();
        assert_eq!(descriptor.kty(), "oct");
        let debug_output = format!("{descriptor:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("c2VjcmV0"));
    }

    // --- Conversions, checked against an independently generated key pair ---

    const FIXTURE_JWKS: &str = include_str!("../../tests/fixtures/jwks.json");

    #[test]
    fn test_fixture_key_matches_pem_public_key() {
        let keys = extract_rsa_public_keys_from_str(FIXTURE_JWKS).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].kid(), Some("fixture-rsa"));

        let pem_key =
            RsaPublicKey::from_public_key_pem(include_str!("../../tests/fixtures/rsa_public.pem"))
                .unwrap();
        assert_eq!(keys[0].to_rsa_public_key().unwrap(), pem_key);
    }

    #[test]
    fn test_decoding_key_verifies_token_signed_by_fixture_key() {
        let keys = extract_rsa_public_keys_from_str(FIXTURE_JWKS).unwrap();

        let encoding_key =
            EncodingKey::from_rsa_pem(include_bytes!("../../tests/fixtures/rsa_private.pem"))
                .unwrap();
        let claims = json!({"sub": "1234567890", "name": "Test User", "iat": 1516239022});
        let token = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        let decoded = decode::<Value>(&token, &keys[0].to_decoding_key(), &validation).unwrap();
        assert_eq!(decoded.claims["sub"], "1234567890");
    }

    #[test]
    fn test_rsa_crate_rejects_unusable_exponent() {
        let key = RsaPublicKeyMaterial::new(BigUint::from(3233u32), BigUint::from(1u32));
        let err = key.to_rsa_public_key().unwrap_err();
        assert!(matches!(err, JoseError::InvalidKeyMaterial { .. }));
    }
}
