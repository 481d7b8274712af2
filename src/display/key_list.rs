//! Rendering of extracted RSA public keys.

use jose_probe::{RsaPublicKeyMaterial, encode_segment};
use serde_json::{Value, json};

use super::json_printer::print_json;

/// Print a numbered summary of each key.
pub fn print_keys(keys: &[RsaPublicKeyMaterial]) {
    if keys.is_empty() {
        println!("No RSA public keys found");
        return;
    }

    println!("Found {} RSA public key(s)", keys.len());
    for (index, key) in keys.iter().enumerate() {
        println!();
        println!("--- Key {index} ---");
        println!("kid:      {}", key.kid().unwrap_or("(none)"));
        println!("size:     {} bits", key.modulus_bits());
        println!("exponent: {}", key.exponent());
        println!("n:        {}", encode_segment(&key.modulus().to_bytes_be()));
    }
}

/// JSON representation of one key. Components are re-encoded as base64url.
pub fn key_to_json(key: &RsaPublicKeyMaterial) -> Value {
    json!({
        "kid": key.kid(),
        "modulus_bits": key.modulus_bits(),
        "exponent": key.exponent().to_string(),
        "n": encode_segment(&key.modulus().to_bytes_be()),
        "e": encode_segment(&key.exponent().to_bytes_be()),
    })
}

/// Print the keys as a JSON array.
pub fn print_keys_json(keys: &[RsaPublicKeyMaterial]) {
    print_json(&Value::Array(keys.iter().map(key_to_json).collect()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::BigUint;

    #[test]
    fn test_key_to_json_reencodes_components() {
        let key = RsaPublicKeyMaterial::new(BigUint::from(0xd2fc_u32), BigUint::from(65537_u32));
        let value = key_to_json(&key);

        assert_eq!(value["kid"], Value::Null);
        assert_eq!(value["modulus_bits"], 16);
        assert_eq!(value["exponent"], "65537");
        assert_eq!(value["n"], "0vw");
        assert_eq!(value["e"], "AQAB");
    }
}
