//! Pairing codes.
//!
//! The mother's client generates a code and shares it out of band; the father
//! types it in. The code is otherwise opaque.

use rand::Rng;

pub const PAIRING_CODE_PREFIX: &str = "GRATIA-";

/// Generates a code like `GRATIA-7K2Q`.
pub fn generate_pairing_code() -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{PAIRING_CODE_PREFIX}{suffix}")
}

/// Cleans a code typed by the partner. Returns `None` for blank input.
pub fn normalize_pairing_code(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        let code = generate_pairing_code();
        assert!(code.starts_with(PAIRING_CODE_PREFIX));
        let suffix = &code[PAIRING_CODE_PREFIX.len()..];
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_pairing_code("  GRATIA-AB12 \n").as_deref(), Some("GRATIA-AB12"));
        assert_eq!(normalize_pairing_code("   "), None);
    }
}
