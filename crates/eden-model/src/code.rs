//! Region-code normalization.
//!
//! External boundary releases are inconsistent about how they store codes:
//! the same region may appear as `7`, `"07"`, or `" 7 "` depending on the
//! release. Everything that compares codes goes through [`normalize_code`]
//! so that those representations match.

use serde::{Deserialize, Serialize};

/// A raw region code as it appears in the catalog or an attribute table:
/// either a bare integer or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    Int(i64),
    Text(String),
}

impl RawCode {
    /// Normalize this raw code; see [`normalize_code`].
    pub fn normalize(&self) -> String {
        match self {
            RawCode::Int(value) => normalize_code(&value.to_string()),
            RawCode::Text(text) => normalize_code(text),
        }
    }
}

/// Normalize an optional raw code. Absent codes normalize to the empty
/// string, which is never a valid code.
pub fn normalize_raw(raw: Option<&RawCode>) -> String {
    raw.map(RawCode::normalize).unwrap_or_default()
}

/// Normalize a region code to a comparable string.
///
/// Trims the input, extracts the first contiguous run of ASCII letters and
/// digits, and strips leading zeros from purely numeric tokens via an
/// integer round-trip, so `"07"`, `" 7 "` and `7` all normalize to `"7"`
/// and `"000"` to `"0"`. Non-numeric tokens such as `"56h"` pass through
/// unchanged, case preserved. Returns `""` when no token is found.
pub fn normalize_code(raw: &str) -> String {
    let mut token = String::new();
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            token.push(ch);
        } else if !token.is_empty() {
            break;
        }
    }
    if token.is_empty() {
        return String::new();
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        match token.parse::<u64>() {
            Ok(value) => value.to_string(),
            // Numeric runs too long for u64: strip leading zeros directly.
            Err(_) => {
                let stripped = token.trim_start_matches('0');
                if stripped.is_empty() {
                    "0".to_string()
                } else {
                    stripped.to_string()
                }
            }
        }
    } else {
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_codes_strip_leading_zeros() {
        assert_eq!(normalize_code("07"), "7");
        assert_eq!(normalize_code(" 7 "), "7");
        assert_eq!(RawCode::Int(7).normalize(), "7");
        assert_eq!(normalize_code("000"), "0");
    }

    #[test]
    fn emptyish_inputs_normalize_to_empty() {
        assert_eq!(normalize_raw(None), "");
        assert_eq!(normalize_code(""), "");
        assert_eq!(normalize_code("   "), "");
        assert_eq!(normalize_code("--"), "");
    }

    #[test]
    fn non_numeric_tokens_pass_through() {
        assert_eq!(normalize_code("56h"), "56h");
        assert_eq!(normalize_code(" 56h "), "56h");
        assert_eq!(normalize_code("56h / extra"), "56h");
    }

    #[test]
    fn first_token_wins() {
        assert_eq!(normalize_code("eco-07"), "eco");
        assert_eq!(normalize_code("(07)"), "7");
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "\\PC{0,24}") {
            let once = normalize_code(&raw);
            prop_assert_eq!(normalize_code(&once), once);
        }

        #[test]
        fn zero_padded_integers_match_bare(value in 0u32..100_000, pad in 0usize..4) {
            let padded = format!("{:0width$}", value, width = pad + value.to_string().len());
            prop_assert_eq!(normalize_code(&padded), value.to_string());
        }
    }
}
