//! Random password generation.
//!
//! Characters are sampled *without replacement* from a fixed 94-character
//! alphabet, so a password never repeats a character and its length is
//! bounded by the alphabet size.

use crate::error::{PwdmError, Result};
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Shortest password the tool will produce or accept as a length.
pub const MIN_LENGTH: usize = 8;
/// Longest password possible without repeating a character.
pub const MAX_LENGTH: usize = LOWERCASE.len() + UPPERCASE.len() + DIGITS.len() + SYMBOLS.len();

pub fn alphabet() -> Vec<u8> {
    [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS].concat()
}

/// Rejects lengths outside `MIN_LENGTH..=MAX_LENGTH`.
pub fn validate_length(length: usize) -> Result<()> {
    if length < MIN_LENGTH {
        return Err(PwdmError::Validation(format!(
            "A password must contain at least {} characters",
            MIN_LENGTH
        )));
    }
    if length > MAX_LENGTH {
        return Err(PwdmError::Validation(format!(
            "A password cannot be longer than {} characters",
            MAX_LENGTH
        )));
    }
    Ok(())
}

/// Checks a password chosen by the user rather than generated. Only the
/// minimum applies, since a chosen password may repeat characters.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_LENGTH {
        return Err(PwdmError::Validation(format!(
            "A password must contain at least {} characters",
            MIN_LENGTH
        )));
    }
    Ok(())
}

/// Parses a length typed by a human and validates it.
pub fn parse_length(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    let length = trimmed.parse::<usize>().map_err(|_| {
        PwdmError::Validation(format!("`{}` is not a positive integer", trimmed))
    })?;
    validate_length(length)?;
    Ok(length)
}

/// Generates a password using the thread-local CSPRNG.
pub fn generate(length: usize) -> Result<String> {
    generate_with(&mut rand::thread_rng(), length)
}

pub fn generate_with<R: Rng + CryptoRng + ?Sized>(rng: &mut R, length: usize) -> Result<String> {
    validate_length(length)?;

    let mut pool = alphabet();
    let (chosen, _) = pool.partial_shuffle(rng, length);

    // the alphabet is ASCII, so every byte is a char
    Ok(chosen.iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_94_distinct_characters() {
        let set: HashSet<u8> = alphabet().into_iter().collect();
        assert_eq!(set.len(), 94);
        assert_eq!(MAX_LENGTH, 94);
        assert!(set.iter().all(|b| b.is_ascii_graphic()));
    }

    #[test]
    fn test_generate_exact_length_without_repeats() {
        let allowed: HashSet<char> = alphabet().into_iter().map(char::from).collect();
        let mut rng = StdRng::seed_from_u64(7);

        for length in MIN_LENGTH..=MAX_LENGTH {
            let password = generate_with(&mut rng, length).unwrap();
            let chars: HashSet<char> = password.chars().collect();
            assert_eq!(password.chars().count(), length);
            assert_eq!(chars.len(), length, "repeated character in {}", password);
            assert!(chars.is_subset(&allowed));
        }
    }

    #[test]
    fn test_full_length_uses_whole_alphabet() {
        let password = generate(MAX_LENGTH).unwrap();
        let mut sorted: Vec<u8> = password.into_bytes();
        sorted.sort_unstable();
        let mut expected = alphabet();
        expected.sort_unstable();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_generate_is_not_fixed() {
        let outputs: HashSet<String> = (0..20).map(|_| generate(8).unwrap()).collect();
        assert!(outputs.len() > 1);
    }

    #[test]
    fn test_generated_password_never_contains_separator() {
        for _ in 0..200 {
            let password = generate(MAX_LENGTH).unwrap();
            assert!(!password.contains(": "));
        }
    }

    #[test]
    fn test_rejects_out_of_range_lengths() {
        assert!(matches!(generate(7), Err(PwdmError::Validation(_))));
        assert!(matches!(generate(0), Err(PwdmError::Validation(_))));
        assert!(matches!(generate(95), Err(PwdmError::Validation(_))));
    }

    #[test]
    fn test_validate_password_counts_characters() {
        assert!(validate_password("x").is_err());
        assert!(validate_password("ééééééé").is_err());
        assert!(validate_password("éééééééé").is_ok());
        assert!(validate_password(&"a".repeat(MAX_LENGTH + 10)).is_ok());
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("12").unwrap(), 12);
        assert_eq!(parse_length(" 8\n").unwrap(), 8);
        assert!(parse_length("7").is_err());
        assert!(parse_length("-3").is_err());
        assert!(parse_length("twelve").is_err());
        assert!(parse_length("").is_err());
    }
}
