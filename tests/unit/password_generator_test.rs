//! Unit tests for the PasswordGenerator.
//!
//! Covers length bounds, alphabet membership, and the error paths, using the
//! system random source.

use std::collections::HashSet;

use rstest::rstest;

use passgen::services::charset_builder::build_charset;
use passgen::services::password_generator::{
    EntropySource, PasswordGenerator, PasswordGeneratorTrait,
};
use passgen::types::charset::CharacterClass;
use passgen::types::errors::GenerationError;
use passgen::types::settings::MAX_PASSWORD_LENGTH;

fn all_chars() -> Vec<char> {
    build_charset(&CharacterClass::ALL).unwrap().chars().to_vec()
}

#[rstest]
#[case(1)]
#[case(8)]
#[case(12)]
#[case(MAX_PASSWORD_LENGTH)]
fn test_generates_exact_length(#[case] length: usize) {
    let generator = PasswordGenerator::new();
    let password = generator.generate(&all_chars(), length).unwrap();
    assert_eq!(password.len(), length);
}

#[test]
fn test_zero_length_is_invalid() {
    let generator = PasswordGenerator::new();
    let result = generator.generate(&all_chars(), 0);
    assert_eq!(result.unwrap_err(), GenerationError::InvalidLength(0));
}

#[test]
fn test_length_above_cap_is_invalid() {
    let generator = PasswordGenerator::new();
    let result = generator.generate(&all_chars(), MAX_PASSWORD_LENGTH + 1);
    assert_eq!(
        result.unwrap_err(),
        GenerationError::InvalidLength(MAX_PASSWORD_LENGTH + 1)
    );
}

#[test]
fn test_empty_alphabet_is_rejected() {
    let generator = PasswordGenerator::new();
    let result = generator.generate(&[], 12);
    assert_eq!(result.unwrap_err(), GenerationError::EmptyAlphabet);
}

#[test]
fn test_single_character_alphabet() {
    let generator = PasswordGenerator::new();
    let password = generator.generate(&['x'], 5).unwrap();
    assert_eq!(password.as_str(), "xxxxx");
}

#[test]
fn test_digits_only_password_contains_only_digits() {
    let generator = PasswordGenerator::new();
    let alphabet = build_charset(&[CharacterClass::Digit]).unwrap();
    for _ in 0..50 {
        let password = generator.generate(alphabet.chars(), 32).unwrap();
        assert!(password.as_str().chars().all(|c| c.is_ascii_digit()));
    }
}

/// Over many draws every character of a small alphabet should appear.
#[test]
fn test_every_character_is_reachable() {
    let generator = PasswordGenerator::new();
    let alphabet = build_charset(&[CharacterClass::Digit]).unwrap();
    let mut seen = HashSet::new();
    for _ in 0..20 {
        let password = generator.generate(alphabet.chars(), 64).unwrap();
        seen.extend(password.as_str().chars());
    }
    assert_eq!(seen.len(), 10);
}

#[test]
fn test_consecutive_passwords_differ() {
    let generator = PasswordGenerator::new();
    let a = generator.generate(&all_chars(), 32).unwrap();
    let b = generator.generate(&all_chars(), 32).unwrap();
    assert_ne!(a, b);
}

struct FailingSource;

impl EntropySource for FailingSource {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), GenerationError> {
        Err(GenerationError::RandomSource("no entropy".to_string()))
    }
}

#[test]
fn test_random_source_failure_is_reported() {
    let generator = PasswordGenerator::with_source(FailingSource);
    let result = generator.generate(&all_chars(), 12);
    assert!(matches!(result, Err(GenerationError::RandomSource(_))));
}

#[test]
fn test_debug_output_hides_password() {
    let generator = PasswordGenerator::new();
    let password = generator.generate(&['s'], 4).unwrap();
    assert_eq!(format!("{:?}", password), "Password(<4 chars>)");
}
