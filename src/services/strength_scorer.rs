//! Content-based password strength scoring.
//!
//! The score looks only at the password itself, never at the classes that
//! were requested when it was generated.

use crate::types::charset::SYMBOLS;
use crate::types::strength::StrengthLevel;

/// Minimum length (in characters) that earns the length point.
pub const STRONG_LENGTH: usize = 12;

/// Returns the raw score, 0 to 5.
///
/// Letter case is judged by Unicode rules, so `é` counts as lowercase. The
/// digit point is only earned by ASCII `0`-`9`, the same digits the generator
/// draws from; other scripts' digits such as `٣` earn nothing.
pub fn points(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= STRONG_LENGTH,
        password.chars().any(char::is_lowercase),
        password.chars().any(char::is_uppercase),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| SYMBOLS.contains(c)),
    ];
    checks.iter().filter(|passed| **passed).count() as u8
}

/// Classifies a password: 0-2 points is weak, 3-4 medium, 5 strong.
pub fn score(password: &str) -> StrengthLevel {
    match points(password) {
        0..=2 => StrengthLevel::Weak,
        3..=4 => StrengthLevel::Medium,
        _ => StrengthLevel::Strong,
    }
}
