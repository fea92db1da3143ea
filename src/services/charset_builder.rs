//! Maps a selection of character classes to the alphabet passwords are drawn from.

use crate::types::charset::{Alphabet, CharacterClass};
use crate::types::errors::GenerationError;

/// Concatenates the alphabets of the selected classes.
///
/// The result always follows class declaration order (upper, lower, digit,
/// symbol), whatever order the classes were given in. Repeated classes are
/// counted once.
pub fn build_charset<'a, I>(classes: I) -> Result<Alphabet, GenerationError>
where
    I: IntoIterator<Item = &'a CharacterClass>,
{
    let selected: Vec<CharacterClass> = classes.into_iter().copied().collect();

    let chars: Vec<char> = CharacterClass::ALL
        .iter()
        .filter(|class| selected.contains(*class))
        .flat_map(|class| class.alphabet().chars())
        .collect();

    if chars.is_empty() {
        return Err(GenerationError::EmptySelection);
    }

    Ok(Alphabet::from_chars(chars))
}
