//! Password generation from an alphabet using the operating system CSPRNG.
//!
//! Each position is drawn independently. Indices are produced by rejection
//! sampling so every character of the alphabet is equally likely.

use ring::rand::{SecureRandom, SystemRandom};
use tracing::debug;
use zeroize::Zeroizing;

use crate::types::errors::GenerationError;
use crate::types::password::Password;
use crate::types::settings::MAX_PASSWORD_LENGTH;

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fills `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), GenerationError>;
}

impl EntropySource for SystemRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), GenerationError> {
        SecureRandom::fill(self, dest).map_err(|_| {
            GenerationError::RandomSource("system random source unavailable".to_string())
        })
    }
}

/// Trait defining password generation.
pub trait PasswordGeneratorTrait {
    /// Generates a password of exactly `length` characters drawn from `alphabet`.
    ///
    /// `alphabet` is expected to hold distinct characters; duplicates would
    /// weight the draw towards them.
    fn generate(&self, alphabet: &[char], length: usize) -> Result<Password, GenerationError>;
}

/// Password generator backed by an [`EntropySource`], `SystemRandom` by default.
pub struct PasswordGenerator<R: EntropySource = SystemRandom> {
    rng: R,
}

impl PasswordGenerator {
    /// Creates a generator backed by the operating system random source.
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: EntropySource> PasswordGenerator<R> {
    /// Creates a generator backed by a custom source.
    pub fn with_source(rng: R) -> Self {
        Self { rng }
    }

    /// Draws `count` indices uniformly from `0..n`.
    fn sample_indices(&self, n: usize, count: usize) -> Result<Zeroizing<Vec<usize>>, GenerationError> {
        let mut indices = Zeroizing::new(Vec::with_capacity(count));

        if n <= 256 {
            // Bytes at or above `zone` would bias the low indices.
            let zone = 256 - (256 % n);
            let mut buf = Zeroizing::new(vec![0u8; count]);
            while indices.len() < count {
                self.rng.fill(&mut buf)?;
                for &b in buf.iter() {
                    if (b as usize) < zone {
                        indices.push(b as usize % n);
                        if indices.len() == count {
                            break;
                        }
                    }
                }
            }
        } else {
            let span = 1u64 << 32;
            let zone = span - (span % n as u64);
            let mut buf = Zeroizing::new(vec![0u8; count * 4]);
            while indices.len() < count {
                self.rng.fill(&mut buf)?;
                for chunk in buf.chunks_exact(4) {
                    let v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as u64;
                    if v < zone {
                        indices.push((v % n as u64) as usize);
                        if indices.len() == count {
                            break;
                        }
                    }
                }
            }
        }

        Ok(indices)
    }
}

impl<R: EntropySource> PasswordGeneratorTrait for PasswordGenerator<R> {
    fn generate(&self, alphabet: &[char], length: usize) -> Result<Password, GenerationError> {
        if alphabet.is_empty() {
            return Err(GenerationError::EmptyAlphabet);
        }
        if length == 0 || length > MAX_PASSWORD_LENGTH {
            return Err(GenerationError::InvalidLength(length));
        }

        let indices = self.sample_indices(alphabet.len(), length)?;
        let password: String = indices.iter().map(|&i| alphabet[i]).collect();

        debug!(length, alphabet_size = alphabet.len(), "generated password");
        Ok(Password::new(password))
    }
}
