//! Entropy collection and mixing

use rand::{rngs::OsRng, CryptoRng, RngCore};
use sha3::{Digest, Keccak256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Entropy length in bytes (128 bits, 12 mnemonic words)
pub const ENTROPY_LEN: usize = 16;

/// How the entropy for a new credential is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyMode<'a> {
    /// 16 bytes straight from the CSPRNG
    Random,
    /// User text mixed with 16 fresh random bytes through Keccak-256
    UserSeeded(&'a str),
}

/// 128 bits of mnemonic entropy
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy([u8; ENTROPY_LEN]);

impl Entropy {
    /// Wrap exactly 16 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; ENTROPY_LEN] = bytes.try_into().map_err(|_| Error::InvalidEntropyLength {
            expected: ENTROPY_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(bytes))
    }

    /// Get the raw entropy bytes
    pub fn as_bytes(&self) -> &[u8; ENTROPY_LEN] {
        &self.0
    }
}

impl From<[u8; ENTROPY_LEN]> for Entropy {
    fn from(bytes: [u8; ENTROPY_LEN]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Entropy").field(&"[REDACTED]").finish()
    }
}

/// Generate entropy from the operating system RNG
pub fn generate_entropy(mode: EntropyMode<'_>) -> Entropy {
    generate_entropy_with(&mut OsRng, mode)
}

/// Generate entropy from a caller-supplied CSPRNG
pub fn generate_entropy_with<R>(rng: &mut R, mode: EntropyMode<'_>) -> Entropy
where
    R: RngCore + CryptoRng,
{
    let mut random = [0u8; ENTROPY_LEN];
    rng.fill_bytes(&mut random);

    let entropy = match mode {
        EntropyMode::Random => {
            tracing::debug!("drew random entropy");
            Entropy(random)
        }
        EntropyMode::UserSeeded(text) => {
            tracing::debug!(user_bytes = text.len(), "mixing user text into entropy");
            mix_user_entropy(&random, text.as_bytes())
        }
    };

    random.zeroize();
    entropy
}

/// keccak256(random || user)[..16]
fn mix_user_entropy(random: &[u8; ENTROPY_LEN], user: &[u8]) -> Entropy {
    let mut hasher = Keccak256::new();
    hasher.update(random);
    hasher.update(user);
    let mut digest: [u8; 32] = hasher.finalize().into();

    let mut bytes = [0u8; ENTROPY_LEN];
    bytes.copy_from_slice(&digest[..ENTROPY_LEN]);
    digest.zeroize();

    Entropy(bytes)
}
