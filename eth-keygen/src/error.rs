//! Error types for the eth-keygen library

use thiserror::Error;

/// Custom error type for eth-keygen operations
///
/// Every variant is final for the attempt that produced it: the pipeline is
/// deterministic, so repeating a call with the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid entropy length: expected {expected} bytes, got {actual}")]
    InvalidEntropyLength { expected: usize, actual: usize },

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] MnemonicError),

    #[error("Invalid derivation result: {0}")]
    InvalidDerivationResult(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Reasons a mnemonic phrase is rejected
///
/// Words are reported by position only. The phrase is secret material and
/// must not end up in logs or error messages.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("expected 12 words, got {0}")]
    InvalidWordCount(usize),

    #[error("word {position} is not in the BIP-39 English wordlist")]
    UnknownWord { position: usize },

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("phrase matches more than one wordlist")]
    AmbiguousLanguage,
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        match err {
            bip39::Error::BadWordCount(count) => MnemonicError::InvalidWordCount(count).into(),
            bip39::Error::UnknownWord(index) => MnemonicError::UnknownWord { position: index + 1 }.into(),
            bip39::Error::InvalidChecksum => MnemonicError::ChecksumMismatch.into(),
            bip39::Error::AmbiguousLanguages(_) => MnemonicError::AmbiguousLanguage.into(),
            bip39::Error::BadEntropyBitCount(bits) => Error::InvalidEntropyLength {
                expected: crate::crypto::entropy::ENTROPY_LEN,
                actual: bits / 8,
            },
        }
    }
}

/// Result type for eth-keygen operations
pub type Result<T> = std::result::Result<T, Error>;
