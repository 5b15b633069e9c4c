//! ETH Key Gen - deterministic Ethereum credentials from user-controllable entropy
//!
//! The pipeline runs entropy → BIP-39 mnemonic → seed → BIP-32 key at
//! `m/44'/60'/0'/0/0` → secp256k1 public key → EIP-55 address. Every stage is
//! a pure function of its input except entropy collection.

pub mod error;
pub mod crypto;
pub mod account;

// Re-export commonly used types for convenience
pub use account::{Address, CredentialResult};
pub use crypto::entropy::EntropyMode;
pub use error::{Error, MnemonicError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
