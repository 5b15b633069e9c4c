//! Ethereum key derivation

use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::derivation::{ExtendedPrivateKey, ETHEREUM_DERIVATION_PATH};
use crate::account::address::Address;
use crate::crypto::mnemonic::Seed;
use crate::error::{Error, Result};

/// Uncompressed SEC1 public key length (0x04 || x || y)
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// Compressed SEC1 public key length (0x02/0x03 || x)
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// A secp256k1 private key
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Create a private key from bytes, rejecting zero and values >= n
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self> {
        SecretKey::from_slice(&bytes)
            .map_err(|e| Error::InvalidDerivationResult(format!("Invalid secret key: {}", e)))?;
        Ok(Self(bytes))
    }

    /// Get the raw private key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrivateKey").field(&"[REDACTED]").finish()
    }
}

/// Both SEC1 encodings of one secp256k1 point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    uncompressed: [u8; UNCOMPRESSED_PUBLIC_KEY_LEN],
    compressed: [u8; COMPRESSED_PUBLIC_KEY_LEN],
}

impl PublicKey {
    /// Compute the public point for a private key
    pub fn from_private_key(private_key: &PrivateKey) -> Result<Self> {
        let secp = Secp256k1::signing_only();
        let secret = SecretKey::from_slice(private_key.as_bytes())
            .map_err(|e| Error::InvalidDerivationResult(format!("Invalid secret key: {}", e)))?;
        let point = Secp256k1PublicKey::from_secret_key(&secp, &secret);

        Ok(Self {
            uncompressed: point.serialize_uncompressed(),
            compressed: point.serialize(),
        })
    }

    /// 0x04 || x || y
    pub fn uncompressed(&self) -> &[u8; UNCOMPRESSED_PUBLIC_KEY_LEN] {
        &self.uncompressed
    }

    /// 0x02 or 0x03 (y parity) || x
    pub fn compressed(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LEN] {
        &self.compressed
    }

    /// The 64-byte x || y pair hashed into the address
    pub fn coordinates(&self) -> &[u8] {
        &self.uncompressed[1..]
    }
}

/// Calculate the Keccak-256 hash of data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Key material for one Ethereum account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthereumKeys {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
    pub address: Address,
}

impl EthereumKeys {
    /// Compute the public key and address for a private key
    pub fn from_private_key(private_key: PrivateKey) -> Result<Self> {
        let public_key = PublicKey::from_private_key(&private_key)?;
        let address = Address::from_public_key(&public_key);
        Ok(Self { private_key, public_key, address })
    }
}

/// Derive the keys at `m/44'/60'/0'/0/0` from a BIP-39 seed
#[tracing::instrument(skip_all)]
pub fn derive_ethereum_keys(seed: &Seed) -> Result<EthereumKeys> {
    let secp = Secp256k1::new();

    let master = ExtendedPrivateKey::master(seed.as_bytes())?;
    let account = master.derive_path(&secp, &ETHEREUM_DERIVATION_PATH)?;
    let keys = EthereumKeys::from_private_key(PrivateKey::from_bytes(*account.secret_bytes())?)?;

    tracing::debug!(address = %keys.address, "derived ethereum account");
    Ok(keys)
}
