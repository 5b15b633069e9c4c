//! BIP-32 hierarchical key derivation over secp256k1

use std::fmt;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

const HARDENED_OFFSET: u32 = 0x8000_0000;
const MASTER_KEY: &[u8] = b"Bitcoin seed";

/// One step of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildIndex {
    /// Derived from the parent private key
    Hardened(u32),
    /// Derived from the parent public key
    Normal(u32),
}

impl ChildIndex {
    /// The 32-bit index as serialized into the HMAC input
    pub fn to_u32(self) -> u32 {
        match self {
            Self::Hardened(i) => i | HARDENED_OFFSET,
            Self::Normal(i) => i,
        }
    }

    pub fn is_hardened(self) -> bool {
        matches!(self, Self::Hardened(_))
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hardened(i) => write!(f, "{}'", i),
            Self::Normal(i) => write!(f, "{}", i),
        }
    }
}

/// Ethereum account 0, external chain, address 0
pub const ETHEREUM_DERIVATION_PATH: [ChildIndex; 5] = [
    ChildIndex::Hardened(44),
    ChildIndex::Hardened(60),
    ChildIndex::Hardened(0),
    ChildIndex::Normal(0),
    ChildIndex::Normal(0),
];

/// Render a path as `m/44'/60'/0'/0/0`
pub fn format_path(path: &[ChildIndex]) -> String {
    path.iter().fold(String::from("m"), |mut acc, index| {
        acc.push('/');
        acc.push_str(&index.to_string());
        acc
    })
}

/// A private key together with its chain code
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedPrivateKey {
    secret: [u8; 32],
    chain_code: [u8; 32],
}

impl fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("secret", &"[REDACTED]")
            .field("chain_code", &hex::encode(self.chain_code))
            .finish()
    }
}

/// HMAC-SHA512(key, data) split into its left and right halves
fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(key)
        .map_err(|_| Error::InvalidDerivationResult("HMAC error".to_string()))?;
    hmac.update(data);
    let mut result = hmac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&result[0..32]);
    right.copy_from_slice(&result[32..64]);
    result.as_mut_slice().zeroize();

    Ok((left, right))
}

impl ExtendedPrivateKey {
    /// Derive the master key from a seed
    pub fn master(seed: &[u8]) -> Result<Self> {
        let (mut secret, chain_code) = hmac_sha512(MASTER_KEY, seed)?;

        if let Err(e) = SecretKey::from_slice(&secret) {
            secret.zeroize();
            return Err(Error::InvalidDerivationResult(format!("Invalid master key: {}", e)));
        }

        Ok(Self { secret, chain_code })
    }

    /// Derive one child key
    ///
    /// An HMAC output at or above the curve order, or a zero child scalar, is
    /// an error. BIP-32 says to skip to the next index, but the path here is
    /// fixed so the failure is reported instead.
    pub fn derive_child(&self, secp: &Secp256k1<All>, index: ChildIndex) -> Result<Self> {
        let parent = self.secret_key()?;

        let mut data = Vec::with_capacity(37);
        if index.is_hardened() {
            data.push(0);
            data.extend_from_slice(&self.secret);
        } else {
            let parent_public = PublicKey::from_secret_key(secp, &parent);
            data.extend_from_slice(&parent_public.serialize());
        }
        data.extend_from_slice(&index.to_u32().to_be_bytes());

        let digest = hmac_sha512(&self.chain_code, &data);
        data.zeroize();
        let (mut tweak, chain_code) = digest?;

        // child = IL + parent (mod n)
        let tweak_key = SecretKey::from_slice(&tweak);
        tweak.zeroize();
        let child = tweak_key
            .and_then(|t| t.add_tweak(&Scalar::from(parent)))
            .map_err(|e| {
                Error::InvalidDerivationResult(format!("Invalid child key at index {}: {}", index, e))
            })?;

        tracing::trace!(%index, "derived child key");
        Ok(Self { secret: child.secret_bytes(), chain_code })
    }

    /// Walk a path from this key
    pub fn derive_path(&self, secp: &Secp256k1<All>, path: &[ChildIndex]) -> Result<Self> {
        path.iter()
            .try_fold(self.clone(), |key, &index| key.derive_child(secp, index))
    }

    /// The secp256k1 secret key
    pub fn secret_key(&self) -> Result<SecretKey> {
        SecretKey::from_slice(&self.secret)
            .map_err(|e| Error::InvalidDerivationResult(format!("Invalid secret key: {}", e)))
    }

    /// The raw 32-byte private key
    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}
