//! Ethereum addresses with EIP-55 mixed-case checksums

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::crypto::keys::ethereum::{keccak256, PublicKey};
use crate::error::{Error, Result};

/// Address length in bytes
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte Ethereum address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Create an address from raw bytes
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Last 20 bytes of keccak256(x || y)
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = keccak256(public_key.coordinates());
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Get the raw address bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// EIP-55 rendering with `0x` prefix
    ///
    /// A hex letter is uppercased when the matching nibble of
    /// keccak256(lowercase hex) is 8 or more.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + 2 * ADDRESS_LEN);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Check a string against its EIP-55 rendering
    pub fn is_valid_checksum(address: &str) -> bool {
        match address.parse::<Address>() {
            Ok(parsed) => parsed.to_checksum() == address,
            Err(_) => false,
        }
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Accepts `0x` + 40 hex characters
    ///
    /// All-lowercase and all-uppercase input carries no checksum and is taken
    /// as-is; mixed case must match the EIP-55 checksum.
    fn from_str(s: &str) -> Result<Self> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| Error::InvalidAddress("missing 0x prefix".to_string()))?;

        if body.len() != 2 * ADDRESS_LEN {
            return Err(Error::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                2 * ADDRESS_LEN,
                body.len()
            )));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| Error::InvalidAddress(e.to_string()))?;
        let address = Self(bytes);

        let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *body {
            return Err(Error::InvalidAddress("checksum mismatch".to_string()));
        }

        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}
