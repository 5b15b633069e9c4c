//! The entropy-to-credential pipeline and its result bundle

use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Serialize, Serializer};
use zeroize::Zeroizing;

use super::address::Address;
use crate::crypto::entropy::{generate_entropy_with, Entropy, EntropyMode};
use crate::crypto::keys::derivation::{format_path, ETHEREUM_DERIVATION_PATH};
use crate::crypto::keys::ethereum::{derive_ethereum_keys, EthereumKeys};
use crate::crypto::mnemonic::Mnemonic;
use crate::error::Result;

/// Everything the presentation layer shows for one generated account
///
/// Built in one piece: either all fields are present and consistent, or the
/// pipeline returned an error.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialResult {
    mnemonic: Mnemonic,
    keys: EthereumKeys,
}

impl CredentialResult {
    /// Run the full pipeline with entropy from the operating system RNG
    pub fn generate(mode: EntropyMode<'_>) -> Result<Self> {
        Self::generate_with_rng(&mut OsRng, mode)
    }

    /// Run the full pipeline with a caller-supplied CSPRNG
    #[tracing::instrument(skip_all, fields(mode = mode_name(&mode)))]
    pub fn generate_with_rng<R>(rng: &mut R, mode: EntropyMode<'_>) -> Result<Self>
    where
        R: RngCore + CryptoRng,
    {
        let entropy = generate_entropy_with(rng, mode);
        Self::from_entropy(&entropy)
    }

    /// Derive the credential for a given entropy value
    pub fn from_entropy(entropy: &Entropy) -> Result<Self> {
        Self::from_mnemonic(Mnemonic::from_entropy(entropy.as_bytes())?)
    }

    /// Validate a phrase and derive its credential
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        Self::from_mnemonic(Mnemonic::parse(phrase)?)
    }

    fn from_mnemonic(mnemonic: Mnemonic) -> Result<Self> {
        let seed = mnemonic.to_seed("");
        let keys = derive_ethereum_keys(&seed)?;
        tracing::debug!(address = %keys.address, "credential ready");
        Ok(Self { mnemonic, keys })
    }

    /// Space-joined 12-word phrase
    pub fn mnemonic_phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.mnemonic.phrase())
    }

    pub fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    /// `0x` + 64 hex characters
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(self.keys.private_key.to_hex())
    }

    /// `0x04…`, 65 bytes
    pub fn public_key_uncompressed_hex(&self) -> String {
        format!("0x{}", hex::encode(self.keys.public_key.uncompressed()))
    }

    /// `0x02…` or `0x03…`, 33 bytes
    pub fn public_key_compressed_hex(&self) -> String {
        format!("0x{}", hex::encode(self.keys.public_key.compressed()))
    }

    pub fn address(&self) -> &Address {
        &self.keys.address
    }

    pub fn keys(&self) -> &EthereumKeys {
        &self.keys
    }

    /// The path the keys were derived at
    pub fn derivation_path(&self) -> String {
        format_path(&ETHEREUM_DERIVATION_PATH)
    }
}

fn mode_name(mode: &EntropyMode<'_>) -> &'static str {
    match mode {
        EntropyMode::Random => "random",
        EntropyMode::UserSeeded(_) => "user_seeded",
    }
}

impl std::fmt::Debug for CredentialResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResult")
            .field("address", &self.keys.address.to_checksum())
            .finish_non_exhaustive()
    }
}

impl Serialize for CredentialResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CredentialResult", 6)?;
        state.serialize_field("mnemonic", self.mnemonic_phrase().as_str())?;
        state.serialize_field("private_key", self.private_key_hex().as_str())?;
        state.serialize_field("public_key", &self.public_key_uncompressed_hex())?;
        state.serialize_field("compressed_public_key", &self.public_key_compressed_hex())?;
        state.serialize_field("address", &self.keys.address)?;
        state.serialize_field("derivation_path", &self.derivation_path())?;
        state.end()
    }
}
