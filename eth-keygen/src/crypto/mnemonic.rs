//! BIP-39 mnemonic encoding and seed stretching
//!
//! Only the 12-word English form is supported: 128 bits of entropy plus a
//! 4-bit SHA-256 checksum. Encoding, checksum validation and PBKDF2 seeding
//! are done by the `bip39` crate.

use bip39::Language;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::entropy::{Entropy, ENTROPY_LEN};
use crate::error::{MnemonicError, Result};

/// Number of words in a phrase
pub const WORD_COUNT: usize = 12;

/// Seed length in bytes
pub const SEED_LEN: usize = 64;

/// A checksummed 12-word mnemonic
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &WORD_COUNT)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

/// The 64-byte BIP-39 seed
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Seed").field(&"[REDACTED]").finish()
    }
}

impl Mnemonic {
    /// Encode 16 bytes of entropy as a 12-word phrase
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        let entropy = Entropy::from_slice(entropy)?;
        let inner = bip39::Mnemonic::from_entropy_in(Language::English, entropy.as_bytes())?;

        tracing::trace!("encoded entropy as mnemonic");
        Ok(Self { inner })
    }

    /// Parse and validate a phrase
    ///
    /// The phrase is NFKD-normalized and runs of whitespace are collapsed.
    /// Every word must be in the English wordlist and the trailing checksum
    /// bits must match the entropy.
    pub fn parse(phrase: &str) -> Result<Self> {
        let word_count = phrase.split_whitespace().count();
        if word_count != WORD_COUNT {
            return Err(MnemonicError::InvalidWordCount(word_count).into());
        }

        let collapsed = Zeroizing::new(phrase.split_whitespace().collect::<Vec<_>>().join(" "));
        let inner = bip39::Mnemonic::parse_in(Language::English, collapsed.as_str()).map_err(|e| {
            tracing::debug!(reason = %e, "rejected mnemonic");
            e
        })?;

        Ok(Self { inner })
    }

    /// Check whether a phrase parses
    pub fn validate(phrase: &str) -> bool {
        Self::parse(phrase).is_ok()
    }

    /// Recover the entropy the phrase encodes
    pub fn to_entropy(&self) -> Entropy {
        let (mut array, len) = self.inner.to_entropy_array();
        debug_assert_eq!(len, ENTROPY_LEN);

        let mut bytes = [0u8; ENTROPY_LEN];
        bytes.copy_from_slice(&array[..ENTROPY_LEN]);
        array.zeroize();

        let entropy = Entropy::from(bytes);
        bytes.zeroize();
        entropy
    }

    /// The words in order
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.words()
    }

    /// Space-joined phrase
    pub fn phrase(&self) -> String {
        self.inner.to_string()
    }

    /// Stretch the phrase into a seed (PBKDF2-HMAC-SHA512, 2048 rounds)
    ///
    /// The passphrase is NFKD-normalized; the salt is `"mnemonic" + passphrase`.
    #[tracing::instrument(skip_all)]
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        let mut seed = self.inner.to_seed(passphrase);
        tracing::debug!("stretched mnemonic into seed");

        let out = Seed(seed);
        seed.zeroize();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const ZERO_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_zero_entropy_vector() {
        let mnemonic = Mnemonic::from_entropy(&[0u8; 16]).unwrap();
        assert_eq!(mnemonic.phrase(), ZERO_MNEMONIC);
    }

    #[test]
    fn test_bip39_vectors() {
        let vectors = [
            ([0x7fu8; 16], "legal winner thank year wave sausage worth useful legal winner thank yellow"),
            ([0x80u8; 16], "letter advice cage absurd amount doctor acoustic avoid letter advice cage above"),
            ([0xffu8; 16], "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"),
        ];
        for (entropy, phrase) in vectors {
            assert_eq!(Mnemonic::from_entropy(&entropy).unwrap().phrase(), phrase);
        }
    }

    #[test]
    fn test_from_entropy_rejects_wrong_length() {
        assert_eq!(
            Mnemonic::from_entropy(&[0u8; 32]),
            Err(Error::InvalidEntropyLength { expected: 16, actual: 32 })
        );
        assert!(Mnemonic::from_entropy(&[0u8; 15]).is_err());
    }

    #[test]
    fn test_to_entropy_round_trip() {
        let entropy: Vec<u8> = (0u8..16).collect();
        let mnemonic = Mnemonic::from_entropy(&entropy).unwrap();
        assert_eq!(&mnemonic.to_entropy().as_bytes()[..], &entropy[..]);
    }

    #[test]
    fn test_parse_valid() {
        let mnemonic = Mnemonic::parse(ZERO_MNEMONIC).unwrap();
        assert_eq!(mnemonic.to_entropy().as_bytes(), &[0u8; 16]);
        assert_eq!(mnemonic.words().count(), 12);
    }

    #[test]
    fn test_parse_normalizes_whitespace() {
        let messy = "  abandon  abandon abandon\tabandon abandon abandon abandon abandon abandon abandon abandon\nabout ";
        assert_eq!(Mnemonic::parse(messy).unwrap().phrase(), ZERO_MNEMONIC);
    }

    #[test]
    fn test_parse_invalid_word_count() {
        assert_eq!(
            Mnemonic::parse("abandon abandon abandon"),
            Err(Error::InvalidMnemonic(MnemonicError::InvalidWordCount(3)))
        );
        assert!(Mnemonic::parse("").is_err());
    }

    #[test]
    fn test_parse_unknown_word() {
        let phrase = "abandon abandon abandon abandon abandon hellox abandon abandon abandon abandon abandon about";
        assert_eq!(
            Mnemonic::parse(phrase),
            Err(Error::InvalidMnemonic(MnemonicError::UnknownWord { position: 6 }))
        );
    }

    #[test]
    fn test_parse_bad_checksum() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert_eq!(
            Mnemonic::parse(phrase),
            Err(Error::InvalidMnemonic(MnemonicError::ChecksumMismatch))
        );
    }

    #[test]
    fn test_parse_swapped_words() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about abandon";
        assert!(!Mnemonic::validate(phrase));
    }

    #[test]
    fn test_to_seed_vectors() {
        let mnemonic = Mnemonic::parse(ZERO_MNEMONIC).unwrap();

        let seed = mnemonic.to_seed("");
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );

        let seed = mnemonic.to_seed("TREZOR");
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_passphrase_is_normalized() {
        let mnemonic = Mnemonic::parse(ZERO_MNEMONIC).unwrap();
        // precomposed and decomposed forms of the same passphrase
        assert_eq!(mnemonic.to_seed("caf\u{e9}"), mnemonic.to_seed("cafe\u{301}"));
        assert_ne!(mnemonic.to_seed("caf\u{e9}"), mnemonic.to_seed(""));
    }

    #[test]
    fn test_matches_bip39_crate() {
        let entropy = hex::decode("9e885d952ad362caeb4efe34a8e91bd2").unwrap();
        let ours = Mnemonic::from_entropy(&entropy).unwrap();
        let theirs = bip39::Mnemonic::from_entropy(&entropy).unwrap();

        assert_eq!(ours.phrase(), theirs.to_string());
        assert_eq!(ours.to_seed("").as_bytes(), &theirs.to_seed(""));
    }

    #[test]
    fn test_debug_does_not_leak_phrase() {
        let mnemonic = Mnemonic::parse(ZERO_MNEMONIC).unwrap();
        let out = format!("{:?}", mnemonic);
        assert!(!out.contains("abandon"));
        assert!(out.contains("REDACTED"));
        assert!(!format!("{:?}", mnemonic.to_seed("")).contains("5eb0"));
    }
}
