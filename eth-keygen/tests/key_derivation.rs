//! Tests for key derivation

use eth_keygen::crypto::keys::*;
use eth_keygen::crypto::mnemonic::*;
use eth_keygen::Address;

use ethers_signers::{coins_bip39::English, MnemonicBuilder, Signer};

const ZERO_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

#[test]
fn test_ethereum_key_derivation() {
    let seed = Mnemonic::parse(ZERO_MNEMONIC).unwrap().to_seed("");
    let keys = derive_ethereum_keys(&seed).unwrap();

    assert_eq!(
        hex::encode(keys.private_key.as_bytes()),
        "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
    );

    let address = keys.address.to_checksum();
    assert_eq!(address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
    assert_eq!(address.len(), 42);
}

#[test]
fn test_matches_ethers_wallet_from_phrase() {
    let phrases = [
        ZERO_MNEMONIC,
        "legal winner thank year wave sausage worth useful legal winner thank yellow",
        "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
        "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
    ];

    for phrase in phrases {
        let wallet = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .build()
            .unwrap();

        let seed = Mnemonic::parse(phrase).unwrap().to_seed("");
        let keys = derive_ethereum_keys(&seed).unwrap();

        assert_eq!(
            keys.private_key.as_bytes().as_slice(),
            wallet.signer().to_bytes().as_slice()
        );
        assert_eq!(
            keys.address.to_checksum(),
            ethers_core::utils::to_checksum(&wallet.address(), None)
        );
    }
}

#[test]
fn test_address_from_public_key_matches_ethers() {
    let seed = Seed::from_bytes([0x42; 64]);
    let keys = derive_ethereum_keys(&seed).unwrap();

    let ethers_address = ethers_core::types::Address::from_slice(keys.address.as_bytes());
    assert_eq!(
        keys.address.to_checksum(),
        ethers_core::utils::to_checksum(&ethers_address, None)
    );
}

#[test]
fn test_fixed_path_components() {
    assert_eq!(format_path(&ETHEREUM_DERIVATION_PATH), "m/44'/60'/0'/0/0");
    assert!(ETHEREUM_DERIVATION_PATH[..3].iter().all(|i| i.is_hardened()));
    assert!(ETHEREUM_DERIVATION_PATH[3..].iter().all(|i| !i.is_hardened()));
}

#[test]
fn test_public_key_matches_address() {
    let seed = Mnemonic::parse(ZERO_MNEMONIC).unwrap().to_seed("");
    let keys = derive_ethereum_keys(&seed).unwrap();

    let hash = keccak256(&keys.public_key.uncompressed()[1..]);
    assert_eq!(&hash[12..], keys.address.as_bytes());
    assert_eq!(Address::from_public_key(&keys.public_key), keys.address);
}
