//! Key derivation and management
//!
//! BIP-32 extended keys live in `derivation`; the Ethereum key pair and
//! address computation live in `ethereum`.

pub mod derivation;
pub mod ethereum;

pub use derivation::*;
pub use ethereum::*;
