//! Cryptographic primitives and operations
//!
//! This module provides entropy collection, mnemonic encoding, and key
//! derivation for the credential pipeline.

pub mod entropy;
pub mod mnemonic;
pub mod keys;

pub use entropy::*;
pub use mnemonic::*;
pub use keys::*;
