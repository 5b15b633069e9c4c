//! Account credentials
//!
//! This module assembles the output of the key pipeline into the values the
//! presentation layer displays.

pub mod address;
mod credential;

pub use address::*;
pub use credential::*;
