//! Wallet Module
//!
//! Account-level primitives: address validation and checksumming, ether
//! denominations, and the private key a transaction is signed with.

mod address_validation;
mod keys;
mod units;

pub use address_validation::*;
pub use keys::*;
pub use units::*;
