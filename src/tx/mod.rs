//! Transaction Module
//!
//! Field assembly for transfers, deployments and contract calls, and the
//! signer boundary they are handed to.

mod builder;
mod signer;

pub use builder::*;
pub use signer::*;
