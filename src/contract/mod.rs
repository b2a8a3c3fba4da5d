//! Contract Module
//!
//! - **binding**: ABI-driven calldata and deployment data (`CallEncoder`)
//! - **compiler**: `solc` invocation and artifact extraction
//! - **artifact**: the persisted ABI + bytecode pair

mod artifact;
mod binding;
mod compiler;

pub use artifact::*;
pub use binding::*;
pub use compiler::*;
