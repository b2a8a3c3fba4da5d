//! Hex Codec Module
//!
//! Converts amounts, booleans, JSON values and text into the hex strings a
//! transaction carries, and decodes hex back into text.
//!
//! - **numeric**: decimal <-> hex with arbitrary precision
//! - **text**: UTF-8 / ASCII <-> hex
//! - **dispatch**: `to_hex`, picking a codec from the value's variant
//! - **pad**: fixed-width left/right padding

mod dispatch;
mod numeric;
mod pad;
mod text;


pub use dispatch::*;
pub use numeric::*;
pub use pad::*;
pub use text::*;

pub use crate::types::HexValue;
