//! Matrix file decoding and synthetic input generation

pub mod codec;
pub mod generate;
