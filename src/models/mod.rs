//! Core musical data types shared across the crate.

pub mod key;
pub mod pitch;

pub use key::KeySignature;
pub use pitch::{Pitch, Step};
