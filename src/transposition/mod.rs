//! Key-to-key transposition of parsed scores.

pub mod engine;
pub mod errors;
pub mod lookup_table;

pub use engine::transpose;
pub use errors::TranspositionError;
pub use lookup_table::diatonic_alteration;
