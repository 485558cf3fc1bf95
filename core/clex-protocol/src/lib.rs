#![no_std] // Usable from embedded hosts; the lexicon crate brings std

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod category;

// Re-export core types for convenience
pub use category::{Category, CategoryFlags, Dialect, Revision};

pub mod model;
pub use model::*;
