//! Platform abstraction layer
//!
//! Keeps host event plumbing out of the simulation:
//! - Input events -> per-tick samples

pub mod input;

pub use input::{InputSampler, Key};
