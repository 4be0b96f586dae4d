//! Rijndael S-box substitution engines.
//!
//! This crate provides the non-linear byte substitution of AES/Rijndael in
//! two behaviorally identical forms:
//! - [`TableSbox`], a direct lookup in the canonical 256-entry table, and
//! - [`CompositeFieldSbox`], inversion in the GF(((2^2)^2)^2) tower followed
//!   by the AES affine output map, mirroring the area-optimized hardware
//!   construction.
//!
//! The tower arithmetic in [`tower`] is shared with the masked engine crate,
//! which carries the same inversion through two Boolean shares.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod table;
pub mod tower;

pub use crate::engine::{substitute, CompositeFieldSbox, Substitute, TableSbox};
pub use crate::table::SBOX;
