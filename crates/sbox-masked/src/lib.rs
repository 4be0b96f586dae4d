//! First-order masked S-box evaluation.
//!
//! The substitution is computed on two Boolean shares whose XOR is the
//! sensitive byte; the unshared byte and the unshared substitution result are
//! never materialized. Linear steps (key addition, the tower isomorphism and
//! its inverse, the AES affine map) act on each share independently; the
//! non-linear inversion steps carry both shares and re-randomize every
//! product with fresh masks drawn from fixed bit fields of the externally
//! supplied PRD word.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod invert;
mod shares;

pub use crate::engine::substitute_shares;
pub use crate::shares::{Prd, Shares, PRD_BITS};
