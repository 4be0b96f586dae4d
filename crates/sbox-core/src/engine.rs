//! Substitution engines behind a common trait.

use crate::table::SBOX;
use crate::tower::{aes_affine, gf256_inv, FROM_TOWER, TO_TOWER};

/// Capability of computing the Rijndael byte substitution.
///
/// Both implementations must agree with [`SBOX`] on every input; the trait
/// exists so the protocol core can be driven with either the lookup-table
/// engine or the composite-field engine the hardware uses.
pub trait Substitute {
    /// Substitutes one byte.
    fn substitute(&self, x: u8) -> u8;
}

/// Direct lookup in the canonical table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableSbox;

impl Substitute for TableSbox {
    #[inline]
    fn substitute(&self, x: u8) -> u8 {
        SBOX[x as usize]
    }
}

/// Composite-field evaluation: map into the tower, invert there, map back,
/// then apply the AES affine output map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeFieldSbox;

impl Substitute for CompositeFieldSbox {
    #[inline]
    fn substitute(&self, x: u8) -> u8 {
        let t = TO_TOWER[x as usize];
        let inv = gf256_inv(t);
        aes_affine(FROM_TOWER[inv as usize])
    }
}

/// Convenience free function using the table engine.
#[inline]
pub fn substitute(x: u8) -> u8 {
    TableSbox.substitute(x)
}
