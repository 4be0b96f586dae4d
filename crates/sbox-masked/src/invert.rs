//! Masked multiplication and inversion in the tower field.
//!
//! Every multiplication of two shared values accumulates its four cross
//! products starting from the fresh mask, so no partial sum ever equals the
//! unshared product. Squaring and scaling by a field constant are GF(2)-
//! linear and act on each share independently.

use sbox_core::tower::{gf16_mul, gf16_sq, gf4_mul, gf4_sq, GF16_EXT, GF256_EXT};

use crate::shares::{Prd, Shares};

/// Masked GF(2^2) multiplication. `fresh` becomes the output mask share.
fn gf4_mul_shared(a: Shares, b: Shares, fresh: u8) -> Shares {
    let mut acc = fresh;
    acc ^= gf4_mul(a.data, b.data);
    acc ^= gf4_mul(a.data, b.mask);
    acc ^= gf4_mul(a.mask, b.data);
    acc ^= gf4_mul(a.mask, b.mask);
    Shares::new(acc, fresh)
}

/// Masked GF(2^4) multiplication. Same accumulation discipline.
fn gf16_mul_shared(a: Shares, b: Shares, fresh: u8) -> Shares {
    let mut acc = fresh;
    acc ^= gf16_mul(a.data, b.data);
    acc ^= gf16_mul(a.data, b.mask);
    acc ^= gf16_mul(a.mask, b.data);
    acc ^= gf16_mul(a.mask, b.mask);
    Shares::new(acc, fresh)
}

/// Masked GF(2^4) inversion via the GF(2^2) decomposition.
///
/// Consumes the three 2-bit PRD fields at bits [9:4]. GF(2^2) inversion is
/// squaring, hence linear, and needs no randomness of its own.
fn gf16_inv_shared(a: Shares, prd: Prd) -> Shares {
    let ah = Shares::new((a.data >> 2) & 0x3, (a.mask >> 2) & 0x3);
    let al = Shares::new(a.data & 0x3, a.mask & 0x3);

    // d = ah^2*N + ah*al + al^2, carried in shares.
    let p = gf4_mul_shared(ah, al, prd.crumb(4));
    let d = Shares::new(
        p.data ^ gf4_mul(gf4_sq(ah.data), GF16_EXT) ^ gf4_sq(al.data),
        p.mask ^ gf4_mul(gf4_sq(ah.mask), GF16_EXT) ^ gf4_sq(al.mask),
    );

    // d^-1 = d^2 in GF(2^2); squaring each share keeps the pair valid.
    let di = Shares::new(gf4_sq(d.data), gf4_sq(d.mask));

    let hi = gf4_mul_shared(ah, di, prd.crumb(6));
    let lo = gf4_mul_shared(ah.xor(al), di, prd.crumb(8));
    Shares::new((hi.data << 2) | lo.data, (hi.mask << 2) | lo.mask)
}

/// Masked GF(2^8) inversion via the GF(2^4) decomposition.
///
/// Consumes all 18 wired PRD bits: the 4-bit field at [3:0] for the ah*al
/// product, [9:4] inside the subfield inversion, and the 4-bit fields at
/// [13:10] and [17:14] for the two output-share multiplications.
pub fn gf256_inv_shared(a: Shares, prd: Prd) -> Shares {
    let ah = Shares::new(a.data >> 4, a.mask >> 4);
    let al = Shares::new(a.data & 0xf, a.mask & 0xf);

    let p = gf16_mul_shared(ah, al, prd.nibble(0));
    let d = Shares::new(
        p.data ^ gf16_mul(gf16_sq(ah.data), GF256_EXT) ^ gf16_sq(al.data),
        p.mask ^ gf16_mul(gf16_sq(ah.mask), GF256_EXT) ^ gf16_sq(al.mask),
    );

    let di = gf16_inv_shared(d, prd);

    let hi = gf16_mul_shared(ah, di, prd.nibble(10));
    let lo = gf16_mul_shared(ah.xor(al), di, prd.nibble(14));
    Shares::new((hi.data << 4) | lo.data, (hi.mask << 4) | lo.mask)
}
