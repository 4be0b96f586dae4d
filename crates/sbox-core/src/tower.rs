//! Arithmetic in the GF(((2^2)^2)^2) tower field.
//!
//! The tower is built as
//! GF(2^2) = GF(2)[w]/(w^2 + w + 1),
//! GF(2^4) = GF(2^2)[z]/(z^2 + z + N), and
//! GF(2^8) = GF(2^4)[y]/(y^2 + y + L),
//! with elements packed bitwise: a GF(2^4) element holds its high GF(2^2)
//! coefficient in bits [3:2], a GF(2^8) element holds its high GF(2^4)
//! coefficient in bits [7:4].
//!
//! The isomorphism with the AES polynomial basis is not taken from a fixed
//! matrix; it is derived at compile time by locating a root of the AES field
//! polynomial x^8 + x^4 + x^3 + x + 1 inside the tower and mapping the AES
//! power basis onto powers of that root. This keeps the mapping correct by
//! construction for whichever extension constants are in use.

/// Extension constant N of GF(2^4) over GF(2^2). z^2 = z + N must be
/// irreducible; N = w qualifies since {t^2 + t} over GF(2^2) is {0, 1}.
pub const GF16_EXT: u8 = 0x2;

/// Multiplication in GF(2^2).
#[inline]
pub const fn gf4_mul(a: u8, b: u8) -> u8 {
    let (a1, a0) = ((a >> 1) & 1, a & 1);
    let (b1, b0) = ((b >> 1) & 1, b & 1);
    // (a1*w + a0)(b1*w + b0) with w^2 = w + 1.
    let hi = (a1 & b1) ^ (a1 & b0) ^ (a0 & b1);
    let lo = (a1 & b1) ^ (a0 & b0);
    (hi << 1) | lo
}

/// Squaring in GF(2^2). Also the inverse map: x^2 = x^-1 there.
#[inline]
pub const fn gf4_sq(a: u8) -> u8 {
    gf4_mul(a, a)
}

/// Multiplication in GF(2^4).
#[inline]
pub const fn gf16_mul(a: u8, b: u8) -> u8 {
    let (ah, al) = ((a >> 2) & 0x3, a & 0x3);
    let (bh, bl) = ((b >> 2) & 0x3, b & 0x3);
    let hh = gf4_mul(ah, bh);
    let hi = hh ^ gf4_mul(ah, bl) ^ gf4_mul(al, bh);
    let lo = gf4_mul(hh, GF16_EXT) ^ gf4_mul(al, bl);
    (hi << 2) | lo
}

/// Squaring in GF(2^4).
#[inline]
pub const fn gf16_sq(a: u8) -> u8 {
    gf16_mul(a, a)
}

/// Inversion in GF(2^4), with the 0 -> 0 convention. Decomposes over
/// GF(2^2), where inversion degenerates to squaring.
pub const fn gf16_inv(a: u8) -> u8 {
    let (ah, al) = ((a >> 2) & 0x3, a & 0x3);
    let d = gf4_mul(gf4_sq(ah), GF16_EXT) ^ gf4_mul(ah, al) ^ gf4_sq(al);
    let di = gf4_sq(d);
    let hi = gf4_mul(ah, di);
    let lo = gf4_mul(ah ^ al, di);
    (hi << 2) | lo
}

const fn find_gf256_ext() -> u8 {
    // y^2 + y + L is irreducible over GF(2^4) iff L is outside {t^2 + t}.
    let mut lambda = 1u8;
    loop {
        let mut t = 0u8;
        let mut reducible = false;
        while t < 16 {
            if gf16_sq(t) ^ t == lambda {
                reducible = true;
                break;
            }
            t += 1;
        }
        if !reducible {
            return lambda;
        }
        lambda += 1;
    }
}

/// Extension constant L of GF(2^8) over GF(2^4).
pub const GF256_EXT: u8 = find_gf256_ext();

/// Multiplication in the GF(2^8) tower representation.
#[inline]
pub const fn gf256_mul(a: u8, b: u8) -> u8 {
    let (ah, al) = (a >> 4, a & 0xf);
    let (bh, bl) = (b >> 4, b & 0xf);
    let hh = gf16_mul(ah, bh);
    let hi = hh ^ gf16_mul(ah, bl) ^ gf16_mul(al, bh);
    let lo = gf16_mul(hh, GF256_EXT) ^ gf16_mul(al, bl);
    (hi << 4) | lo
}

/// Inversion in the GF(2^8) tower representation, 0 -> 0.
///
/// For a = ah*y + al, the norm-like quantity d = ah^2*L + ah*al + al^2
/// satisfies a^-1 = (ah*d^-1)*y + (ah + al)*d^-1.
pub const fn gf256_inv(a: u8) -> u8 {
    let (ah, al) = (a >> 4, a & 0xf);
    let d = gf16_mul(gf16_sq(ah), GF256_EXT) ^ gf16_mul(ah, al) ^ gf16_sq(al);
    let di = gf16_inv(d);
    let hi = gf16_mul(ah, di);
    let lo = gf16_mul(ah ^ al, di);
    (hi << 4) | lo
}

const fn find_aes_root() -> u8 {
    // The AES polynomial splits completely in any GF(2^8), so a root exists.
    let mut beta = 2u8;
    loop {
        let b2 = gf256_mul(beta, beta);
        let b3 = gf256_mul(b2, beta);
        let b4 = gf256_mul(b2, b2);
        let b8 = gf256_mul(b4, b4);
        if b8 ^ b4 ^ b3 ^ beta ^ 1 == 0 {
            return beta;
        }
        beta += 1;
    }
}

const fn build_to_tower() -> [u8; 256] {
    let beta = find_aes_root();
    let mut pows = [0u8; 8];
    pows[0] = 1;
    let mut i = 1;
    while i < 8 {
        pows[i] = gf256_mul(pows[i - 1], beta);
        i += 1;
    }
    // GF(2)-linear extension of x^i -> beta^i over the AES power basis.
    let mut map = [0u8; 256];
    let mut x = 0usize;
    while x < 256 {
        let mut acc = 0u8;
        let mut bit = 0;
        while bit < 8 {
            if (x >> bit) & 1 == 1 {
                acc ^= pows[bit];
            }
            bit += 1;
        }
        map[x] = acc;
        x += 1;
    }
    map
}

const fn build_from_tower(to: &[u8; 256]) -> [u8; 256] {
    let mut map = [0u8; 256];
    let mut x = 0usize;
    while x < 256 {
        map[to[x] as usize] = x as u8;
        x += 1;
    }
    map
}

/// Isomorphism from the AES polynomial basis into the tower basis.
/// GF(2)-linear: `TO_TOWER[a ^ b] == TO_TOWER[a] ^ TO_TOWER[b]`.
pub const TO_TOWER: [u8; 256] = build_to_tower();

/// Inverse isomorphism, tower basis back to the AES polynomial basis.
pub const FROM_TOWER: [u8; 256] = build_from_tower(&TO_TOWER);

/// Linear part of the AES output affine map (no 0x63 constant).
///
/// Kept separate from [`aes_affine`] because the masked engine applies the
/// linear part to both shares but the constant to only one.
#[inline]
pub const fn aes_affine_linear(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4)
}

/// Full AES output affine map.
#[inline]
pub const fn aes_affine(b: u8) -> u8 {
    aes_affine_linear(b) ^ 0x63
}
