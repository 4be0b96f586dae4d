//! The masked S-box evaluation.

use sbox_core::tower::{aes_affine_linear, FROM_TOWER, TO_TOWER};

use crate::invert::gf256_inv_shared;
use crate::shares::{Prd, Shares};

/// Computes the masked substitution from the coprocessor registers.
///
/// `masked_data` is the data register, assumed to hold `plaintext ^ mask`;
/// `mask` is the mask register; `key` is XORed in before substitution.
/// Returns output shares satisfying
/// `out.data ^ out.mask == S(key ^ mask ^ masked_data)`
/// for every input combination, including a degenerate all-zero `prd`.
///
/// The unshared input and result never appear: the key lands on the data
/// share only, the isomorphism tables and the affine linear map are applied
/// per share, and the inversion runs entirely on shares.
pub fn substitute_shares(masked_data: u8, mask: u8, key: u8, prd: u32) -> Shares {
    let x = Shares::new(masked_data ^ key, mask);
    let t = Shares::new(TO_TOWER[x.data as usize], TO_TOWER[x.mask as usize]);
    let inv = gf256_inv_shared(t, Prd(prd));
    let b = Shares::new(FROM_TOWER[inv.data as usize], FROM_TOWER[inv.mask as usize]);
    // The 0x63 affine constant belongs to exactly one share.
    Shares::new(aes_affine_linear(b.data) ^ 0x63, aes_affine_linear(b.mask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use sbox_core::SBOX;

    use crate::PRD_BITS;

    const KEYS: [u8; 4] = [0x00, 0x42, 0x13, 0xff];
    const MASKS: [u8; 4] = [0x00, 0x15, 0x09, 0x37];
    const PRDS: [u32; 3] = [0x00000, 0x3abcd, 0x14321];

    #[test]
    fn shares_unmask_to_the_table_entry() {
        for &key in &KEYS {
            for &mask in &MASKS {
                for &prd in &PRDS {
                    for data in 0..=255u8 {
                        let out = substitute_shares(data, mask, key, prd);
                        assert_eq!(
                            out.unmask(),
                            SBOX[(mask ^ key ^ data) as usize],
                            "key = {key:#x}, mask = {mask:#x}, prd = {prd:#x}, data = {data:#x}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn random_inputs_unmask_correctly() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..20_000 {
            let data: u8 = rng.gen();
            let mask: u8 = rng.gen();
            let key: u8 = rng.gen();
            let prd: u32 = rng.gen::<u32>() & 0xff_ffff;
            let out = substitute_shares(data, mask, key, prd);
            assert_eq!(out.unmask(), SBOX[(mask ^ key ^ data) as usize]);
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let a = substitute_shares(0x5c, 0x15, 0x42, 0x3abcd);
        let b = substitute_shares(0x5c, 0x15, 0x42, 0x3abcd);
        assert_eq!(a, b);
    }

    #[test]
    fn prd_moves_the_shares_but_not_the_value() {
        let zero = substitute_shares(0x10, 0x37, 0x13, 0x00000);
        let rand = substitute_shares(0x10, 0x37, 0x13, 0x3abcd);
        assert_eq!(zero.unmask(), rand.unmask());
        assert_ne!(zero, rand);
    }

    #[test]
    fn only_the_wired_prd_bits_matter() {
        let wired = (1u32 << PRD_BITS) - 1;
        let low = substitute_shares(0x99, 0x15, 0x00, 0x2_5a5a & wired);
        let high = substitute_shares(0x99, 0x15, 0x00, (0x2_5a5a & wired) | !wired & 0xff_ffff);
        assert_eq!(low, high);
    }
}
