//! Protocol-level conformance tests, driving the core at pin level the way
//! an external controller would.

use sbox_proto::{Driver, Mode, SboxCore, QUAL_MASKED_DOMAIN, QUAL_MASKED_FLOW};

use sbox_core::SBOX;

const KEYS: [u8; 4] = [0x00, 0x42, 0x13, 0xff];
const MASKS: [u8; 4] = [0x00, 0x15, 0x09, 0x37];
const PRDS: [u32; 3] = [0x00000, 0x3abcd, 0x14321];

#[test]
fn unmasked_sweep_matches_the_table_for_each_key() {
    let mut core = SboxCore::new();
    // Power-on reset.
    core.tick(false, true, 0x00, 0x00);

    for &key in &KEYS {
        core.tick(true, true, Mode::KeyIn.code(), key);
        for i in 0..=255u8 {
            core.tick(true, true, Mode::DataIn.code(), i);
            core.tick(true, true, QUAL_MASKED_DOMAIN | Mode::DataIn.code(), i);
            let out = core.tick(
                true,
                true,
                QUAL_MASKED_DOMAIN | Mode::UnmaskedDataOut.code(),
                0x00,
            );
            assert_eq!(out, SBOX[(key ^ i) as usize], "key = {key:#x}, i = {i:#x}");
            core.tick(true, true, Mode::UnmaskedDataOut.code(), 0x00);
        }
    }
}

#[test]
fn masked_sweep_shares_unmask_to_the_table() {
    let mut core = SboxCore::new();
    core.tick(false, true, 0x00, 0x00);

    for &key in &KEYS {
        core.tick(true, true, Mode::KeyIn.code(), key);
        for &mask in &MASKS {
            core.tick(true, true, Mode::MaskIn.code(), mask);
            for &prd in &PRDS {
                core.tick(true, true, Mode::Prd0In.code(), prd as u8);
                core.tick(true, true, Mode::Prd1In.code(), (prd >> 8) as u8);
                core.tick(true, true, Mode::Prd2In.code(), (prd >> 16) as u8);
                core.tick(true, true, Mode::MaskIn.code(), mask);

                for i in 0..=255u8 {
                    core.tick(true, true, Mode::DataIn.code(), i);
                    core.tick(true, true, QUAL_MASKED_FLOW | Mode::DataIn.code(), i);
                    let mask_share = core.tick(
                        true,
                        true,
                        QUAL_MASKED_FLOW | Mode::MaskedMaskOut.code(),
                        0x00,
                    );
                    let data_share = core.tick(
                        true,
                        true,
                        QUAL_MASKED_FLOW | Mode::MaskedDataOut.code(),
                        0x00,
                    );
                    assert_eq!(
                        mask_share ^ data_share,
                        SBOX[(mask ^ key ^ i) as usize],
                        "key = {key:#x}, mask = {mask:#x}, prd = {prd:#x}, i = {i:#x}"
                    );
                }
            }
        }
    }
}

#[test]
fn key_zero_sweep_reproduces_the_whole_table() {
    let mut driver = Driver::new();
    driver.load_key(0x00);
    let mut table = [0u8; 256];
    for i in 0..=255u8 {
        table[i as usize] = driver.substitute(i);
    }
    assert_eq!(table, SBOX);
}

#[test]
fn output_reads_are_idempotent() {
    let mut core = SboxCore::new();
    core.step(Mode::KeyIn.code(), 0x42);
    core.step(Mode::MaskIn.code(), 0x37);
    core.step(Mode::DataIn.code(), 0x6b);

    let first = core.step(Mode::UnmaskedDataOut.code(), 0x00);
    for _ in 0..3 {
        assert_eq!(core.step(Mode::UnmaskedDataOut.code(), 0x00), first);
    }

    let mask_share = core.step(QUAL_MASKED_FLOW | Mode::MaskedMaskOut.code(), 0x00);
    let data_share = core.step(QUAL_MASKED_FLOW | Mode::MaskedDataOut.code(), 0x00);
    // Re-reading in the opposite order returns the same shares.
    assert_eq!(
        core.step(QUAL_MASKED_FLOW | Mode::MaskedMaskOut.code(), 0x00),
        mask_share
    );
    assert_eq!(
        core.step(QUAL_MASKED_FLOW | Mode::MaskedDataOut.code(), 0x00),
        data_share
    );
}

#[test]
fn reset_at_any_point_zeroes_all_registers() {
    let mut core = SboxCore::new();
    core.step(Mode::KeyIn.code(), 0xde);
    core.step(Mode::DataIn.code(), 0xad);
    core.step(Mode::MaskIn.code(), 0xbe);
    core.step(Mode::Prd1In.code(), 0xef);

    core.tick(false, true, Mode::KeyIn.code(), 0x55);
    assert_eq!(
        core.tick(true, true, Mode::UnmaskedDataOut.code(), 0x00),
        SBOX[0]
    );
}

#[test]
fn prd_slices_accept_any_load_order() {
    let mut in_order = SboxCore::new();
    let mut reversed = SboxCore::new();
    for core in [&mut in_order, &mut reversed] {
        core.step(Mode::KeyIn.code(), 0x42);
        core.step(Mode::MaskIn.code(), 0x15);
        core.step(Mode::DataIn.code(), 0x80);
    }

    let prd: u32 = 0x3abcd;
    in_order.step(Mode::Prd0In.code(), prd as u8);
    in_order.step(Mode::Prd1In.code(), (prd >> 8) as u8);
    in_order.step(Mode::Prd2In.code(), (prd >> 16) as u8);

    // Stale high-to-low loads, fully overwritten afterwards.
    reversed.step(Mode::Prd2In.code(), 0x77);
    reversed.step(Mode::Prd1In.code(), 0x77);
    reversed.step(Mode::Prd2In.code(), (prd >> 16) as u8);
    reversed.step(Mode::Prd1In.code(), (prd >> 8) as u8);
    reversed.step(Mode::Prd0In.code(), prd as u8);

    assert_eq!(in_order.regs().prd, reversed.regs().prd);
    assert_eq!(
        in_order.step(QUAL_MASKED_FLOW | Mode::MaskedMaskOut.code(), 0x00),
        reversed.step(QUAL_MASKED_FLOW | Mode::MaskedMaskOut.code(), 0x00)
    );
}

#[test]
fn reserved_mode_codes_are_inert() {
    let mut core = SboxCore::new();
    core.step(Mode::KeyIn.code(), 0x42);
    core.step(Mode::DataIn.code(), 0x10);
    let out = core.step(Mode::UnmaskedDataOut.code(), 0x00);
    let regs = *core.regs();

    for code in [0x7u8, 0xb, 0xc, 0xd, 0xe, 0xf] {
        for qual in [0x00, QUAL_MASKED_FLOW, QUAL_MASKED_DOMAIN] {
            assert_eq!(core.step(qual | code, 0xff), out);
            assert_eq!(*core.regs(), regs);
        }
    }
}
