//! Demonstrates one unmasked and one masked substitution over the protocol.

use sbox_core::SBOX;
use sbox_proto::Driver;

fn main() {
    let mut driver = Driver::new();

    driver.load_key(0x42);
    let out = driver.substitute(0x10);
    assert_eq!(out, SBOX[0x42 ^ 0x10]);
    println!("unmasked: S(0x42 ^ 0x10) = {out:#04x}");

    driver.load_mask(0x15);
    driver.load_prd(0x3abcd);
    // The data byte is loaded pre-masked: plaintext 0x10 under mask 0x15.
    let (mask_share, data_share) = driver.substitute_masked(0x10 ^ 0x15);
    assert_eq!(mask_share ^ data_share, out);
    println!(
        "masked:   shares {mask_share:#04x} ^ {data_share:#04x} = {:#04x}",
        mask_share ^ data_share
    );
}
