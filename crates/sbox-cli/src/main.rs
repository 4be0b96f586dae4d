//! Command-line driver for the masked S-box coprocessor model.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sbox_core::{CompositeFieldSbox, SBOX};
use sbox_proto::{Driver, SboxCore, Transcript};

/// Masked S-box coprocessor CLI.
#[derive(Parser)]
#[command(
    name = "sboxctl",
    version,
    author,
    about = "Drive the masked S-box coprocessor model over its serial protocol"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep data 0..=255 with key 0 and print the substitution table.
    Table {
        /// Use the composite-field engine instead of the lookup table.
        #[arg(long, default_value_t = false)]
        composite: bool,
    },
    /// Run one unmasked substitution of key ^ data.
    Sub {
        /// Key byte as 2 hex characters.
        #[arg(long, value_name = "HEX")]
        key: String,
        /// Data byte as 2 hex characters.
        #[arg(long, value_name = "HEX")]
        data: String,
    },
    /// Run one masked substitution and print both output shares.
    MaskedSub {
        /// Key byte as 2 hex characters.
        #[arg(long, value_name = "HEX")]
        key: String,
        /// Mask byte as 2 hex characters.
        #[arg(long, value_name = "HEX")]
        mask: String,
        /// Plaintext byte as 2 hex characters (loaded pre-masked).
        #[arg(long, value_name = "HEX")]
        data: String,
        /// 24-bit PRD word as up to 6 hex characters.
        #[arg(long, value_name = "HEX", default_value = "000000")]
        prd: String,
    },
    /// Drive random masked substitutions and check them against the table.
    Check {
        /// Number of random samples to run.
        #[arg(long, default_value_t = 1024)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Record a conformance transcript and write it to a vector file.
    Vectors {
        /// Output path for the serialized transcript.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Number of random masked substitutions to record.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Replay a vector file against a fresh core and verify every cycle.
    Replay {
        /// Path to the serialized transcript.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Replay against the composite-field engine.
        #[arg(long, default_value_t = false)]
        composite: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Table { composite } => cmd_table(composite),
        Commands::Sub { key, data } => cmd_sub(&key, &data),
        Commands::MaskedSub {
            key,
            mask,
            data,
            prd,
        } => cmd_masked_sub(&key, &mask, &data, &prd),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Vectors { out, samples, seed } => cmd_vectors(&out, samples, seed),
        Commands::Replay { input, composite } => cmd_replay(&input, composite),
    }
}

fn cmd_table(composite: bool) -> Result<()> {
    let table = if composite {
        sweep(Driver::with_engine(CompositeFieldSbox))
    } else {
        sweep(Driver::new())
    };
    for row in table.chunks(16) {
        println!("{}", hex::encode(row));
    }
    Ok(())
}

fn sweep<E: sbox_core::Substitute>(mut driver: Driver<E>) -> [u8; 256] {
    driver.load_key(0x00);
    let mut table = [0u8; 256];
    for i in 0..=255u8 {
        table[i as usize] = driver.substitute(i);
    }
    table
}

fn cmd_sub(key_hex: &str, data_hex: &str) -> Result<()> {
    let key = parse_byte(key_hex).context("parse --key")?;
    let data = parse_byte(data_hex).context("parse --data")?;
    let mut driver = Driver::new();
    driver.load_key(key);
    let out = driver.substitute(data);
    println!("S({key:#04x} ^ {data:#04x}) = {out:#04x}");
    Ok(())
}

fn cmd_masked_sub(key_hex: &str, mask_hex: &str, data_hex: &str, prd_hex: &str) -> Result<()> {
    let key = parse_byte(key_hex).context("parse --key")?;
    let mask = parse_byte(mask_hex).context("parse --mask")?;
    let data = parse_byte(data_hex).context("parse --data")?;
    let prd = parse_prd(prd_hex).context("parse --prd")?;

    let mut driver = Driver::new();
    driver.load_key(key);
    driver.load_mask(mask);
    driver.load_prd(prd);
    let (mask_share, data_share) = driver.substitute_masked(data ^ mask);

    println!("mask share: {mask_share:#04x}");
    println!("data share: {data_share:#04x}");
    println!("recombined: {:#04x}", mask_share ^ data_share);
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut driver = Driver::new();
    for _ in 0..samples {
        let key: u8 = rng.gen();
        let mask: u8 = rng.gen();
        let plaintext: u8 = rng.gen();
        let prd: u32 = rng.gen::<u32>() & 0xff_ffff;

        driver.load_key(key);
        driver.load_mask(mask);
        driver.load_prd(prd);
        let (mask_share, data_share) = driver.substitute_masked(plaintext ^ mask);
        let expected = SBOX[(key ^ plaintext) as usize];
        if mask_share ^ data_share != expected {
            bail!(
                "mismatch: key={key:#04x} mask={mask:#04x} data={plaintext:#04x} prd={prd:#08x}"
            );
        }
    }
    println!("{samples} masked substitutions matched the canonical table");
    Ok(())
}

fn cmd_vectors(out: &PathBuf, samples: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut driver = Driver::new();
    for _ in 0..samples {
        driver.load_key(rng.gen());
        driver.load_mask(rng.gen());
        driver.load_prd(rng.gen::<u32>() & 0xff_ffff);
        driver.substitute(rng.gen());
        driver.substitute_masked(rng.gen());
    }
    let transcript = driver.into_transcript();
    let bytes = transcript.to_bytes().context("serialize transcript")?;
    fs::write(out, bytes).with_context(|| format!("write {}", out.display()))?;
    println!(
        "wrote {} cycles to {}",
        transcript.cycles.len(),
        out.display()
    );
    Ok(())
}

fn cmd_replay(input: &PathBuf, composite: bool) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let transcript = Transcript::from_bytes(&bytes).context("deserialize transcript")?;
    if composite {
        let mut core = SboxCore::with_engine(CompositeFieldSbox);
        transcript.replay(&mut core).context("replay transcript")?;
    } else {
        let mut core = SboxCore::new();
        transcript.replay(&mut core).context("replay transcript")?;
    }
    println!("{} cycles replayed cleanly", transcript.cycles.len());
    Ok(())
}

fn parse_byte(hex_str: &str) -> Result<u8> {
    let bytes = hex::decode(hex_str.trim().trim_start_matches("0x")).context("decode hex")?;
    if bytes.len() != 1 {
        bail!("expected exactly one byte (2 hex characters)");
    }
    Ok(bytes[0])
}

fn parse_prd(hex_str: &str) -> Result<u32> {
    let raw = hex_str.trim().trim_start_matches("0x");
    let value = u32::from_str_radix(raw, 16).context("decode hex")?;
    if value > 0xff_ffff {
        bail!("PRD must fit in 24 bits");
    }
    Ok(value)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
