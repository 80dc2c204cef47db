//! `membank-replay`: play a request script against a fresh banked memory.
//!
//! ```text
//! membank-replay requests.csv --entries 1024 --banks 4 --byte-enables 8 --width 64
//! ```
//!
//! Logging goes through `env_logger`; set `RUST_LOG=trace` to see every
//! request.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::error;
use membank_array::{ArrayConfig, BankedMemory};
use membank_core::Marshal;
use membank_replay::{spawn_memory_slave, AddressMap, PlaybackReport, ReplayError, ScriptPlayer};

#[derive(Parser, Debug)]
#[command(name = "membank-replay", version, about)]
struct Args {
    /// Request script (CSV: delay,R|W,address_hex,data_hex).
    script: PathBuf,

    /// Total entries across all banks.
    #[arg(long, default_value_t = 1024)]
    entries: usize,

    /// Number of banks; must divide the entry count.
    #[arg(long, default_value_t = ArrayConfig::DEFAULT_BANK_COUNT)]
    banks: usize,

    /// Write-enable slices per entry; must divide the word width.
    #[arg(long, default_value_t = ArrayConfig::DEFAULT_BYTE_ENABLES)]
    byte_enables: usize,

    /// Word width in bits.
    #[arg(long, value_enum, default_value_t = Width::W64)]
    width: Width,

    /// Idle cycles before the first request.
    #[arg(long, default_value_t = ScriptPlayer::DEFAULT_WARMUP_CYCLES)]
    warmup: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Width {
    #[value(name = "8")]
    W8,
    #[value(name = "16")]
    W16,
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            println!("{}: {report}", args.script.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("membank-replay: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<PlaybackReport, ReplayError> {
    let player = ScriptPlayer::load(&args.script)?.with_warmup(args.warmup);
    let config = ArrayConfig::new(args.entries, args.banks).with_byte_enables(args.byte_enables);
    match args.width {
        Width::W8 => play::<u8>(&player, config),
        Width::W16 => play::<u16>(&player, config),
        Width::W32 => play::<u32>(&player, config),
        Width::W64 => play::<u64>(&player, config),
    }
}

fn play<T>(player: &ScriptPlayer, config: ArrayConfig) -> Result<PlaybackReport, ReplayError>
where
    T: Marshal + Default + 'static,
{
    let memory = BankedMemory::<T>::new(config)?;
    let map = AddressMap::new(memory.geometry());
    let (mut port, slave) = spawn_memory_slave(memory, map);
    let result = player.play(&mut port);
    drop(port);
    slave.join()?;
    result
}
