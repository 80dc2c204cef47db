//! Benchmark profiles and utilities for membank.
//!
//! Provides pre-built memory shapes and deterministic workloads:
//!
//! - [`reference_config`]: 4096 x 64-bit words in 4 banks, byte enables
//! - [`stress_config`]: 64K words in 16 banks
//! - [`access_pattern`] / [`mask_pattern`]: seeded index and mask streams
//! - [`reference_script`]: a write-then-verify request script

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use membank_array::ArrayConfig;
use membank_replay::{AddressMap, Command};

/// 4096 entries of a 64-bit word across 4 banks with 8 byte enables.
pub fn reference_config() -> ArrayConfig {
    ArrayConfig::new(4096, 4).with_byte_enables(8)
}

/// 65536 entries across 16 banks with 8 byte enables.
pub fn stress_config() -> ArrayConfig {
    ArrayConfig::new(65_536, 16).with_byte_enables(8)
}

// 64-bit LCG behind every stream here.
const LCG_MUL: u64 = 6364136223846793005;
const LCG_INC: u64 = 1442695040888963407;

fn lcg(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
    *state >> 16
}

/// `len` word numbers in `0..words`, deterministic in `seed`.
pub fn access_pattern(words: usize, len: usize, seed: u64) -> Vec<usize> {
    let mut state = seed;
    (0..len)
        .map(|_| (lcg(&mut state) % words as u64) as usize)
        .collect()
}

/// `len` raw write masks over `slices` slices, deterministic in `seed`.
pub fn mask_pattern(slices: usize, len: usize, seed: u64) -> Vec<u64> {
    let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
    let all = if slices >= 64 {
        u64::MAX
    } else {
        (1u64 << slices) - 1
    };
    (0..len).map(|_| lcg(&mut state) & all).collect()
}

/// A script that writes `len` words chosen by [`access_pattern`] and then
/// reads every one of them back in the same order.
///
/// Expected read data accounts for later writes to the same word.
pub fn reference_script(map: &AddressMap, len: usize, seed: u64) -> Vec<Command> {
    let words = access_pattern(map.capacity(), len, seed);
    let mut latest = std::collections::HashMap::new();
    let mut script = Vec::with_capacity(2 * len);

    for (i, &word) in words.iter().enumerate() {
        let data = (i as u64).wrapping_mul(LCG_MUL);
        latest.insert(word, data);
        script.push(Command::write(word as u64 * map.word_stride(), data));
    }
    for (i, &word) in words.iter().enumerate() {
        let addr = word as u64 * map.word_stride();
        script.push(Command::read(addr, latest[&word]).after((i % 4) as u64));
    }
    script
}
