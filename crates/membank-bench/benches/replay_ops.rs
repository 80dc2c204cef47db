//! Criterion benchmarks for script parsing and playback.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use membank_array::BankedMemory;
use membank_bench::{reference_config, reference_script};
use membank_replay::{
    spawn_memory_slave, AddressMap, MemoryPort, ScriptPlayer, ScriptReader, ScriptWriter,
};

const REQUESTS: usize = 1024;

fn script_text(map: &AddressMap) -> Vec<u8> {
    let mut writer = ScriptWriter::new(Vec::new());
    for cmd in reference_script(map, REQUESTS, 42) {
        writer.write_command(&cmd).unwrap();
    }
    writer.finish().unwrap()
}

/// Benchmark: parse a 2K-line script.
fn bench_parse_script(c: &mut Criterion) {
    let mem = BankedMemory::<u64>::new(reference_config()).unwrap();
    let text = script_text(&AddressMap::new(mem.geometry()));

    c.bench_function("parse_script_2k", |b| {
        b.iter(|| {
            let player = ScriptPlayer::from_reader(ScriptReader::new(text.as_slice())).unwrap();
            black_box(player.commands().len());
        });
    });
}

/// Benchmark: play 2K requests through a direct memory port.
fn bench_play_direct(c: &mut Criterion) {
    let mut mem = BankedMemory::<u64>::new(reference_config()).unwrap();
    let map = AddressMap::new(mem.geometry());
    let player = ScriptPlayer::new(reference_script(&map, REQUESTS, 42)).with_warmup(0);

    c.bench_function("play_direct_2k", |b| {
        b.iter(|| {
            let report = player.play(&mut MemoryPort::new(&mut mem)).unwrap();
            black_box(report);
        });
    });
}

/// Benchmark: play 2K requests through the channel transport.
fn bench_play_channel(c: &mut Criterion) {
    let mem = BankedMemory::<u64>::new(reference_config()).unwrap();
    let map = AddressMap::new(mem.geometry());
    let player = ScriptPlayer::new(reference_script(&map, REQUESTS, 42)).with_warmup(0);
    let (mut port, slave) = spawn_memory_slave(mem, map);

    c.bench_function("play_channel_2k", |b| {
        b.iter(|| {
            let report = player.play(&mut port).unwrap();
            black_box(report);
        });
    });

    drop(port);
    slave.join().unwrap();
}

criterion_group!(
    benches,
    bench_parse_script,
    bench_play_direct,
    bench_play_channel
);
criterion_main!(benches);
