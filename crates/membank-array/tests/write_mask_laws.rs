//! Property tests for masked, banked writes.
//!
//! Each law is checked against a shadow model: a plain `Vec<u64>` of
//! serialized words, updated slice by slice with the same mask.

use membank_array::{ArrayConfig, ArrayError, BankedMemory};
use membank_core::{BankIndex, Bits, LocalIndex, Marshal, MemoryAccess, WriteMask};
use membank_test_utils::{mask_of, Rgb, Tag12};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

/// Apply `new` over `old` slice-wise under `mask`, as a plain integer.
fn merge(old: u64, new: u64, mask: u64, slices: usize, slice_width: usize) -> u64 {
    let mut out = old;
    for i in 0..slices {
        if mask >> i & 1 == 1 {
            let field = ((1u64 << slice_width) - 1) << (i * slice_width);
            out = (out & !field) | (new & field);
        }
    }
    out
}

#[derive(Clone, Debug)]
struct Op {
    index: usize,
    bank: usize,
    value: u32,
    mask: u64,
    enable: bool,
}

fn ops(entries_per_bank: usize, banks: usize, slices: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        (
            0..entries_per_bank,
            0..banks,
            any::<u32>(),
            0..(1u64 << slices),
            any::<bool>(),
        )
            .prop_map(|(index, bank, value, mask, enable)| Op {
                index,
                bank,
                value,
                mask,
                enable,
            }),
        0..64,
    )
}

// ── Scenario ────────────────────────────────────────────────────

#[test]
fn partial_writes_merge_halves() {
    let mut mem = BankedMemory::<u16>::new(ArrayConfig::new(4, 2).with_byte_enables(2)).unwrap();
    let (idx, bank) = (LocalIndex(1), BankIndex(1));

    mem.write(idx, bank, &0x1234, &mask_of(2, &[0]), true);
    mem.write(idx, bank, &0x5678, &mask_of(2, &[1]), true);
    assert_eq!(mem.read(idx, bank), 0x5634);

    mem.clear();
    for bank in 0..2 {
        for idx in 0..2 {
            assert_eq!(mem.read(LocalIndex(idx), BankIndex(bank)), 0);
        }
    }
}

#[test]
fn fresh_array_holds_default_in_every_slot() {
    let mem = BankedMemory::<Rgb>::new(ArrayConfig::new(6, 3).with_byte_enables(3)).unwrap();
    for bank in 0..3 {
        for idx in 0..2 {
            assert_eq!(mem.read(LocalIndex(idx), BankIndex(bank)), Rgb::default());
        }
    }
}

#[test]
fn clear_differs_from_default_when_default_is_nonzero() {
    let mut mem = BankedMemory::<Tag12>::new(ArrayConfig::single_bank(2).with_byte_enables(3)).unwrap();
    assert_eq!(mem.read_bank0(LocalIndex(0)), Tag12::default());
    mem.clear();
    assert_eq!(mem.read_bank0(LocalIndex(0)), Tag12(0));
}

#[test]
fn construction_rejects_indivisible_geometry() {
    assert_eq!(
        BankedMemory::<u16>::new(ArrayConfig::new(5, 2)).err(),
        Some(ArrayError::EntriesNotDivisible {
            total_entries: 5,
            bank_count: 2
        })
    );
    assert_eq!(
        BankedMemory::<Rgb>::new(ArrayConfig::single_bank(4).with_byte_enables(5)).err(),
        Some(ArrayError::WidthNotDivisible {
            word_width: 24,
            byte_enables: 5
        })
    );
}

#[test]
fn works_through_the_trait_object() {
    let mut mem = BankedMemory::<u32>::new(ArrayConfig::new(8, 4).with_byte_enables(4)).unwrap();
    let port: &mut dyn MemoryAccess<u32> = &mut mem;
    port.store(LocalIndex(1), BankIndex(3), &0xDEAD_BEEF);
    port.write(
        LocalIndex(1),
        BankIndex(3),
        &0,
        &WriteMask::from_u64(4, 0b0110),
        true,
    );
    assert_eq!(port.read(LocalIndex(1), BankIndex(3)), 0xDE00_00EF);
}

// ── Laws ────────────────────────────────────────────────────────

proptest! {
    /// Full-mask enabled write then read returns the value.
    #[test]
    fn full_write_round_trips(
        value in any::<u64>(),
        idx in 0usize..4,
        bank in 0usize..2,
        slices in prop::sample::select(vec![1usize, 2, 4, 8]),
    ) {
        let cfg = ArrayConfig::new(8, 2).with_byte_enables(slices);
        let mut mem = BankedMemory::<u64>::new(cfg).unwrap();
        mem.write(LocalIndex(idx), BankIndex(bank), &value, &WriteMask::all(slices), true);
        prop_assert_eq!(mem.read(LocalIndex(idx), BankIndex(bank)), value);
    }

    /// A disabled write changes nothing, whatever the mask.
    #[test]
    fn disabled_write_is_a_no_op(value in any::<u32>(), mask in 0u64..16) {
        let mut mem = BankedMemory::<u32>::new(ArrayConfig::new(4, 2).with_byte_enables(4)).unwrap();
        mem.store(LocalIndex(0), BankIndex(0), &0x0102_0304);
        mem.write(LocalIndex(0), BankIndex(0), &value, &WriteMask::from_u64(4, mask), false);
        prop_assert_eq!(mem.read(LocalIndex(0), BankIndex(0)), 0x0102_0304);
    }

    /// Masked writes merge slice-wise and touch nothing else.
    #[test]
    fn masked_writes_match_shadow_model(script in ops(4, 2, 4)) {
        let mut mem = BankedMemory::<u32>::new(ArrayConfig::new(8, 2).with_byte_enables(4)).unwrap();
        mem.clear();
        let mut shadow = vec![0u64; 8];

        for op in &script {
            mem.write(
                LocalIndex(op.index),
                BankIndex(op.bank),
                &op.value,
                &WriteMask::from_u64(4, op.mask),
                op.enable,
            );
            if op.enable {
                let slot = op.bank * 4 + op.index;
                shadow[slot] = merge(shadow[slot], u64::from(op.value), op.mask, 4, 8);
            }
        }

        for bank in 0..2 {
            for idx in 0..4 {
                let got = mem.read(LocalIndex(idx), BankIndex(bank));
                prop_assert_eq!(u64::from(got), shadow[bank * 4 + idx]);
            }
        }
    }

    /// Writes to one bank never show up in another.
    #[test]
    fn banks_are_isolated(value in any::<u16>(), idx in 0usize..4) {
        let mut mem = BankedMemory::<u16>::new(ArrayConfig::new(12, 3).with_byte_enables(2)).unwrap();
        let before: Vec<u16> = (0..3).map(|b| mem.read(LocalIndex(idx), BankIndex(b))).collect();
        mem.store(LocalIndex(idx), BankIndex(1), &value);
        prop_assert_eq!(mem.read(LocalIndex(idx), BankIndex(0)), before[0]);
        prop_assert_eq!(mem.read(LocalIndex(idx), BankIndex(2)), before[2]);
        prop_assert_eq!(mem.read(LocalIndex(idx), BankIndex(1)), value);
    }

    /// Clear zeroes every slot regardless of history.
    #[test]
    fn clear_zeroes_everything(script in ops(2, 3, 2)) {
        let mut mem = BankedMemory::<u16>::new(ArrayConfig::new(6, 3).with_byte_enables(2)).unwrap();
        for op in &script {
            mem.write(
                LocalIndex(op.index),
                BankIndex(op.bank),
                &(op.value as u16),
                &WriteMask::from_u64(2, op.mask),
                op.enable,
            );
        }
        mem.clear();
        for bank in 0..3 {
            for idx in 0..2 {
                prop_assert!(mem.read_bits(LocalIndex(idx), BankIndex(bank)).is_zero());
            }
        }
    }

    /// Odd slice widths: a 12-bit tag over 3 slices of 4 bits.
    #[test]
    fn nibble_slices_merge(old in 0u16..0x1000, new in 0u16..0x1000, mask in 0u64..8) {
        let mut mem = BankedMemory::<Tag12>::new(ArrayConfig::single_bank(1).with_byte_enables(3)).unwrap();
        mem.store(LocalIndex(0), BankIndex(0), &Tag12(old));
        mem.write(LocalIndex(0), BankIndex(0), &Tag12(new), &WriteMask::from_u64(3, mask), true);
        let expected = merge(u64::from(old), u64::from(new), mask, 3, 4);
        prop_assert_eq!(mem.read_bank0(LocalIndex(0)).to_bits(), Bits::from_u64(12, expected));
    }
}
