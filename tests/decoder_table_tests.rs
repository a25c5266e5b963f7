//! Tests for decode table generation and addressing.

use cpu16_emulator::core::arch::flags::StatusFlags;
use cpu16_emulator::core::control::builder::{behavior, Behavior};
use cpu16_emulator::core::control::{ControlWordTableBuilder, DecodeTable};
use cpu16_emulator::core::pipeline::signals::*;
use cpu16_emulator::isa::Opcode;
use proptest::prelude::*;
use rstest::rstest;

const UNCONDITIONAL: [Opcode; 22] = [
    Opcode::Nop,
    Opcode::Hlt,
    Opcode::Load,
    Opcode::Store,
    Opcode::Li,
    Opcode::Lui,
    Opcode::Cmp,
    Opcode::Add,
    Opcode::Sub,
    Opcode::And,
    Opcode::Or,
    Opcode::Xor,
    Opcode::Not,
    Opcode::Cmpi,
    Opcode::Addi,
    Opcode::Subi,
    Opcode::Andi,
    Opcode::Ori,
    Opcode::Xori,
    Opcode::Jmp,
    Opcode::Jr,
    Opcode::Jalr,
];

/// Flag a branch predicate tests.
#[derive(Clone, Copy, Debug)]
enum Flag {
    Carry,
    Zero,
    Overflow,
}

impl Flag {
    fn read(self, flags: StatusFlags) -> bool {
        match self {
            Flag::Carry => flags.carry,
            Flag::Zero => flags.zero,
            Flag::Overflow => flags.overflow,
        }
    }
}

fn non_reset_rows(table: &DecodeTable, op: Opcode) -> Vec<(StatusFlags, ControlWord)> {
    StatusFlags::all()
        .map(|flags| (flags, table.lookup(false, flags, op)))
        .collect()
}

/// Tests that the table has 512 rows, each fitting in 21 bits.
#[test]
fn test_table_size_and_width() {
    let table = ControlWordTableBuilder::generate();
    assert_eq!(table.len(), 512);
    assert_eq!(DecodeTable::ROWS, 512);
    for row in table.rows() {
        assert_eq!(row.to_bits() & !ControlWord::MASK, 0);
    }
}

/// Tests that every reset-addressed row is the no-op word.
#[test]
fn test_reset_rows_are_nop() {
    let table = ControlWordTableBuilder::generate();
    let indices = DecodeTable::indices_for_reset();
    assert_eq!(indices.len(), 256);
    for index in indices {
        assert!(table.row(index).is_nop(), "row {:#x} is not NOP", index);
    }
}

/// Tests that unconditional opcodes have one control word for every flag combination.
#[test]
fn test_unconditional_rows_identical() {
    let table = ControlWordTableBuilder::generate();
    for op in UNCONDITIONAL {
        let rows = non_reset_rows(&table, op);
        assert_eq!(rows.len(), 8);
        let first = rows[0].1;
        for (flags, word) in &rows {
            assert_eq!(*word, first, "{} differs at {}", op, flags);
        }
        assert!(matches!(behavior(op), Behavior::Fixed(_)));
    }
}

/// Tests the taken condition of every conditional branch.
#[rstest]
#[case(Opcode::Beq, Flag::Zero, true)]
#[case(Opcode::Bne, Flag::Zero, false)]
#[case(Opcode::Blt, Flag::Overflow, true)]
#[case(Opcode::Bge, Flag::Overflow, false)]
#[case(Opcode::Bltu, Flag::Carry, true)]
#[case(Opcode::Bgeu, Flag::Carry, false)]
fn test_branch_taken_condition(#[case] op: Opcode, #[case] flag: Flag, #[case] taken_when: bool) {
    let table = ControlWordTableBuilder::generate();
    for (flags, word) in non_reset_rows(&table, op) {
        if flag.read(flags) == taken_when {
            assert!(word.jump, "{} should be taken at {}", op, flags);
            assert!(!word.jump_absolute);
            assert_eq!(word.right_op, RightOperand::Imm10_0);
            assert_eq!(word.operand_source, OperandSource::ZeroLeft);
            assert_eq!(word.alu, AluFunction::Add);
            assert!(!word.write_enable);
        } else {
            assert_eq!(word, ControlWord::NOP, "{} should fall through at {}", op, flags);
        }
    }
}

/// Tests that branches have exactly two distinct rows.
#[test]
fn test_conditional_opcodes_have_two_variants() {
    let table = ControlWordTableBuilder::generate();
    for op in Opcode::ALL.into_iter().filter(|op| op.reads_flags()) {
        let mut distinct: Vec<ControlWord> = Vec::new();
        for (_, word) in non_reset_rows(&table, op) {
            if !distinct.contains(&word) {
                distinct.push(word);
            }
        }
        assert_eq!(distinct.len(), 2, "{}", op);
    }
}

/// Tests that ADC adds the carry only when carry is set.
#[test]
fn test_adc_honors_carry() {
    let table = ControlWordTableBuilder::generate();
    let add = table.lookup(false, StatusFlags::default(), Opcode::Add);
    for (flags, word) in non_reset_rows(&table, Opcode::Adc) {
        assert_eq!(word.carry_in, flags.carry);
        if !flags.carry {
            assert_eq!(word, add);
        } else {
            assert_eq!(word, add.with(Signal::CarryIn));
        }
    }
}

/// Tests that SBC borrows only when carry is set.
#[test]
fn test_sbc_honors_carry() {
    let table = ControlWordTableBuilder::generate();
    let sub = table.lookup(false, StatusFlags::default(), Opcode::Sub);
    assert!(sub.carry_in);
    for (flags, word) in non_reset_rows(&table, Opcode::Sbc) {
        assert_eq!(word.carry_in, !flags.carry);
        assert_eq!(word.alu, AluFunction::Sub);
        if !flags.carry {
            assert_eq!(word, sub);
        }
    }
}

/// Tests that reserved and NOP opcodes decode to the no-op word.
#[test]
fn test_reserved_opcodes_are_nop() {
    let table = ControlWordTableBuilder::generate();
    for op in [Opcode::Nop, Opcode::Unused19, Opcode::Unused23] {
        for (_, word) in non_reset_rows(&table, op) {
            assert!(word.is_nop());
        }
    }
}

/// Tests the packed encodings of a few well-known rows.
#[test]
fn test_known_row_encodings() {
    let table = ControlWordTableBuilder::generate();
    let row = |op| table.lookup(false, StatusFlags::default(), op).to_bits();

    assert_eq!(row(Opcode::Nop), 0);
    assert_eq!(row(Opcode::Hlt), 1 << bit::HLT);
    // FI, I = 0b011, WRL, WRH, WBEN
    assert_eq!(row(Opcode::Add), 0x1C_01A0);
    // SelStoreOp = 2, AssertStoreOp, WriteBackSrc, WRL, WRH, WBEN
    assert_eq!(
        row(Opcode::Li),
        (2 << bit::SEL_STORE_OP)
            | (1 << bit::ASSERT_STORE_OP)
            | (1 << bit::WRITE_BACK_SRC)
            | (1 << bit::WRL)
            | (1 << bit::WRH)
            | (1 << bit::WBEN)
    );
}

/// Tests signals of the memory and jump opcodes.
#[test]
fn test_memory_and_jump_signals() {
    let table = ControlWordTableBuilder::generate();
    let row = |op| table.lookup(false, StatusFlags::default(), op);

    let load = row(Opcode::Load);
    assert!(load.mem_load && !load.mem_store);
    assert_eq!(load.write_back_src, WriteBackSource::StoreOperand);

    let store = row(Opcode::Store);
    assert!(store.mem_store && store.assert_store_op && !store.write_enable);
    assert_eq!(store.right_op, RightOperand::Imm10_8_1_0);

    let lui = row(Opcode::Lui);
    assert!(lui.write_high && !lui.write_low);

    let jalr = row(Opcode::Jalr);
    assert!(jalr.jump && jalr.jump_absolute && jalr.write_enable);
    assert_eq!(jalr.store_op, StoreOperand::ProgramCounter);
    assert_eq!(jalr.write_back_src, WriteBackSource::StoreOperand);

    let not = row(Opcode::Not);
    assert_eq!(not.operand_source, OperandSource::ZeroRight);
    assert_eq!(not.alu, AluFunction::SubReverse);
}

/// Tests the address layout shared by builder and decoder.
#[test]
fn test_index_layout() {
    let flags = StatusFlags::new(true, false, true);
    assert_eq!(DecodeTable::index(true, flags, Opcode::Sbc), 256 + 128 + 32 + 31);
    assert_eq!(DecodeTable::index(false, StatusFlags::default(), Opcode::Add), 7);

    let (reset, decoded, op) = DecodeTable::decode_index(0x1e7);
    assert!(reset);
    assert_eq!(decoded, StatusFlags::new(true, true, false));
    assert_eq!(op, Opcode::Add);
}

/// Tests the per-opcode index enumeration.
#[test]
fn test_indices_for_all_conditions() {
    let indices = DecodeTable::indices_for_all_conditions(Opcode::Beq);
    assert_eq!(indices.len(), 16);
    assert_eq!(indices.iter().filter(|&&i| i & 0x100 != 0).count(), 8);
    for &i in &indices {
        assert_eq!(i & 0x1f, Opcode::Beq.bits() as usize);
    }
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 16);
}

/// Tests that generation is deterministic.
#[test]
fn test_generate_is_deterministic() {
    assert_eq!(
        ControlWordTableBuilder::generate(),
        ControlWordTableBuilder::generate()
    );
}

/// Tests the ROM image polarity.
#[test]
fn test_rom_image_is_active_low() {
    let table = ControlWordTableBuilder::generate();
    let rom = table.rom_image();
    assert_eq!(rom.len(), 512);
    for index in DecodeTable::indices_for_reset() {
        assert_eq!(rom[index], 0x1F_FFFF);
    }
    for (word, row) in rom.iter().zip(table.rows()) {
        assert_eq!(ControlWord::from_rom_word(*word), *row);
    }
}

/// Tests that every row survives packing and unpacking.
#[test]
fn test_rows_unpack_to_themselves() {
    let table = ControlWordTableBuilder::generate();
    for row in table.rows() {
        assert_eq!(ControlWord::from_bits(row.to_bits()), *row);
    }
}

/// Tests the exported table entries.
#[test]
fn test_entries_export() {
    let table = ControlWordTableBuilder::generate();
    let entries = table.entries();
    assert_eq!(entries.len(), 512);
    let add = &entries[7];
    assert_eq!(add.opcode, "ADD");
    assert!(!add.reset);
    assert_eq!(add.bits, 0x1C_01A0);

    let json = serde_json::to_string(&entries[7]).expect("serializes");
    assert!(json.contains("\"opcode\":\"ADD\""));
}

proptest! {
    /// Any opcode under any flags decodes to NOP while reset is asserted.
    #[test]
    fn property_reset_forces_nop(word in any::<u16>(), bits in 0u8..8) {
        let table = ControlWordTableBuilder::generate();
        let flags = StatusFlags::new(bits & 4 != 0, bits & 2 != 0, bits & 1 != 0);
        let op = Opcode::from_bits((word >> 11) as u8);
        prop_assert!(table.lookup(true, flags, op).is_nop());
    }
}
