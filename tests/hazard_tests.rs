//! Tests for the decode stage: hazard detection, stalls and flushes.

use cpu16_emulator::core::arch::flags::StatusFlags;
use cpu16_emulator::core::arch::gpr::Gpr;
use cpu16_emulator::core::control::ControlWordTableBuilder;
use cpu16_emulator::core::pipeline::hazards::{self, StallReason};
use cpu16_emulator::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry};
use cpu16_emulator::core::pipeline::signals::ControlWord;
use cpu16_emulator::core::stages::decode::{DecodeInput, DecodeOutput, DecodeStage};
use cpu16_emulator::isa::encoding::{displacement, li, rri, rrr};
use cpu16_emulator::isa::{Instruction, Opcode};
use proptest::prelude::*;

fn stage() -> DecodeStage {
    DecodeStage::new(ControlWordTableBuilder::generate())
}

fn control(stage: &DecodeStage, ins: Instruction) -> ControlWord {
    stage
        .table()
        .lookup(false, StatusFlags::default(), ins.opcode())
}

fn in_execute(stage: &DecodeStage, ins: Instruction) -> IdExEntry {
    IdExEntry {
        pc: 0x10,
        ins,
        ctrl: control(stage, ins),
        ..IdExEntry::default()
    }
}

fn in_memory(stage: &DecodeStage, ins: Instruction) -> ExMemEntry {
    ExMemEntry {
        pc: 0x0f,
        ins,
        ctrl: control(stage, ins),
        ..ExMemEntry::default()
    }
}

fn input(ins: Instruction) -> DecodeInput {
    DecodeInput {
        fetched: IfIdEntry { pc: 0x11, ins },
        ..DecodeInput::default()
    }
}

fn regs() -> Gpr {
    let mut regs = Gpr::new();
    for i in 0..8u8 {
        regs.write(i, 0x100 + i as u16);
    }
    regs
}

fn add_r0_r1_r2() -> Instruction {
    rrr(Opcode::Add, 0, 1, 2).expect("valid encoding")
}

fn assert_stalled(out: &DecodeOutput, reason: StallReason) {
    assert!(out.stall_pc);
    assert!(out.stall_if);
    assert!(!out.flush);
    assert_eq!(out.stall, Some(reason));
    assert!(out.id_ex.ctrl.is_nop());
}

/// Tests the single-comparator hazard predicate.
#[test]
fn test_hazard_predicate() {
    assert!(!hazards::hazard(None, [0, 0]));
    assert!(hazards::hazard(Some(3), [3, 0]));
    assert!(hazards::hazard(Some(3), [1, 3]));
    assert!(!hazards::hazard(Some(3), [1, 2]));
    assert!(hazards::hazard(Some(0), [0, 0]));
}

/// Tests that an independent instruction decodes without stalling.
#[test]
fn test_no_hazard_reads_operands() {
    let stage = stage();
    let ins = add_r0_r1_r2();
    let mut inp = input(ins);
    inp.ex = in_execute(&stage, rrr(Opcode::Add, 5, 6, 7).expect("valid encoding"));
    inp.mem = in_memory(&stage, li(4, 1).expect("valid encoding"));

    let out = stage.decode(&inp, &regs());
    assert_eq!(out.stall, None);
    assert!(!out.stall_pc && !out.stall_if && !out.flush);
    assert_eq!(out.id_ex.pc, 0x11);
    assert_eq!(out.id_ex.a, 0x101);
    assert_eq!(out.id_ex.b, 0x102);
    assert_eq!(out.id_ex.ctrl, control(&stage, ins));
}

/// Tests a read-after-write on selA with the writer in execute.
#[test]
fn test_raw_hazard_in_execute() {
    let stage = stage();
    let mut inp = input(add_r0_r1_r2());
    inp.ex = in_execute(&stage, rri(Opcode::Addi, 1, 0, 1).expect("valid encoding"));

    let out = stage.decode(&inp, &regs());
    assert_stalled(&out, StallReason::Data);
}

/// Tests a read-after-write on selB with the writer in memory.
#[test]
fn test_raw_hazard_in_memory() {
    let stage = stage();
    let mut inp = input(add_r0_r1_r2());
    inp.mem = in_memory(&stage, li(2, 7).expect("valid encoding"));

    let out = stage.decode(&inp, &regs());
    assert_stalled(&out, StallReason::Data);
}

/// Tests that an in-flight instruction without write enable is not a hazard.
#[test]
fn test_non_writing_instruction_is_not_a_hazard() {
    let stage = stage();
    // Both in-flight instructions name a source in selC but neither writes.
    let mut inp = input(rrr(Opcode::Add, 3, 1, 2).expect("valid encoding"));
    inp.ex = in_execute(&stage, Instruction::new(Opcode::Store, 0b001_000_000_00));
    inp.mem = in_memory(&stage, rrr(Opcode::Cmp, 2, 1, 2).expect("valid encoding"));

    let out = stage.decode(&inp, &regs());
    assert_eq!(out.stall, None);
}

/// Tests that a write to the decoding instruction's own destination is not a hazard.
#[test]
fn test_write_after_write_is_not_a_hazard() {
    let stage = stage();
    let mut inp = input(add_r0_r1_r2());
    inp.ex = in_execute(&stage, li(0, 9).expect("valid encoding"));

    let out = stage.decode(&inp, &regs());
    assert_eq!(out.stall, None);
}

/// Tests that a branch waits for a flag-setting instruction in execute.
#[test]
fn test_flags_hazard() {
    let stage = stage();
    let beq = displacement(Opcode::Beq, 2).expect("valid encoding");
    let cmp = rrr(Opcode::Cmp, 0, 4, 5).expect("valid encoding");

    let mut inp = input(beq);
    inp.ex = in_execute(&stage, cmp);
    let out = stage.decode(&inp, &regs());
    assert_stalled(&out, StallReason::Flags);
    assert!(hazards::flags_hazard(beq, &control(&stage, cmp)));
}

/// Tests that the flags have settled once the setter reaches memory.
#[test]
fn test_flags_settled_after_execute() {
    let stage = stage();
    let mut inp = input(displacement(Opcode::Beq, 2).expect("valid encoding"));
    inp.mem = in_memory(&stage, rrr(Opcode::Cmp, 0, 4, 5).expect("valid encoding"));

    let out = stage.decode(&inp, &regs());
    assert_eq!(out.stall, None);
}

/// Tests that NOT, which leaves the flags alone, never causes a flags hazard.
#[test]
fn test_not_does_not_block_branches() {
    let stage = stage();
    let not = rrr(Opcode::Not, 6, 6, 0).expect("valid encoding");
    assert!(!hazards::flags_hazard(
        displacement(Opcode::Bne, 1).expect("valid encoding"),
        &control(&stage, not)
    ));
}

/// Tests that a taken jump flushes decode even when a hazard is present.
#[test]
fn test_jump_flush_wins_over_stall() {
    let stage = stage();
    let mut inp = input(add_r0_r1_r2());
    inp.ex = in_execute(&stage, li(1, 3).expect("valid encoding"));
    inp.jump_taken = true;

    let out = stage.decode(&inp, &regs());
    assert!(out.flush);
    assert!(!out.stall_pc);
    assert!(!out.stall_if);
    assert_eq!(out.stall, None);
    assert!(out.id_ex.ctrl.is_nop());
}

/// Tests that the flags select the branch row.
#[test]
fn test_branch_row_follows_flags() {
    let stage = stage();
    let mut inp = input(displacement(Opcode::Beq, 4).expect("valid encoding"));

    inp.flags = StatusFlags::new(false, true, false);
    assert!(stage.decode(&inp, &regs()).id_ex.ctrl.jump);

    inp.flags = StatusFlags::new(true, false, true);
    assert!(stage.decode(&inp, &regs()).id_ex.ctrl.is_nop());
}

proptest! {
    /// While reset is asserted decode only emits NOP.
    #[test]
    fn property_reset_decodes_nop(word in any::<u16>(), bits in 0u8..8) {
        let stage = stage();
        let mut inp = input(Instruction(word));
        inp.reset = true;
        inp.flags = StatusFlags::new(bits & 4 != 0, bits & 2 != 0, bits & 1 != 0);
        let out = stage.decode(&inp, &regs());
        prop_assert!(out.id_ex.ctrl.is_nop());
    }

    /// Decode stalls exactly when a pending destination matches a source.
    #[test]
    fn property_stall_matches_sources(word in any::<u16>(), dest in 0u8..8) {
        let stage = stage();
        let ins = Instruction(word);
        let mut inp = input(ins);
        inp.ex = in_execute(&stage, li(dest, 0).expect("valid encoding"));
        let out = stage.decode(&inp, &regs());
        let expected = ins.sel_a() == dest || ins.sel_b() == dest;
        prop_assert_eq!(out.stall == Some(StallReason::Data), expected);
        prop_assert_eq!(out.stall_pc, out.stall.is_some());
    }
}
