//! Tests for the ALU model.

use cpu16_emulator::core::arch::flags::StatusFlags;
use cpu16_emulator::core::pipeline::signals::{AluFunction, OperandSource};
use cpu16_emulator::core::units::alu::Alu;
use rstest::rstest;

fn flags(carry: bool, zero: bool, overflow: bool) -> StatusFlags {
    StatusFlags::new(carry, zero, overflow)
}

/// Tests arithmetic results and the flags they produce.
#[rstest]
#[case::add(AluFunction::Add, false, 2, 1, 3, flags(false, false, false))]
#[case::add_signed_overflow(AluFunction::Add, false, 0x7FFF, 1, 0x8000, flags(false, false, true))]
#[case::add_carry_out(AluFunction::Add, false, 0xFFFF, 1, 0, flags(true, true, false))]
#[case::add_with_carry(AluFunction::Add, true, 0, 0, 1, flags(false, false, false))]
#[case::cmp_less(AluFunction::Sub, true, 1, 2, 0xFFFF, flags(false, false, false))]
#[case::zero_minus_one(AluFunction::Sub, true, 0, 1, 0xFFFF, flags(false, false, false))]
#[case::min_minus_one(AluFunction::Sub, true, 0x8000, 1, 0x7FFF, flags(true, false, true))]
#[case::zero_minus_min(AluFunction::Sub, true, 0, 0x8000, 0x8000, flags(false, false, true))]
#[case::negative_compare(AluFunction::Sub, true, 0xFFFE, 0xFFFF, 0xFFFF, flags(false, false, false))]
#[case::cmp_equal(AluFunction::Sub, true, 2, 2, 0, flags(true, true, false))]
#[case::cmp_greater(AluFunction::Sub, true, 5, 2, 3, flags(true, false, false))]
#[case::sub_with_borrow(AluFunction::Sub, false, 5, 2, 2, flags(true, false, false))]
#[case::sub_reverse(AluFunction::SubReverse, true, 2, 5, 3, flags(true, false, false))]
#[case::sub_reverse_overflow(AluFunction::SubReverse, true, 1, 0x8000, 0x7FFF, flags(true, false, true))]
fn test_arithmetic(
    #[case] func: AluFunction,
    #[case] carry_in: bool,
    #[case] a: u16,
    #[case] b: u16,
    #[case] result: u16,
    #[case] expected: StatusFlags,
) {
    let out = Alu::execute(func, OperandSource::Registers, carry_in, a, b);
    assert_eq!(out.result, result);
    assert_eq!(out.flags, expected);
}

/// Tests the logic functions, which never produce carry.
#[rstest]
#[case(AluFunction::Xor, 0xCAFE, 0xCAFE, 0)]
#[case(AluFunction::Or, 0xF000, 0x000F, 0xF00F)]
#[case(AluFunction::And, 0xFF0F, 0x0FFF, 0x0F0F)]
#[case(AluFunction::Clear, 0x1234, 0x5678, 0)]
#[case(AluFunction::Preset, 0x1234, 0x5678, 0xFFFF)]
fn test_logic(#[case] func: AluFunction, #[case] a: u16, #[case] b: u16, #[case] result: u16) {
    let out = Alu::execute(func, OperandSource::Registers, true, a, b);
    assert_eq!(out.result, result);
    assert!(!out.flags.carry);
    assert!(!out.flags.overflow);
    assert_eq!(out.flags.zero, result == 0);
}

/// Tests NOT as reverse subtraction against a zeroed right operand.
#[test]
fn test_not() {
    let out = Alu::execute(
        AluFunction::SubReverse,
        OperandSource::ZeroRight,
        false,
        0x00FF,
        0x1234,
    );
    assert_eq!(out.result, 0xFF00);
    assert!(!out.flags.carry);
}

/// Tests that zeroing the left operand passes an immediate through.
#[test]
fn test_zero_left_passes_right_operand() {
    let out = Alu::execute(AluFunction::Or, OperandSource::ZeroLeft, false, 0xAAAA, 0xFFFE);
    assert_eq!(out.result, 0xFFFE);

    let out = Alu::execute(AluFunction::Add, OperandSource::ZeroLeft, false, 0xAAAA, 3);
    assert_eq!(out.result, 3);
}

/// Tests that gating both operands leaves only the carry input.
#[test]
fn test_zero_both() {
    let out = Alu::execute(AluFunction::Add, OperandSource::ZeroBoth, true, 0x1111, 0x2222);
    assert_eq!(out.result, 1);
}
