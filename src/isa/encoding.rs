//! Instruction encoders.
//!
//! One function per instruction format. Register selects and immediates are
//! range-checked, so an `Ok` result always round-trips through the field
//! accessors on [`Instruction`].

use super::instruction::Instruction;
use super::opcode::Opcode;
use super::NUM_REGISTERS;
use crate::common::error::EncodeError;

fn reg(r: u8) -> Result<u16, EncodeError> {
    if (r as usize) < NUM_REGISTERS {
        Ok(r as u16)
    } else {
        Err(EncodeError::RegisterOutOfRange(r))
    }
}

fn imm(value: i32, bits: u32) -> Result<u16, EncodeError> {
    let min = -(1i32 << (bits - 1));
    let max = (1i32 << (bits - 1)) - 1;
    if value < min || value > max {
        return Err(EncodeError::ImmediateOutOfRange { value, min, max });
    }
    Ok((value as u16) & ((1u16 << bits) - 1))
}

/// Encodes an instruction with no operands (NOP, HLT).
pub fn bare(op: Opcode) -> Instruction {
    Instruction::new(op, 0)
}

/// Encodes a three-register instruction: `op rC, rA, rB`.
///
/// CMP ignores `c`; NOT ignores `b`.
pub fn rrr(op: Opcode, c: u8, a: u8, b: u8) -> Result<Instruction, EncodeError> {
    Ok(Instruction::new(
        op,
        (reg(c)? << 8) | (reg(a)? << 5) | (reg(b)? << 2),
    ))
}

/// Encodes a register-immediate instruction: `op rC, rA, imm` with a 5-bit
/// signed immediate. Covers LOAD, the immediate ALU forms, JR and JALR.
pub fn rri(op: Opcode, c: u8, a: u8, value: i32) -> Result<Instruction, EncodeError> {
    Ok(Instruction::new(
        op,
        (reg(c)? << 8) | (reg(a)? << 5) | imm(value, 5)?,
    ))
}

/// Encodes `STORE rB, imm(rA)`.
pub fn store(a: u8, b: u8, value: i32) -> Result<Instruction, EncodeError> {
    let bits = imm(value, 5)?;
    Ok(Instruction::new(
        Opcode::Store,
        ((bits & 0b11100) << 6) | (reg(a)? << 5) | (reg(b)? << 2) | (bits & 0b11),
    ))
}

/// Encodes `LI rC, imm` with a signed 8-bit immediate.
pub fn li(c: u8, value: i32) -> Result<Instruction, EncodeError> {
    Ok(Instruction::new(Opcode::Li, (reg(c)? << 8) | imm(value, 8)?))
}

/// Encodes `LUI rC, imm` with an unsigned 8-bit immediate.
pub fn lui(c: u8, value: u8) -> Result<Instruction, EncodeError> {
    Ok(Instruction::new(Opcode::Lui, (reg(c)? << 8) | value as u16))
}

/// Encodes an 11-bit displacement instruction (JMP and the branches).
pub fn displacement(op: Opcode, value: i32) -> Result<Instruction, EncodeError> {
    Ok(Instruction::new(op, imm(value, 11)?))
}
