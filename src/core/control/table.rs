//! Decode table storage and addressing.
//!
//! A table address is nine bits wide:
//!
//! ```text
//!   8      7      6      5     4..0
//! reset  carry  zero  overflow opcode
//! ```
//!
//! Changing this layout changes every burned ROM, so it is fixed here and
//! shared by the builder and the decode stage.

use serde::Serialize;

use crate::core::arch::flags::StatusFlags;
use crate::core::pipeline::signals::ControlWord;
use crate::isa::Opcode;

/// One row of the table with its address decoded, for export.
#[derive(Clone, Debug, Serialize)]
pub struct TableEntry {
    /// Row address.
    pub index: usize,
    /// Reset line at this address.
    pub reset: bool,
    /// Carry flag at this address.
    pub carry: bool,
    /// Zero flag at this address.
    pub zero: bool,
    /// Overflow flag at this address.
    pub overflow: bool,
    /// Opcode mnemonic at this address.
    pub opcode: &'static str,
    /// Packed logical control word.
    pub bits: u32,
    /// Decoded control word.
    pub control: ControlWord,
}

/// The decoder lookup table.
///
/// Built once by [`crate::core::control::ControlWordTableBuilder::generate`]
/// and never modified. Each machine owns its own copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeTable {
    rows: Box<[ControlWord]>,
}

impl DecodeTable {
    /// Number of rows.
    pub const ROWS: usize = 512;

    const RESET_BIT: usize = 1 << 8;

    pub(crate) fn from_rows(rows: Vec<ControlWord>) -> Self {
        debug_assert_eq!(rows.len(), Self::ROWS);
        Self {
            rows: rows.into_boxed_slice(),
        }
    }

    /// Computes the row address for a decode condition.
    pub fn index(reset: bool, flags: StatusFlags, opcode: Opcode) -> usize {
        (reset as usize) << 8
            | (flags.carry as usize) << 7
            | (flags.zero as usize) << 6
            | (flags.overflow as usize) << 5
            | opcode.bits() as usize
    }

    /// Splits a row address into its reset line, flags and opcode.
    pub fn decode_index(index: usize) -> (bool, StatusFlags, Opcode) {
        let flags = StatusFlags::new(index & 0x80 != 0, index & 0x40 != 0, index & 0x20 != 0);
        (
            index & Self::RESET_BIT != 0,
            flags,
            Opcode::from_bits(index as u8),
        )
    }

    /// Every address with the reset line asserted.
    pub fn indices_for_reset() -> Vec<usize> {
        (0..Self::ROWS).filter(|i| i & Self::RESET_BIT != 0).collect()
    }

    /// All sixteen addresses for `opcode`: every flag combination with reset
    /// both deasserted and asserted, deasserted first.
    pub fn indices_for_all_conditions(opcode: Opcode) -> Vec<usize> {
        [false, true]
            .into_iter()
            .flat_map(|reset| StatusFlags::all().map(move |flags| Self::index(reset, flags, opcode)))
            .collect()
    }

    /// Number of rows, always [`DecodeTable::ROWS`].
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `index`, wrapping to nine bits.
    pub fn row(&self, index: usize) -> ControlWord {
        self.rows[index % Self::ROWS]
    }

    /// Returns the control word for an opcode under the given condition.
    pub fn lookup(&self, reset: bool, flags: StatusFlags, opcode: Opcode) -> ControlWord {
        self.rows[Self::index(reset, flags, opcode)]
    }

    /// All rows in address order.
    pub fn rows(&self) -> &[ControlWord] {
        &self.rows
    }

    /// All rows with their addresses decoded.
    pub fn entries(&self) -> Vec<TableEntry> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, control)| {
                let (reset, flags, opcode) = Self::decode_index(index);
                TableEntry {
                    index,
                    reset,
                    carry: flags.carry,
                    zero: flags.zero,
                    overflow: flags.overflow,
                    opcode: opcode.mnemonic(),
                    bits: control.to_bits(),
                    control: *control,
                }
            })
            .collect()
    }

    /// The table as burned into the decoder ROM, one word per address.
    pub fn rom_image(&self) -> Vec<u32> {
        self.rows.iter().map(ControlWord::to_rom_word).collect()
    }
}
