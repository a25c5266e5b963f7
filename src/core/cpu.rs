//! The pipeline sequencer.
//!
//! [`Cpu`] owns the program counter, register file, flags, latches and run
//! state, and advances all five stages by one clock edge per [`Cpu::step`].

use log::{debug, info};

use super::arch::flags::StatusFlags;
use super::arch::gpr::Gpr;
use super::arch::state::RunState;
use super::control::ControlWordTableBuilder;
use super::pipeline::hazards::StallReason;
use super::pipeline::latches::PipelineLatches;
use super::stages::decode::{DecodeInput, DecodeStage};
use super::stages::execute::{execute_stage, ExecutePc};
use super::stages::fetch::{fetch_stage, FetchControl};
use super::stages::memory_access::{bypass_memory, memory_stage};
use super::stages::write_back::write_back_stage;
use crate::common::data::AccessType;
use crate::common::error::SimError;
use crate::config::Config;
use crate::soc::{DataBus, Ram};
use crate::stats::SimStats;

/// Number of pipeline stages, and the minimum reset length.
pub const PIPELINE_DEPTH: u32 = 5;

/// A cycle-level model of the 16-bit pipelined CPU.
///
/// The machine powers up in reset. Step it until [`Cpu::is_resetting`]
/// clears (or call [`Cpu::finish_reset`]) before expecting instructions to
/// execute.
pub struct Cpu<B: DataBus = Ram> {
    pub regs: Gpr,
    pub pc: u16,
    pub flags: StatusFlags,
    pub latches: PipelineLatches,
    pub stats: SimStats,

    state: RunState,
    reset_cycles: u32,
    decoder: DecodeStage,
    program: Vec<u16>,
    bus: B,
}

impl Cpu<Ram> {
    /// Creates a CPU with a full-size RAM as data memory.
    pub fn with_ram(program: Vec<u16>) -> Self {
        Self::new(program, Ram::default())
    }
}

impl<B: DataBus> Cpu<B> {
    /// Creates a CPU in reset with a freshly generated decode table.
    ///
    /// # Arguments
    ///
    /// * `program` - Instruction memory, word 0 first
    /// * `bus` - Data memory
    pub fn new(program: Vec<u16>, bus: B) -> Self {
        let mut cpu = Self {
            regs: Gpr::new(),
            pc: 0,
            flags: StatusFlags::default(),
            latches: PipelineLatches::default(),
            stats: SimStats::default(),
            state: RunState::Resetting(PIPELINE_DEPTH),
            reset_cycles: PIPELINE_DEPTH,
            decoder: DecodeStage::new(ControlWordTableBuilder::generate()),
            program,
            bus,
        };
        cpu.reset();
        cpu
    }

    /// Creates a CPU using the reset length from `config`.
    pub fn with_config(program: Vec<u16>, bus: B, config: &Config) -> Self {
        let mut cpu = Self::new(program, bus);
        cpu.reset_cycles = config.pipeline.reset_cycles.max(PIPELINE_DEPTH);
        cpu.reset();
        cpu
    }

    /// Asserts reset.
    ///
    /// Every latch is flushed to a bubble and the program counter cleared.
    /// The machine stays in reset for the configured number of steps, during
    /// which the data bus is never accessed. Registers and flags keep their
    /// values.
    pub fn reset(&mut self) {
        self.latches.flush();
        self.pc = 0;
        self.state = RunState::Resetting(self.reset_cycles);
    }

    /// Steps until the reset sequence has drained.
    pub fn finish_reset(&mut self) {
        while self.state.is_resetting() {
            self.step();
        }
    }

    /// Advances the pipeline by one clock edge.
    ///
    /// Stages run write-back first so that a register written this edge is
    /// visible to decode in the same edge. Every stage otherwise works from
    /// the latches as they stood at the start of the edge. A halted machine
    /// ignores the call.
    pub fn step(&mut self) {
        if self.state.is_halted() {
            return;
        }

        let resetting = self.state.is_resetting();
        let start = self.latches;
        let flags = self.flags;
        let pc = self.pc;

        write_back_stage(&start.mem_wb, &mut self.regs);
        let retired = !start.mem_wb.ctrl.is_nop();
        let halt = start.mem_wb.ctrl.halt;

        let mem_wb = if resetting {
            bypass_memory(&start.ex_mem)
        } else {
            if start.ex_mem.ctrl.mem_store {
                self.stats.record_access(AccessType::Write);
            }
            if start.ex_mem.ctrl.mem_load {
                self.stats.record_access(AccessType::Read);
            }
            memory_stage(&start.ex_mem, &mut self.bus)
        };

        let ex = execute_stage(
            &start.id_ex,
            ExecutePc {
                fetch: pc,
                link: start.if_id.pc,
            },
        );

        let id = self.decoder.decode(
            &DecodeInput {
                fetched: start.if_id,
                reset: resetting,
                flags,
                ex: start.id_ex,
                mem: start.ex_mem,
                jump_taken: ex.jump.is_some(),
            },
            &self.regs,
        );

        let fetch = fetch_stage(
            &self.program,
            pc,
            start.if_id,
            FetchControl {
                reset: resetting,
                stall_pc: id.stall_pc,
                stall_if: id.stall_if,
                jump: ex.jump,
            },
        );

        if let Some(new_flags) = ex.flags {
            self.flags = new_flags;
        }
        self.latches = PipelineLatches {
            if_id: fetch.if_id,
            id_ex: id.id_ex,
            ex_mem: ex.ex_mem,
            mem_wb,
        };
        self.pc = fetch.pc;

        self.stats.cycles += 1;
        if retired {
            self.stats.instructions_retired += 1;
        }
        match id.stall {
            Some(StallReason::Data) => self.stats.stalls_data += 1,
            Some(StallReason::Flags) => self.stats.stalls_flags += 1,
            None => {}
        }
        if id.flush {
            self.stats.flushes += 1;
        }
        if !resetting && ex.jump.is_none() && !id.stall_if {
            self.stats.record_access(AccessType::Fetch);
        }

        self.state = match self.state {
            RunState::Resetting(left) => {
                self.stats.reset_cycles += 1;
                if left <= 1 {
                    info!("reset complete after {} cycles", self.reset_cycles);
                    RunState::Running
                } else {
                    RunState::Resetting(left - 1)
                }
            }
            RunState::Running if halt => {
                info!(
                    "halted at pc={:#06x} after {} cycles",
                    start.mem_wb.pc, self.stats.cycles
                );
                RunState::Halted
            }
            state => state,
        };
    }

    /// Runs until the machine halts.
    ///
    /// Finishes any pending reset first. Cycles spent in reset do not count
    /// against `max_cycles`.
    ///
    /// # Returns
    ///
    /// The number of cycles stepped after reset, or
    /// [`SimError::CycleLimit`] if the machine is still running after
    /// `max_cycles`.
    pub fn run(&mut self, max_cycles: u64) -> Result<u64, SimError> {
        self.finish_reset();
        let mut cycles = 0;
        while !self.is_halted() {
            if cycles >= max_cycles {
                debug!("cycle limit reached at pc={:#06x}", self.pc);
                return Err(SimError::CycleLimit(max_cycles));
            }
            self.step();
            cycles += 1;
        }
        Ok(cycles)
    }

    /// Returns true once a halt instruction has reached write-back.
    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    /// Returns true while reset is asserted.
    pub fn is_resetting(&self) -> bool {
        self.state.is_resetting()
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Reads a register directly, bypassing the pipeline.
    pub fn get_register(&self, idx: u8) -> u16 {
        self.regs.read(idx)
    }

    /// Writes a register directly, bypassing the pipeline.
    pub fn set_register(&mut self, idx: u8, val: u16) {
        self.regs.write(idx, val);
    }

    /// The decode stage and its table.
    pub fn decoder(&self) -> &DecodeStage {
        &self.decoder
    }

    /// Instruction memory.
    pub fn program(&self) -> &[u16] {
        &self.program
    }

    /// Data memory.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Data memory, mutably.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Prints the program counter, flags and registers to stdout.
    pub fn dump_state(&self) {
        println!("pc={:#06x} {} state={:?}", self.pc, self.flags, self.state);
        self.regs.dump();
    }
}
