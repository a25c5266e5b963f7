//! 16-bit Pipelined CPU Model.
//!
//! This crate implements a cycle-accurate model of a small 16-bit, five-stage
//! pipelined processor. It reproduces the decoder microcode bit for bit and
//! the pipeline's stall and flush behavior cycle for cycle, so programs and
//! control logic can be validated before they are committed to hardware.
//!
//! # Architecture
//!
//! * **Decode table**: 512 control words indexed by reset, flags and opcode.
//! * **Pipeline**: Fetch, Decode, Execute, Memory, Writeback with no forwarding;
//!   hazards stall decode and taken jumps flush it.
//! * **Memory**: Separate program memory and a host-supplied data bus.
//!
//! # Modules
//!
//! * `common`: Shared types and error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Program loaders.
//! * `soc`: Data memory.
//! * `stats`: Performance statistics collection.

/// Shared types and error definitions.
///
/// Provides the memory access classification and the error types raised by
/// loaders, configuration parsing and instruction encoding.
pub mod common;

/// Configuration system for tracing, reset length and memory size.
///
/// Loads and parses TOML configuration files.
pub mod config;

/// CPU core implementation including the decoder and pipeline stages.
///
/// Implements the decode table builder, the five-stage pipeline and the
/// sequencer that advances it one clock edge at a time.
pub mod core;

/// Instruction Set Architecture definitions.
///
/// Opcodes, operand field extraction, encoders and disassembly.
pub mod isa;

/// Simulation harness and binary loaders.
pub mod sim;

/// Data memory interface and implementations.
pub mod soc;

/// Performance statistics collection and reporting.
///
/// Tracks cycle counts, retired instructions, pipeline bubbles and memory
/// traffic during simulation.
pub mod stats;
