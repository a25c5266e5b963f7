//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and instruction counts, pipeline bubbles by cause, and
//! data memory traffic.

use std::time::Instant;

use crate::common::data::AccessType;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    pub cycles: u64,
    pub reset_cycles: u64,
    pub instructions_retired: u64,

    pub stalls_data: u64,
    pub stalls_flags: u64,
    pub flushes: u64,

    pub fetches: u64,
    pub loads: u64,
    pub stores: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            reset_cycles: 0,
            instructions_retired: 0,
            stalls_data: 0,
            stalls_flags: 0,
            flushes: 0,
            fetches: 0,
            loads: 0,
            stores: 0,
        }
    }
}

impl SimStats {
    /// Counts one memory access.
    pub fn record_access(&mut self, access: AccessType) {
        match access {
            AccessType::Fetch => self.fetches += 1,
            AccessType::Read => self.loads += 1,
            AccessType::Write => self.stores += 1,
        }
    }

    /// Cycles per retired instruction, or zero before anything retires.
    pub fn cpi(&self) -> f64 {
        let run = self.cycles - self.reset_cycles;
        if self.instructions_retired == 0 {
            0.0
        } else {
            run as f64 / self.instructions_retired as f64
        }
    }

    /// Prints a formatted summary of all simulation statistics.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };
        let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;

        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_reset_cycles         {}", self.reset_cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("----------------------------------------------------------");
        println!("PIPELINE BUBBLES");
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            pct(self.stalls_data)
        );
        println!(
            "  stalls.flags           {} ({:.2}%)",
            self.stalls_flags,
            pct(self.stalls_flags)
        );
        println!(
            "  flushes                {} ({:.2}%)",
            self.flushes,
            pct(self.flushes)
        );
        println!("----------------------------------------------------------");
        println!("MEMORY TRAFFIC");
        println!("  {:<22} {}", AccessType::Fetch, self.fetches);
        println!("  {:<22} {}", AccessType::Read, self.loads);
        println!("  {:<22} {}", AccessType::Write, self.stores);
        println!("==========================================================");
    }
}
