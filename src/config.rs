use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::SimError;
use crate::core::cpu::PIPELINE_DEPTH;
use crate::soc::memory::ram::ADDRESS_SPACE_WORDS;

const DEFAULT_MAX_CYCLES: u64 = 1_000_000;
const DEFAULT_RESET_CYCLES: u32 = PIPELINE_DEPTH;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_instructions: bool,
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    #[serde(default = "default_reset_cycles")]
    pub reset_cycles: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reset_cycles: DEFAULT_RESET_CYCLES,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemoryConfig {
    #[serde(default = "default_data_words")]
    pub data_words: String,

    /// Optional image preloaded into data memory at address 0.
    #[serde(default)]
    pub data_image: Option<String>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: default_data_words(),
            data_image: None,
        }
    }
}

impl MemoryConfig {
    /// Data memory size in words.
    pub fn data_words_val(&self) -> Result<usize, SimError> {
        parse_size(&self.data_words).ok_or_else(|| {
            SimError::InvalidConfig(format!(
                "memory.data_words '{}' is not a decimal or 0x-prefixed size",
                self.data_words
            ))
        })
    }
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.pipeline.reset_cycles < PIPELINE_DEPTH {
            return Err(SimError::InvalidConfig(format!(
                "pipeline.reset_cycles must be at least {} to drain the pipeline, got {}",
                PIPELINE_DEPTH, self.pipeline.reset_cycles
            )));
        }
        let words = self.memory.data_words_val()?;
        if words == 0 || words > ADDRESS_SPACE_WORDS {
            return Err(SimError::InvalidConfig(format!(
                "memory.data_words must be in 1..={}, got {}",
                ADDRESS_SPACE_WORDS, self.memory.data_words
            )));
        }
        Ok(())
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal size.
fn parse_size(s: &str) -> Option<usize> {
    let s = s.trim();
    match s.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_reset_cycles() -> u32 {
    DEFAULT_RESET_CYCLES
}

fn default_data_words() -> String {
    format!("{:#x}", ADDRESS_SPACE_WORDS)
}
