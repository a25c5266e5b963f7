//! Program image loading.
//!
//! Two formats are accepted. Text images (`.hex` or `.txt`) hold one or more
//! hexadecimal words per line with optional `0x` prefixes; `#` and `;` start
//! comments. Anything else is read as raw big-endian 16-bit words.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;
use crate::soc::memory::ram::ADDRESS_SPACE_WORDS;

/// Loads a program image from disk.
pub fn load_program(path: &Path) -> Result<Vec<u16>, SimError> {
    let is_text = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("hex") | Some("txt")
    );

    let words = if is_text {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_hex_words(&text)?
    } else {
        let bytes = fs::read(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        words_from_bytes(&bytes)?
    };

    if words.len() > ADDRESS_SPACE_WORDS {
        return Err(SimError::ProgramTooLarge(words.len()));
    }
    Ok(words)
}

/// Parses a text image into words.
pub fn parse_hex_words(text: &str) -> Result<Vec<u16>, SimError> {
    let mut words = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let code = line.split(['#', ';']).next().unwrap_or("");
        for token in code.split_whitespace() {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            let word = u16::from_str_radix(digits, 16).map_err(|e| SimError::ProgramFormat {
                line: n + 1,
                reason: format!("'{}' is not a 16-bit hex word: {}", token, e),
            })?;
            words.push(word);
        }
    }
    Ok(words)
}

/// Converts raw big-endian bytes into words.
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u16>, SimError> {
    if bytes.len() % 2 != 0 {
        return Err(SimError::ProgramFormat {
            line: 0,
            reason: format!("binary image has odd length {}", bytes.len()),
        });
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect())
}
