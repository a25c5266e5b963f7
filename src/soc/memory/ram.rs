//! Word-addressed RAM.

use crate::soc::traits::DataBus;

/// Full 16-bit address space.
pub const ADDRESS_SPACE_WORDS: usize = 1 << 16;

/// Word-addressed RAM.
///
/// Sizes below the full address space alias: address `a` maps to word
/// `a % len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ram {
    words: Vec<u16>,
}

impl Ram {
    /// Creates a zeroed RAM of `words` words, clamped to `1..=65536`.
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words.clamp(1, ADDRESS_SPACE_WORDS)],
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; a RAM has at least one word.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Copies `data` into RAM starting at `base`.
    pub fn load_words(&mut self, data: &[u16], base: u16) {
        for (i, &word) in data.iter().enumerate() {
            let addr = base.wrapping_add(i as u16);
            self.store(word, addr);
        }
    }

    /// Reads a word without going through the bus.
    pub fn peek(&self, addr: u16) -> u16 {
        self.words[addr as usize % self.words.len()]
    }

    fn slot(&mut self, addr: u16) -> &mut u16 {
        let len = self.words.len();
        &mut self.words[addr as usize % len]
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new(ADDRESS_SPACE_WORDS)
    }
}

impl DataBus for Ram {
    fn load(&mut self, addr: u16) -> u16 {
        *self.slot(addr)
    }

    fn store(&mut self, value: u16, addr: u16) {
        *self.slot(addr) = value;
    }
}
