//! Short alphabetic names.

use crate::NameFactory;

const CHARACTER_COUNT: usize = 26;

/// Generates `a, b, ..., z, aa, ab, ..., zz, aaa, ...`.
///
/// With mixed case enabled the alphabet is `a..z` followed by `A..Z`, so the
/// sequence runs `a, ..., z, A, ..., Z, aa, ..., aZ, ba, ...`.
#[derive(Debug, Clone)]
pub struct SimpleNameFactory {
    mixed_case: bool,
    index: usize,
}

impl SimpleNameFactory {
    pub fn new(mixed_case: bool) -> Self {
        Self {
            mixed_case,
            index: 0,
        }
    }

    pub fn is_mixed_case(&self) -> bool {
        self.mixed_case
    }

    fn alphabet_size(&self) -> usize {
        if self.mixed_case {
            2 * CHARACTER_COUNT
        } else {
            CHARACTER_COUNT
        }
    }

    /// Name at position `index` of the sequence.
    ///
    /// Positions form a bijective numeral system: indices below the alphabet
    /// size map to one character, and every longer name is the name at
    /// `index / size - 1` followed by the character for `index % size`.
    pub fn name_at(&self, index: usize) -> String {
        let size = self.alphabet_size();
        let mut reversed = Vec::new();
        let mut remaining = index;
        loop {
            reversed.push(char_at(remaining % size));
            if remaining < size {
                break;
            }
            remaining = remaining / size - 1;
        }
        reversed.iter().rev().collect()
    }
}

fn char_at(offset: usize) -> char {
    let (base, offset) = if offset < CHARACTER_COUNT {
        (b'a', offset)
    } else {
        (b'A', offset - CHARACTER_COUNT)
    };
    char::from(base + offset as u8)
}

impl NameFactory for SimpleNameFactory {
    fn reset(&mut self) {
        self.index = 0;
    }

    fn next_name(&mut self) -> String {
        let name = self.name_at(self.index);
        self.index += 1;
        name
    }
}

#[cfg(test)]
#[path = "../tests/simple_tests.rs"]
mod tests;
