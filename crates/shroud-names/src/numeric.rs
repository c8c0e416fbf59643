//! Decimal names for anonymous and synthetic nested types.

use crate::NameFactory;

/// Generates `1, 2, 3, ...`.
#[derive(Debug, Clone, Default)]
pub struct NumericNameFactory {
    index: u64,
}

impl NumericNameFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameFactory for NumericNameFactory {
    fn reset(&mut self) {
        self.index = 0;
    }

    fn next_name(&mut self) -> String {
        self.index += 1;
        self.index.to_string()
    }
}
