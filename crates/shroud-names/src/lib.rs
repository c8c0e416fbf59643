//! Name sequences for the shroud renaming pass.
//!
//! Every factory yields an infinite, deterministic sequence of candidate
//! names and can be restarted with [`NameFactory::reset`]:
//! - [`SimpleNameFactory`]: `a, b, ..., z, aa, ab, ...` (optionally mixed case)
//! - [`NumericNameFactory`]: `1, 2, 3, ...`
//! - [`DictionaryNameFactory`]: words from a [`Dictionary`], then a fallback factory

pub mod factory;
pub use factory::NameFactory;

pub mod simple;
pub use simple::SimpleNameFactory;

pub mod numeric;
pub use numeric::NumericNameFactory;

pub mod dictionary;
pub use dictionary::{Dictionary, DictionaryError, DictionaryMode, DictionaryNameFactory};
