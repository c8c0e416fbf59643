//! Common name syntax for the shroud crates.
//!
//! This crate provides the vocabulary every other crate uses when it takes
//! type names apart or puts them back together:
//! - Separators (`NAMESPACE_SEPARATOR`, `NESTED_SEPARATOR`)
//! - Namespace-prefix and simple-name extraction
//! - Case folding for uniqueness checks
//! - Numeric nested-name classification

// Fully-qualified name syntax
pub mod names;
pub use names::{
    NAMESPACE_SEPARATOR, NESTED_SEPARATOR, fold_case, has_numeric_suffix, namespace_of_prefix,
    namespace_prefix, parent_namespace_prefix, prefix_for_namespace, simple_name,
};
