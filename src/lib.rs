//! shroud: collision-free identifier assignment for program obfuscation.
//!
//! The renaming core lives in the member crates; this package re-exports them
//! and adds the command-line front end.

pub use shroud_common as common;
pub use shroud_model as model;
pub use shroud_names as names;
pub use shroud_obfuscate as obfuscate;

pub use shroud_model::{ModelFile, ProgramModel};
pub use shroud_obfuscate::{ObfuscationMapping, ObfuscationOptions};

// Tracing configuration (text / tree / JSON output for debugging)
pub mod tracing_config;

// Command-line front end
pub mod cli;
