use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the shroud binary.
#[derive(Parser, Debug)]
#[command(
    name = "shroud",
    version,
    about = "Assign short, collision-free names to the types and members of a program"
)]
pub struct CliArgs {
    // ==================== Inputs ====================
    /// Program model to rename (JSON).
    #[arg(long, value_name = "FILE")]
    pub model: PathBuf,

    /// Obfuscation configuration (JSON).
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // ==================== Outputs ====================
    /// Write the mapping to this file instead of stdout.
    #[arg(long = "print-mapping", value_name = "FILE")]
    pub print_mapping: Option<PathBuf>,

    /// Write the renamed program model to this file (JSON).
    #[arg(long = "print-model", value_name = "FILE")]
    pub print_model: Option<PathBuf>,

    // ==================== Overrides ====================
    /// Move every renamed type into this namespace.
    #[arg(long, value_name = "PREFIX")]
    pub repackage: Option<String>,

    /// Place every renamed namespace under this namespace.
    #[arg(long, value_name = "PREFIX")]
    pub flatten: Option<String>,

    /// Keep the names of namespaces matching this pattern list (repeatable).
    #[arg(long = "keep-package", value_name = "PATTERN")]
    pub keep_package: Vec<String>,

    /// Never generate type names that differ only in case.
    #[arg(long = "no-mixed-case")]
    pub no_mixed_case: bool,
}
