use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::cli::args::CliArgs;
use crate::cli::config::{ObfuscationConfig, load_config};
use shroud_model::{ModelFile, ProgramModel};
use shroud_obfuscate::{ObfuscationMapping, obfuscate};

pub fn run(args: &CliArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ObfuscationConfig::default(),
    };
    config.apply_args(args);

    let mut model = load_model(&args.model)?;
    let mapping = rename(&mut model, &config)?;
    info!(types = mapping.types().len(), "renamed program model");

    let text = mapping.to_string();
    match &args.print_mapping {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write mapping: {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("failed to write mapping to stdout")?,
    }

    if let Some(path) = &args.print_model {
        write_model(path, &model)?;
    }
    Ok(())
}

/// Renames every type, member and metadata name in `model` and returns the
/// resulting mapping.
pub fn rename(model: &mut ProgramModel, config: &ObfuscationConfig) -> Result<ObfuscationMapping> {
    let options = config.to_options()?;
    obfuscate(model, options);
    Ok(ObfuscationMapping::collect(model))
}

pub fn load_model(path: &Path) -> Result<ProgramModel> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read program model: {}", path.display()))?;
    let file: ModelFile = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse program model: {}", path.display()))?;
    ProgramModel::from_file(file)
        .with_context(|| format!("invalid program model: {}", path.display()))
}

pub fn write_model(path: &Path, model: &ProgramModel) -> Result<()> {
    let json = serde_json::to_string_pretty(&model.to_file())
        .context("failed to serialize program model")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write program model: {}", path.display()))
}
