use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::args::CliArgs;
use shroud_names::{Dictionary, DictionaryMode};
use shroud_obfuscate::{
    NameObfuscatorOptions, NamespaceMatcher, ObfuscationOptions, PatternNamespaceMatcher,
};

/// Renaming settings, as read from a JSON configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ObfuscationConfig {
    /// Retention pattern lists for namespaces.
    pub keep_package_names: Vec<String>,
    pub class_obfuscation_dictionary: Option<PathBuf>,
    pub package_obfuscation_dictionary: Option<PathBuf>,
    /// Word list for member names.
    pub obfuscation_dictionary: Option<PathBuf>,
    pub flatten_package_hierarchy: Option<String>,
    pub repackage_classes: Option<String>,
    pub use_mixed_case_class_names: bool,
    pub allow_access_modification: bool,
    pub adapt_language_metadata: bool,
    pub overload_aggressively: bool,
}

impl Default for ObfuscationConfig {
    fn default() -> Self {
        Self {
            keep_package_names: Vec::new(),
            class_obfuscation_dictionary: None,
            package_obfuscation_dictionary: None,
            obfuscation_dictionary: None,
            flatten_package_hierarchy: None,
            repackage_classes: None,
            use_mixed_case_class_names: true,
            allow_access_modification: false,
            adapt_language_metadata: true,
            overload_aggressively: false,
        }
    }
}

pub fn parse_config(source: &str) -> Result<ObfuscationConfig> {
    serde_json::from_str(source).context("failed to parse obfuscation config JSON")
}

/// Reads a configuration file. Relative dictionary paths are resolved against
/// the directory holding the file.
pub fn load_config(path: &Path) -> Result<ObfuscationConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    if let Some(base_dir) = path.parent() {
        config.resolve_paths(base_dir);
    }
    Ok(config)
}

impl ObfuscationConfig {
    fn resolve_paths(&mut self, base_dir: &Path) {
        for dictionary in [
            &mut self.class_obfuscation_dictionary,
            &mut self.package_obfuscation_dictionary,
            &mut self.obfuscation_dictionary,
        ] {
            if let Some(path) = dictionary
                && path.is_relative()
            {
                *path = base_dir.join(&*path);
            }
        }
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(repackage) = &args.repackage {
            self.repackage_classes = Some(repackage.clone());
        }
        if let Some(flatten) = &args.flatten {
            self.flatten_package_hierarchy = Some(flatten.clone());
        }
        self.keep_package_names
            .extend(args.keep_package.iter().cloned());
        if args.no_mixed_case {
            self.use_mixed_case_class_names = false;
        }
    }

    /// Loads the dictionaries and compiles the retention patterns.
    pub fn to_options(&self) -> Result<ObfuscationOptions> {
        let keep_namespaces: Option<Box<dyn NamespaceMatcher>> =
            if self.keep_package_names.is_empty() {
                None
            } else {
                let matcher = PatternNamespaceMatcher::new(&self.keep_package_names)
                    .context("invalid keepPackageNames pattern")?;
                Some(Box::new(matcher))
            };

        Ok(ObfuscationOptions {
            names: NameObfuscatorOptions {
                type_dictionary: load_dictionary(self.class_obfuscation_dictionary.as_deref())?,
                namespace_dictionary: load_dictionary(
                    self.package_obfuscation_dictionary.as_deref(),
                )?,
                use_mixed_case_type_names: self.use_mixed_case_class_names,
                keep_namespaces,
                flatten_namespace_hierarchy: self.flatten_package_hierarchy.clone(),
                repackage_types: self.repackage_classes.clone(),
                allow_access_modification: self.allow_access_modification,
            },
            member_dictionary: load_dictionary(self.obfuscation_dictionary.as_deref())?,
            adapt_metadata: self.adapt_language_metadata,
            overload_aggressively: self.overload_aggressively,
        })
    }
}

fn load_dictionary(path: Option<&Path>) -> Result<Option<Dictionary>> {
    path.map(|path| {
        Dictionary::load(path, DictionaryMode::Identifiers)
            .with_context(|| format!("failed to load dictionary: {}", path.display()))
    })
    .transpose()
}
