//! The whole renaming pass: types, then members, then language metadata.

use tracing::{debug, info_span};

use shroud_model::ProgramModel;
use shroud_names::{Dictionary, DictionaryNameFactory, NameFactory, SimpleNameFactory};

use crate::{
    MemberObfuscator, NameObfuscator, NameObfuscatorOptions, TypeObfuscator,
    obfuscate_metadata_names,
};

pub struct ObfuscationOptions {
    pub names: NameObfuscatorOptions,
    /// Word list for member names.
    pub member_dictionary: Option<Dictionary>,
    /// Recognize lambda classes by their descriptor and rename language
    /// metadata names.
    pub adapt_metadata: bool,
    pub overload_aggressively: bool,
}

impl Default for ObfuscationOptions {
    fn default() -> Self {
        Self {
            names: NameObfuscatorOptions::default(),
            member_dictionary: None,
            adapt_metadata: true,
            overload_aggressively: false,
        }
    }
}

/// Runs the pass over `model`, writing every new name into it.
///
/// Returns the engine so callers can still query the namespace-prefix map.
pub fn obfuscate(model: &mut ProgramModel, options: ObfuscationOptions) -> NameObfuscator {
    let _span = info_span!("obfuscate", types = model.len()).entered();

    let simple: Box<dyn NameFactory> = Box::new(SimpleNameFactory::new(true));
    let member_names: Box<dyn NameFactory> = match options.member_dictionary {
        Some(dictionary) => Box::new(DictionaryNameFactory::new(dictionary, simple)),
        None => simple,
    };
    let mut obfuscator = NameObfuscator::new(model, options.names, member_names);

    TypeObfuscator::new(&mut obfuscator, options.adapt_metadata).obfuscate_all(model);
    MemberObfuscator::new(&mut obfuscator, options.overload_aggressively).obfuscate_all(model);
    if options.adapt_metadata {
        obfuscate_metadata_names(&mut obfuscator, model);
    }

    debug!(
        namespaces = obfuscator.namespace_prefixes().len(),
        "renaming pass finished"
    );
    obfuscator
}
