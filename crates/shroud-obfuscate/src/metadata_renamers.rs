//! Renaming of language metadata names.
//!
//! Each adapter walks one kind of auxiliary descriptor, asks the engine for a
//! name inside the matching scope and writes it back onto the descriptor.
//! Type aliases and properties are named per declaration container, so names
//! restart in every container; module names are drawn from one scope.

use tracing::debug_span;

use shroud_model::{DeclarationContainer, ModuleDescriptor, ProgramModel, TypeId};

use crate::NameObfuscator;

pub struct ModuleNameObfuscator<'a> {
    obfuscator: &'a mut NameObfuscator,
}

impl<'a> ModuleNameObfuscator<'a> {
    pub fn new(obfuscator: &'a mut NameObfuscator) -> Self {
        Self { obfuscator }
    }

    pub fn visit_modules(&mut self, modules: &mut [ModuleDescriptor]) {
        self.obfuscator.begin_module_scope();
        for module in modules {
            module.new_name = Some(self.obfuscator.generate_module_name(module));
        }
        self.obfuscator.end_module_scope();
    }
}

pub struct TypeAliasNameObfuscator<'a> {
    obfuscator: &'a mut NameObfuscator,
}

impl<'a> TypeAliasNameObfuscator<'a> {
    pub fn new(obfuscator: &'a mut NameObfuscator) -> Self {
        Self { obfuscator }
    }

    /// `owner` is the new name of the type carrying the container.
    pub fn visit_container(&mut self, owner: &str, container: &mut DeclarationContainer) {
        self.obfuscator.begin_type_alias_scope();
        for alias in &mut container.type_aliases {
            alias.new_name = Some(self.obfuscator.generate_type_alias_name(owner, alias));
        }
        self.obfuscator.end_type_alias_scope();
    }
}

pub struct PropertyNameObfuscator<'a> {
    obfuscator: &'a mut NameObfuscator,
}

impl<'a> PropertyNameObfuscator<'a> {
    pub fn new(obfuscator: &'a mut NameObfuscator) -> Self {
        Self { obfuscator }
    }

    pub fn visit_container(&mut self, owner: &str, container: &mut DeclarationContainer) {
        self.obfuscator.begin_property_scope();
        for property in &mut container.properties {
            property.new_name = Some(self.obfuscator.generate_property_name(owner, property));
        }
        self.obfuscator.end_property_scope();
    }
}

/// Names every module, type alias and property in the model.
pub fn obfuscate_metadata_names(obfuscator: &mut NameObfuscator, model: &mut ProgramModel) {
    let _span = debug_span!("obfuscate_metadata_names").entered();
    ModuleNameObfuscator::new(obfuscator).visit_modules(model.modules_mut());

    let ids: Vec<TypeId> = model.program_type_ids().collect();
    for id in ids {
        let owner = model.current_name(id).to_string();
        let Some(container) = model
            .get_mut(id)
            .as_program_mut()
            .and_then(|ty| ty.metadata.as_mut())
            .and_then(|metadata| metadata.container_mut())
        else {
            continue;
        };
        TypeAliasNameObfuscator::new(obfuscator).visit_container(&owner, container);
        PropertyNameObfuscator::new(obfuscator).visit_container(&owner, container);
    }
}
