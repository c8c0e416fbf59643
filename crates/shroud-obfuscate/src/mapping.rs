//! The decided renaming, in a form the reference-rewriting pass and users can
//! read.
//!
//! The text form is the classic mapping-file layout:
//!
//! ```text
//! com.example.Widget -> a.a:
//!     I count -> a
//!     ()V render -> b
//!     # typealias Handler -> a
//!     # property size -> a
//! # module app -> a
//! ```

use std::fmt;

use shroud_model::{DeclarationContainer, MemberKind, ProgramModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMapping {
    pub original: String,
    pub new_name: String,
}

impl NameMapping {
    fn new(original: &str, new_name: &str) -> Self {
        Self {
            original: original.to_string(),
            new_name: new_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMapping {
    pub kind: MemberKind,
    pub descriptor: String,
    pub original: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    pub original: String,
    pub new_name: String,
    pub members: Vec<MemberMapping>,
    pub type_aliases: Vec<NameMapping>,
    pub properties: Vec<NameMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObfuscationMapping {
    types: Vec<TypeMapping>,
    modules: Vec<NameMapping>,
}

impl ObfuscationMapping {
    /// Collects every program type's name, sorted by original name, with its
    /// renamed members and metadata names.
    pub fn collect(model: &ProgramModel) -> Self {
        let mut types: Vec<TypeMapping> = model
            .program_type_ids()
            .filter_map(|id| model.get(id).as_program())
            .map(|ty| {
                let members = ty
                    .members
                    .iter()
                    .filter(|member| member.current_name() != member.name)
                    .map(|member| MemberMapping {
                        kind: member.kind,
                        descriptor: member.descriptor.clone(),
                        original: member.name.clone(),
                        new_name: member.current_name().to_string(),
                    })
                    .collect();
                let container = ty.metadata.as_ref().and_then(|metadata| metadata.container());
                TypeMapping {
                    original: ty.name.clone(),
                    new_name: ty.new_name.clone().unwrap_or_else(|| ty.name.clone()),
                    members,
                    type_aliases: container.map(alias_mappings).unwrap_or_default(),
                    properties: container.map(property_mappings).unwrap_or_default(),
                }
            })
            .collect();
        types.sort_by(|a, b| a.original.cmp(&b.original));

        let modules = model
            .modules()
            .iter()
            .filter_map(|module| {
                let new_name = module.new_name.as_deref()?;
                Some(NameMapping::new(&module.name, new_name))
            })
            .collect();

        Self { types, modules }
    }

    pub fn types(&self) -> &[TypeMapping] {
        &self.types
    }

    pub fn modules(&self) -> &[NameMapping] {
        &self.modules
    }

    /// The new name of a program type, by original name.
    pub fn type_name(&self, original: &str) -> Option<&str> {
        self.types
            .binary_search_by(|ty| ty.original.as_str().cmp(original))
            .ok()
            .map(|index| self.types[index].new_name.as_str())
    }
}

fn alias_mappings(container: &DeclarationContainer) -> Vec<NameMapping> {
    container
        .type_aliases
        .iter()
        .filter_map(|alias| Some(NameMapping::new(&alias.name, alias.new_name.as_deref()?)))
        .collect()
}

fn property_mappings(container: &DeclarationContainer) -> Vec<NameMapping> {
    container
        .properties
        .iter()
        .filter_map(|property| {
            Some(NameMapping::new(&property.name, property.new_name.as_deref()?))
        })
        .collect()
}

impl fmt::Display for ObfuscationMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ty in &self.types {
            writeln!(f, "{} -> {}:", ty.original, ty.new_name)?;
            for member in &ty.members {
                writeln!(
                    f,
                    "    {} {} -> {}",
                    member.descriptor, member.original, member.new_name
                )?;
            }
            for alias in &ty.type_aliases {
                writeln!(f, "    # typealias {} -> {}", alias.original, alias.new_name)?;
            }
            for property in &ty.properties {
                writeln!(f, "    # property {} -> {}", property.original, property.new_name)?;
            }
        }
        for module in &self.modules {
            writeln!(f, "# module {} -> {}", module.original, module.new_name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/mapping_tests.rs"]
mod tests;
