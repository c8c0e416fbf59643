//! Language-specific descriptors attached to types and to the program.
//!
//! Some source languages record extra metadata next to the compiled types:
//! declaration containers list type aliases and properties by name, compiler
//! generated classes carry a synthetic-class marker, and module descriptors
//! name the compilation module. Only the parts the renaming pass touches are
//! modelled.

use serde::{Deserialize, Serialize};

/// Kind of compiler-generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyntheticFlavor {
    /// The single class implementing a lambda expression.
    Lambda,
    /// `when`-over-enum lookup tables.
    WhenMappings,
    /// Any other generated class.
    Regular,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAlias {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: None,
        }
    }
}

/// Declarations listed by a class, file facade or multi-file part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationContainer {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_aliases: Vec<TypeAlias>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

impl DeclarationContainer {
    pub fn with_type_alias(mut self, name: impl Into<String>) -> Self {
        self.type_aliases.push(TypeAlias::new(name));
        self
    }

    pub fn with_property(mut self, name: impl Into<String>) -> Self {
        self.properties.push(Property::new(name));
        self
    }
}

/// Metadata descriptor attached to a program type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LanguageMetadata {
    Class(DeclarationContainer),
    FileFacade(DeclarationContainer),
    MultiFilePart(DeclarationContainer),
    MultiFileFacade,
    SyntheticClass { flavor: SyntheticFlavor },
}

impl LanguageMetadata {
    pub fn container(&self) -> Option<&DeclarationContainer> {
        match self {
            LanguageMetadata::Class(container)
            | LanguageMetadata::FileFacade(container)
            | LanguageMetadata::MultiFilePart(container) => Some(container),
            LanguageMetadata::MultiFileFacade | LanguageMetadata::SyntheticClass { .. } => None,
        }
    }

    pub fn container_mut(&mut self) -> Option<&mut DeclarationContainer> {
        match self {
            LanguageMetadata::Class(container)
            | LanguageMetadata::FileFacade(container)
            | LanguageMetadata::MultiFilePart(container) => Some(container),
            LanguageMetadata::MultiFileFacade | LanguageMetadata::SyntheticClass { .. } => None,
        }
    }

    /// Number of synthetic lambda markers this descriptor carries (0 or 1).
    pub fn lambda_marker_count(&self) -> usize {
        usize::from(matches!(
            self,
            LanguageMetadata::SyntheticClass {
                flavor: SyntheticFlavor::Lambda
            }
        ))
    }
}

/// Module descriptor shipped alongside the program's types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: None,
        }
    }
}
