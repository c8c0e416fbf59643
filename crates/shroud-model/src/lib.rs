//! Program model for the shroud name-assignment pass.
//!
//! The model is a flat arena of types addressed by [`TypeId`]. Each entry is a
//! tagged [`TypeDef`]: program-owned types can be renamed, library types are
//! fixed. Auxiliary language descriptors (declaration containers, synthetic
//! class markers, modules) hang off the types and the model itself.
//!
//! Parsing and writing the binary encoding of a program is not done here;
//! the model is built in memory or deserialized from its JSON form.

pub mod types;
pub use types::{InnerTypeEntry, LibraryType, Member, MemberKind, ProgramType, TypeDef, TypeId};

pub mod metadata;
pub use metadata::{
    DeclarationContainer, LanguageMetadata, ModuleDescriptor, Property, SyntheticFlavor,
    TypeAlias,
};

pub mod model;
pub use model::{ModelError, ModelFile, ProgramModel};
