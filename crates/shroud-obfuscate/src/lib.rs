//! Collision-free name assignment for the shroud renaming pass.
//!
//! This crate decides the new name of every program type, namespace, member
//! and language-metadata entry:
//! - Namespace retention patterns (`NamespaceMatcher`, `PatternNamespaceMatcher`)
//! - The name-assignment engine owning all shared state (`NameObfuscator`)
//! - The type-graph driver naming enclosing types first (`TypeObfuscator`)
//! - Member renaming per name group (`MemberObfuscator`)
//! - Module, type-alias and property adapters (`metadata_renamers`)
//! - The decided mapping and its text form (`ObfuscationMapping`)

// Namespace retention patterns
pub mod keep_matcher;
pub use keep_matcher::{NamespaceMatcher, PatternError, PatternNamespaceMatcher};

// Name-assignment engine
pub mod name_obfuscator;
pub use name_obfuscator::{MetadataScope, NameObfuscator, NameObfuscatorOptions};

// Type-graph driver
pub mod type_obfuscator;
pub use type_obfuscator::TypeObfuscator;

pub mod member_obfuscator;
pub use member_obfuscator::MemberObfuscator;

// Language metadata adapters
pub mod metadata_renamers;
pub use metadata_renamers::{
    ModuleNameObfuscator, PropertyNameObfuscator, TypeAliasNameObfuscator,
    obfuscate_metadata_names,
};

pub mod mapping;
pub use mapping::{MemberMapping, NameMapping, ObfuscationMapping, TypeMapping};

// Whole pass
pub mod pass;
pub use pass::{ObfuscationOptions, obfuscate};
