//! Type records stored in the program model arena.

use serde::{Deserialize, Serialize};

// =============================================================================
// TypeId - arena handle
// =============================================================================

/// Index of a type in a [`ProgramModel`](crate::ProgramModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// Nesting records
// =============================================================================

/// One entry of a type's inner-types table.
///
/// The table lists nested relationships the type knows about: its own
/// enclosing type, and the types nested inside it. Either side may be absent
/// (anonymous and local types have no recorded outer type here).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerTypeEntry {
    /// Original fully-qualified name of the nested type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<String>,
    /// Original fully-qualified name of its enclosing type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer: Option<String>,
}

impl InnerTypeEntry {
    pub fn new(inner: impl Into<String>, outer: impl Into<String>) -> Self {
        Self {
            inner: Some(inner.into()),
            outer: Some(outer.into()),
        }
    }
}

// =============================================================================
// Members
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Field,
    Method,
}

/// A field or method of a program type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    /// Type descriptor, e.g. `I` for a field or `(ILjava/lang/String;)V` for a method.
    pub descriptor: String,
    /// Retained by a keep rule: the member must not be renamed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub keep: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

impl Member {
    pub fn field(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Field,
            name: name.into(),
            descriptor: descriptor.into(),
            keep: false,
            new_name: None,
        }
    }

    pub fn method(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Method,
            name: name.into(),
            descriptor: descriptor.into(),
            keep: false,
            new_name: None,
        }
    }

    /// Marks the member as retained.
    pub fn kept(mut self) -> Self {
        self.keep = true;
        self
    }

    /// Constructors and static initializers (`<init>`, `<clinit>`).
    pub fn is_special(&self) -> bool {
        self.name.starts_with('<')
    }

    /// Name the member ends up with: the new one if assigned, else the original.
    pub fn current_name(&self) -> &str {
        self.new_name.as_deref().unwrap_or(&self.name)
    }
}

// =============================================================================
// Type definitions
// =============================================================================

/// A renamable, program-owned type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramType {
    /// Original fully-qualified name.
    pub name: String,
    /// Assigned name. Set beforehand for retained types; written once by the
    /// name-assignment pass otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner_types: Vec<InnerTypeEntry>,
    /// Enclosing type recorded for local and anonymous types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing_method_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<crate::LanguageMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
}

impl ProgramType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pre-assigns a name, as a retention rule does.
    pub fn with_new_name(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }

    /// Records this type as nested inside `outer`.
    pub fn nested_in(mut self, outer: impl Into<String>) -> Self {
        let entry = InnerTypeEntry::new(self.name.clone(), outer);
        self.inner_types.push(entry);
        self
    }

    /// Records `outer` as the type enclosing the method this type is declared in.
    pub fn enclosed_by_method_of(mut self, outer: impl Into<String>) -> Self {
        self.enclosing_method_type = Some(outer.into());
        self
    }

    pub fn with_metadata(mut self, metadata: crate::LanguageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }
}

/// A library type. Its name is fixed and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryType {
    pub name: String,
    /// Name fixed by an earlier mapping, if the library was itself renamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

impl LibraryType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: None,
        }
    }
}

/// A type in the program model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    Program(ProgramType),
    Library(LibraryType),
}

impl TypeDef {
    /// Original fully-qualified name.
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Program(ty) => &ty.name,
            TypeDef::Library(ty) => &ty.name,
        }
    }

    pub fn new_name(&self) -> Option<&str> {
        match self {
            TypeDef::Program(ty) => ty.new_name.as_deref(),
            TypeDef::Library(ty) => ty.new_name.as_deref(),
        }
    }

    /// The assigned name if there is one, otherwise the original name.
    pub fn current_name(&self) -> &str {
        self.new_name().unwrap_or_else(|| self.name())
    }

    pub fn is_library(&self) -> bool {
        matches!(self, TypeDef::Library(_))
    }

    pub fn as_program(&self) -> Option<&ProgramType> {
        match self {
            TypeDef::Program(ty) => Some(ty),
            TypeDef::Library(_) => None,
        }
    }

    pub fn as_program_mut(&mut self) -> Option<&mut ProgramType> {
        match self {
            TypeDef::Program(ty) => Some(ty),
            TypeDef::Library(_) => None,
        }
    }
}
