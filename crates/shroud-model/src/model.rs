//! The program model arena.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{LibraryType, ModuleDescriptor, ProgramType, TypeDef, TypeId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("type `{0}` is defined more than once")]
    DuplicateType(String),
    #[error("type names must not be empty")]
    EmptyTypeName,
}

/// Serialized form of a [`ProgramModel`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelFile {
    #[serde(default)]
    pub program: Vec<ProgramType>,
    #[serde(default)]
    pub library: Vec<LibraryType>,
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
}

/// All program and library types, addressed by [`TypeId`] and by original name.
#[derive(Debug, Clone, Default)]
pub struct ProgramModel {
    types: Vec<TypeDef>,
    by_name: FxHashMap<String, TypeId>,
    modules: Vec<ModuleDescriptor>,
}

impl ProgramModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_program_type(&mut self, ty: ProgramType) -> Result<TypeId, ModelError> {
        self.insert(TypeDef::Program(ty))
    }

    pub fn add_library_type(&mut self, ty: LibraryType) -> Result<TypeId, ModelError> {
        self.insert(TypeDef::Library(ty))
    }

    pub fn add_module(&mut self, module: ModuleDescriptor) {
        self.modules.push(module);
    }

    fn insert(&mut self, def: TypeDef) -> Result<TypeId, ModelError> {
        if def.name().is_empty() {
            return Err(ModelError::EmptyTypeName);
        }
        if self.by_name.contains_key(def.name()) {
            return Err(ModelError::DuplicateType(def.name().to_string()));
        }
        let id = TypeId(self.types.len() as u32);
        self.by_name.insert(def.name().to_string(), id);
        self.types.push(def);
        Ok(id)
    }

    /// Builds a model from its serialized form.
    pub fn from_file(file: ModelFile) -> Result<Self, ModelError> {
        let mut model = Self::new();
        for ty in file.program {
            model.add_program_type(ty)?;
        }
        for ty in file.library {
            model.add_library_type(ty)?;
        }
        model.modules = file.modules;
        Ok(model)
    }

    /// Serialized form of the model, including every assigned name.
    pub fn to_file(&self) -> ModelFile {
        let mut file = ModelFile {
            modules: self.modules.clone(),
            ..ModelFile::default()
        };
        for def in &self.types {
            match def {
                TypeDef::Program(ty) => file.program.push(ty.clone()),
                TypeDef::Library(ty) => file.library.push(ty.clone()),
            }
        }
        file
    }

    /// Returns the type with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this model.
    #[track_caller]
    pub fn get(&self, id: TypeId) -> &TypeDef {
        match self.types.get(id.index()) {
            Some(def) => def,
            None => panic!("type id {} is not part of this model", id.0),
        }
    }

    /// Mutable access to the type with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this model.
    #[track_caller]
    pub fn get_mut(&mut self, id: TypeId) -> &mut TypeDef {
        match self.types.get_mut(id.index()) {
            Some(def) => def,
            None => panic!("type id {} is not part of this model", id.0),
        }
    }

    /// Finds a type by its original fully-qualified name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len() as u32).map(TypeId)
    }

    pub fn program_type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.type_ids().filter(|&id| !self.get(id).is_library())
    }

    pub fn library_type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.type_ids().filter(|&id| self.get(id).is_library())
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut [ModuleDescriptor] {
        &mut self.modules
    }

    /// The assigned name of a type if it has one, otherwise its original name.
    pub fn current_name(&self, id: TypeId) -> &str {
        self.get(id).current_name()
    }

    /// Whether the type ended up with its original name.
    pub fn has_original_name(&self, id: TypeId) -> bool {
        let def = self.get(id);
        def.new_name() == Some(def.name())
    }

    /// Writes the assigned name of a program type.
    ///
    /// # Panics
    ///
    /// Panics if `id` refers to a library type: library names are fixed.
    #[track_caller]
    pub fn set_new_name(&mut self, id: TypeId, new_name: String) {
        match self.get_mut(id) {
            TypeDef::Program(ty) => ty.new_name = Some(new_name),
            TypeDef::Library(ty) => panic!("library type `{}` cannot be renamed", ty.name),
        }
    }
}

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod tests;
