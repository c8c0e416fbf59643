//! The name-assignment engine.
//!
//! [`NameObfuscator`] owns every piece of shared renaming state:
//! - the reserved-name set (case-folded names no new type name may take),
//! - the namespace-prefix map (original prefix -> new prefix),
//! - per-prefix name factories for namespace segments, ordinary type names
//!   and numeric nested type names,
//! - the member-name factory, which also supplies module, type-alias and
//!   property names inside their scopes.
//!
//! It hands out one name per request and guarantees that every returned type
//! name is unique at the moment it is returned. Which types to ask for, and
//! in which order, is decided by the [`TypeObfuscator`](crate::TypeObfuscator).

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use shroud_common::{
    NAMESPACE_SEPARATOR, NESTED_SEPARATOR, fold_case, namespace_of_prefix, namespace_prefix,
    parent_namespace_prefix, prefix_for_namespace,
};
use shroud_model::{Member, ModuleDescriptor, Property, ProgramModel, TypeAlias, TypeDef};
use shroud_names::{
    Dictionary, DictionaryNameFactory, NameFactory, NumericNameFactory, SimpleNameFactory,
};

use crate::NamespaceMatcher;

/// Already-parsed settings for the engine.
#[derive(Default)]
pub struct NameObfuscatorOptions {
    /// Word list for simple type names.
    pub type_dictionary: Option<Dictionary>,
    /// Word list for namespace segments.
    pub namespace_dictionary: Option<Dictionary>,
    /// Whether new type and namespace names may differ only in case.
    pub use_mixed_case_type_names: bool,
    /// Namespaces that keep their original name.
    pub keep_namespaces: Option<Box<dyn NamespaceMatcher>>,
    /// Place every renamed namespace directly under this namespace.
    pub flatten_namespace_hierarchy: Option<String>,
    /// Move every renamed type into this namespace.
    pub repackage_types: Option<String>,
    /// Whether types may be moved out of their namespace even when that
    /// would break namespace-private access.
    pub allow_access_modification: bool,
}

/// Auxiliary descriptor kinds that get their own naming scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataScope {
    Module,
    TypeAlias,
    Property,
}

pub struct NameObfuscator {
    // Options.
    type_dictionary: Option<Dictionary>,
    namespace_dictionary: Option<Dictionary>,
    use_mixed_case_type_names: bool,
    keep_namespaces: Option<Box<dyn NamespaceMatcher>>,
    flatten_prefix: Option<String>,
    repackage_prefix: Option<String>,
    allow_access_modification: bool,

    // Shared by members and scoped metadata names; each restarts it.
    member_names: Box<dyn NameFactory>,
    open_scope: Option<MetadataScope>,

    reserved_type_names: FxHashSet<String>,
    // Original namespace prefix -> new namespace prefix.
    namespace_prefixes: FxHashMap<String, String>,
    // Every new prefix ever recorded in `namespace_prefixes`.
    taken_namespace_prefixes: FxHashSet<String>,
    // New parent prefix -> factory for namespace segments below it.
    namespace_factories: FxHashMap<String, Box<dyn NameFactory>>,
    // New namespace (or enclosing type) prefix -> factory for simple type names.
    type_factories: FxHashMap<String, Box<dyn NameFactory>>,
    numeric_type_factories: FxHashMap<String, Box<dyn NameFactory>>,
}

impl NameObfuscator {
    /// Creates the engine and seeds it with every name the model already fixes:
    /// program types that were assigned a name beforehand, and all library
    /// types.
    pub fn new(
        model: &ProgramModel,
        options: NameObfuscatorOptions,
        member_names: Box<dyn NameFactory>,
    ) -> Self {
        let flatten_prefix = options
            .flatten_namespace_hierarchy
            .as_deref()
            .map(prefix_for_namespace);
        let repackage_prefix = options.repackage_types.as_deref().map(prefix_for_namespace);

        let mut obfuscator = Self {
            type_dictionary: options.type_dictionary,
            namespace_dictionary: options.namespace_dictionary,
            use_mixed_case_type_names: options.use_mixed_case_type_names,
            keep_namespaces: options.keep_namespaces,
            flatten_prefix,
            repackage_prefix,
            allow_access_modification: options.allow_access_modification,
            member_names,
            open_scope: None,
            reserved_type_names: FxHashSet::default(),
            namespace_prefixes: FxHashMap::default(),
            taken_namespace_prefixes: FxHashSet::default(),
            namespace_factories: FxHashMap::default(),
            type_factories: FxHashMap::default(),
            numeric_type_factories: FxHashMap::default(),
        };
        obfuscator.record_namespace_prefix(String::new(), String::new());

        for id in model.program_type_ids().chain(model.library_type_ids()) {
            obfuscator.reserve_fixed_name(model.get(id));
        }
        debug!(
            reserved = obfuscator.reserved_type_names.len(),
            namespaces = obfuscator.namespace_prefixes.len(),
            "seeded name obfuscator"
        );
        obfuscator
    }

    fn reserve_fixed_name(&mut self, def: &TypeDef) {
        let new_name = match def {
            TypeDef::Program(ty) => match ty.new_name.as_deref() {
                Some(new_name) => new_name,
                None => return,
            },
            TypeDef::Library(ty) => ty.new_name.as_deref().unwrap_or(&ty.name),
        };
        self.reserved_type_names
            .insert(fold_case(new_name, self.use_mixed_case_type_names).into_owned());

        // Aggressive repackaging moves everything anyway; otherwise other
        // types in the same namespace must follow this one.
        if self.repackage_prefix.is_none() || !self.allow_access_modification {
            let recursively = self.repackage_prefix.is_none() && self.flatten_prefix.is_none();
            self.map_namespace(def.name(), new_name, recursively);
        }
    }

    /// Records that the namespace of `name` maps to the namespace of
    /// `new_name`, and with `recursively` the same for every pair of ancestors.
    fn map_namespace(&mut self, name: &str, new_name: &str, recursively: bool) {
        let mut prefix = namespace_prefix(name);
        let mut new_prefix = namespace_prefix(new_name);
        loop {
            self.record_namespace_prefix(prefix.to_string(), new_prefix.to_string());
            if !recursively {
                break;
            }
            prefix = namespace_prefix(prefix);
            new_prefix = namespace_prefix(new_prefix);
            if prefix.is_empty() || new_prefix.is_empty() {
                break;
            }
        }
    }

    // =========================================================================
    // Type names
    // =========================================================================

    /// Returns a new, unique fully-qualified name for a top-level type.
    pub fn new_type_name(&mut self, original: &str) -> String {
        let prefix = self.new_namespace_prefix(namespace_prefix(original));
        let name = self.unique_type_name(&prefix, false);
        debug!(original, new_name = %name, "assigned type name");
        name
    }

    /// Returns a new, unique name for a type nested in the type now named
    /// `enclosing_new_name`.
    pub fn new_nested_type_name(&mut self, enclosing_new_name: &str, original: &str) -> String {
        let prefix = nested_prefix(enclosing_new_name);
        let name = self.unique_type_name(&prefix, false);
        debug!(original, new_name = %name, "assigned nested type name");
        name
    }

    /// Returns a new, unique numeric name (`Outer$1`) for an anonymous or
    /// synthetic type nested in the type now named `enclosing_new_name`.
    pub fn new_numeric_nested_type_name(
        &mut self,
        enclosing_new_name: &str,
        original: &str,
    ) -> String {
        let prefix = nested_prefix(enclosing_new_name);
        let name = self.unique_type_name(&prefix, true);
        debug!(original, new_name = %name, "assigned numeric nested type name");
        name
    }

    fn unique_type_name(&mut self, prefix: &str, numeric: bool) -> String {
        let mixed_case = self.use_mixed_case_type_names;
        let factories = if numeric {
            &mut self.numeric_type_factories
        } else {
            &mut self.type_factories
        };
        let factory = factories.entry(prefix.to_string()).or_insert_with(|| -> Box<dyn NameFactory> {
            if numeric {
                Box::new(NumericNameFactory::new())
            } else {
                sequence_factory(self.type_dictionary.as_ref(), mixed_case)
            }
        });

        loop {
            let mut name = String::from(prefix);
            name.push_str(&factory.next_name());

            let folded = fold_case(&name, mixed_case).into_owned();
            // Dictionary words may differ only in case or contain separators,
            // so a name from one prefix can equal a name from another.
            if !self.reserved_type_names.insert(folded) {
                trace!(candidate = %name, "type name is reserved");
                continue;
            }
            return name;
        }
    }

    // =========================================================================
    // Namespace prefixes
    // =========================================================================

    /// Returns the new prefix for an original namespace prefix, creating it if
    /// needed.
    pub fn new_namespace_prefix(&mut self, prefix: &str) -> String {
        if let Some(new_prefix) = self.namespace_prefixes.get(prefix) {
            return new_prefix.clone();
        }

        if let Some(keep) = &self.keep_namespaces
            && keep.matches(namespace_of_prefix(prefix))
        {
            return prefix.to_string();
        }

        if let Some(repackage) = &self.repackage_prefix {
            return repackage.clone();
        }

        let new_parent = match self.flatten_prefix.clone() {
            Some(flatten) => flatten,
            None => self.new_namespace_prefix(parent_namespace_prefix(prefix)),
        };
        let new_prefix = self.unique_namespace_prefix(&new_parent);
        debug!(original = prefix, new_prefix = %new_prefix, "assigned namespace prefix");

        self.record_namespace_prefix(prefix.to_string(), new_prefix.clone());
        new_prefix
    }

    /// A prefix stays taken even if a later seed overwrites its entry.
    fn record_namespace_prefix(&mut self, prefix: String, new_prefix: String) {
        self.taken_namespace_prefixes.insert(new_prefix.clone());
        self.namespace_prefixes.insert(prefix, new_prefix);
    }

    fn unique_namespace_prefix(&mut self, new_parent: &str) -> String {
        let mixed_case = self.use_mixed_case_type_names;
        let dictionary = self.namespace_dictionary.as_ref();
        let factory = self
            .namespace_factories
            .entry(new_parent.to_string())
            .or_insert_with(|| sequence_factory(dictionary, mixed_case));

        loop {
            let candidate = format!(
                "{new_parent}{}{NAMESPACE_SEPARATOR}",
                factory.next_name()
            );
            if self.taken_namespace_prefixes.contains(&candidate) {
                trace!(candidate = %candidate, "namespace prefix already taken");
                continue;
            }
            return candidate;
        }
    }

    /// The new prefix already decided for an original namespace prefix.
    pub fn namespace_prefix(&self, original_prefix: &str) -> Option<&str> {
        self.namespace_prefixes
            .get(original_prefix)
            .map(String::as_str)
    }

    pub fn namespace_prefixes(&self) -> &FxHashMap<String, String> {
        &self.namespace_prefixes
    }

    /// Whether a fully-qualified name may not be handed out as a new type name.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_type_names
            .contains(fold_case(name, self.use_mixed_case_type_names).as_ref())
    }

    // =========================================================================
    // Member names
    // =========================================================================

    /// Returns the first member-name candidate not in `disallowed`.
    ///
    /// The sequence restarts for every member, so names stay short; the
    /// caller owns the per-type set of names already in use.
    pub fn new_member_name(
        &mut self,
        owner: &str,
        member: &Member,
        disallowed: &FxHashSet<String>,
    ) -> String {
        self.member_names.reset();
        loop {
            let name = self.member_names.next_name();
            if !disallowed.contains(&name) {
                debug!(owner, member = %member.name, new_name = %name, "assigned member name");
                return name;
            }
        }
    }

    // =========================================================================
    // Scoped metadata names
    // =========================================================================

    fn begin_scope(&mut self, scope: MetadataScope) {
        assert!(
            self.open_scope.is_none(),
            "cannot open {scope:?} scope while {:?} scope is open",
            self.open_scope
        );
        self.open_scope = Some(scope);
        self.member_names.reset();
    }

    fn end_scope(&mut self, scope: MetadataScope) {
        assert_eq!(self.open_scope, Some(scope), "mismatched metadata scope");
        self.open_scope = None;
    }

    fn next_scoped_name(&mut self, scope: MetadataScope) -> String {
        assert_eq!(
            self.open_scope,
            Some(scope),
            "{scope:?} name requested outside its scope"
        );
        self.member_names.next_name()
    }

    pub fn begin_module_scope(&mut self) {
        self.begin_scope(MetadataScope::Module);
    }

    pub fn generate_module_name(&mut self, module: &ModuleDescriptor) -> String {
        let name = self.next_scoped_name(MetadataScope::Module);
        debug!(module = %module.name, new_name = %name, "assigned module name");
        name
    }

    pub fn end_module_scope(&mut self) {
        self.end_scope(MetadataScope::Module);
    }

    pub fn begin_type_alias_scope(&mut self) {
        self.begin_scope(MetadataScope::TypeAlias);
    }

    pub fn generate_type_alias_name(&mut self, owner: &str, alias: &TypeAlias) -> String {
        let name = self.next_scoped_name(MetadataScope::TypeAlias);
        debug!(owner, alias = %alias.name, new_name = %name, "assigned type alias name");
        name
    }

    pub fn end_type_alias_scope(&mut self) {
        self.end_scope(MetadataScope::TypeAlias);
    }

    pub fn begin_property_scope(&mut self) {
        self.begin_scope(MetadataScope::Property);
    }

    pub fn generate_property_name(&mut self, owner: &str, property: &Property) -> String {
        let name = self.next_scoped_name(MetadataScope::Property);
        debug!(owner, property = %property.name, new_name = %name, "assigned property name");
        name
    }

    pub fn end_property_scope(&mut self) {
        self.end_scope(MetadataScope::Property);
    }
}

fn nested_prefix(enclosing_new_name: &str) -> String {
    let mut prefix = String::with_capacity(enclosing_new_name.len() + 1);
    prefix.push_str(enclosing_new_name);
    prefix.push(NESTED_SEPARATOR);
    prefix
}

/// Factory for simple names in one scope: dictionary words first if a
/// dictionary is configured, then short alphabetic names.
fn sequence_factory(dictionary: Option<&Dictionary>, mixed_case: bool) -> Box<dyn NameFactory> {
    let simple = Box::new(SimpleNameFactory::new(mixed_case));
    match dictionary {
        Some(dictionary) => Box::new(DictionaryNameFactory::new(dictionary.clone(), simple)),
        None => simple,
    }
}

#[cfg(test)]
#[path = "../tests/name_obfuscator_tests.rs"]
mod tests;
