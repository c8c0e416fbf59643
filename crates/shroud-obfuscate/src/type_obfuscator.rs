//! The type-graph driver.
//!
//! Walks the program types once and asks the [`NameObfuscator`] for exactly
//! one name per type. A nested type's name is built on its enclosing type's
//! new name, so enclosing types are always named first. Each visit follows the
//! chain of unnamed enclosing types outwards, then names the chain from the
//! outermost type inwards.

use smallvec::SmallVec;
use tracing::{debug, debug_span, warn};

use shroud_common::has_numeric_suffix;
use shroud_model::{ProgramModel, ProgramType, TypeDef, TypeId};

use crate::NameObfuscator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum VisitState {
    #[default]
    Unvisited,
    /// On the enclosing chain currently being resolved.
    Resolving,
    Named,
}

/// Resolved enclosing type of a nested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EnclosingLink {
    outer: TypeId,
    /// The nested type gets a name from the numeric sequence.
    numeric: bool,
}

pub struct TypeObfuscator<'a> {
    obfuscator: &'a mut NameObfuscator,
    adapt_metadata: bool,
    states: Vec<VisitState>,
}

impl<'a> TypeObfuscator<'a> {
    /// With `adapt_metadata`, synthetic lambda classes are recognized through
    /// their language descriptor and get numeric names.
    pub fn new(obfuscator: &'a mut NameObfuscator, adapt_metadata: bool) -> Self {
        Self {
            obfuscator,
            adapt_metadata,
            states: Vec::new(),
        }
    }

    /// Assigns a new name to every program type that does not have one yet.
    pub fn obfuscate_all(&mut self, model: &mut ProgramModel) {
        let _span = debug_span!("obfuscate_types", types = model.len()).entered();
        let ids: Vec<TypeId> = model.program_type_ids().collect();
        for id in ids {
            self.visit(model, id);
        }
    }

    /// Makes sure the given type has a new name and returns it.
    ///
    /// Library types keep their fixed name. Program types that already have a
    /// name are left untouched.
    pub fn visit(&mut self, model: &mut ProgramModel, id: TypeId) -> String {
        if self.states.len() < model.len() {
            self.states.resize(model.len(), VisitState::Unvisited);
        }

        match model.get(id) {
            TypeDef::Library(_) => return model.current_name(id).to_string(),
            TypeDef::Program(ty) => {
                if let Some(new_name) = &ty.new_name {
                    self.states[id.index()] = VisitState::Named;
                    return new_name.clone();
                }
            }
        }

        // Walk outwards until an enclosing type with a fixed name, or a type
        // without an enclosing type, is reached.
        let mut chain: SmallVec<[(TypeId, Option<EnclosingLink>); 4]> = SmallVec::new();
        let mut current = id;
        loop {
            self.states[current.index()] = VisitState::Resolving;
            let mut link = self.enclosing_link(model, current);
            let mut next = None;
            if let Some(found) = link {
                let outer = model.get(found.outer);
                if !outer.is_library() && outer.new_name().is_none() {
                    if self.states[found.outer.index()] == VisitState::Resolving {
                        warn!(
                            ty = model.get(current).name(),
                            outer = outer.name(),
                            "cyclic nesting records, naming as a top-level type"
                        );
                        link = None;
                    } else {
                        next = Some(found.outer);
                    }
                }
            }
            chain.push((current, link));
            match next {
                Some(outer) => current = outer,
                None => break,
            }
        }

        let mut new_name = String::new();
        for (ty, link) in chain.into_iter().rev() {
            let original = model.get(ty).name().to_string();
            new_name = match link {
                Some(EnclosingLink { outer, numeric }) => {
                    let enclosing = model.current_name(outer).to_string();
                    if numeric {
                        self.obfuscator
                            .new_numeric_nested_type_name(&enclosing, &original)
                    } else {
                        self.obfuscator.new_nested_type_name(&enclosing, &original)
                    }
                }
                None => self.obfuscator.new_type_name(&original),
            };
            model.set_new_name(ty, new_name.clone());
            self.states[ty.index()] = VisitState::Named;
        }
        new_name
    }

    /// Finds the enclosing type recorded for a program type.
    ///
    /// The enclosing-method record is consulted before the inner-types table.
    /// Records that point at the type itself, or at a type missing from the
    /// model, are skipped.
    fn enclosing_link(&self, model: &ProgramModel, id: TypeId) -> Option<EnclosingLink> {
        let ty = model.get(id).as_program()?;
        let from_method = ty
            .enclosing_method_type
            .as_deref()
            .map(|outer| (ty.name.as_str(), outer));
        let from_table = ty.inner_types.iter().filter_map(|entry| {
            let inner = entry.inner.as_deref()?;
            let outer = entry.outer.as_deref()?;
            (inner == ty.name).then_some((inner, outer))
        });

        for (inner, outer) in from_method.into_iter().chain(from_table) {
            if outer == ty.name {
                warn!(ty = %ty.name, "type is recorded as its own enclosing type");
                continue;
            }
            let Some(outer_id) = model.lookup(outer) else {
                warn!(ty = %ty.name, outer, "enclosing type is missing from the model");
                continue;
            };
            let numeric = self.is_numeric_name(ty, inner, outer);
            debug!(ty = %ty.name, outer, numeric, "resolved enclosing type");
            return Some(EnclosingLink {
                outer: outer_id,
                numeric,
            });
        }
        None
    }

    /// Whether a nested type is anonymous (`Outer$1`) or a synthetic lambda
    /// class, which both take numeric names.
    fn is_numeric_name(&self, ty: &ProgramType, inner_name: &str, outer_name: &str) -> bool {
        if self.adapt_metadata && is_synthetic_lambda(ty) {
            return true;
        }
        has_numeric_suffix(inner_name, outer_name)
    }
}

/// Lambda classes named after the function they were inlined from
/// (`Outer$method$1`) are still numeric, but only their descriptor says so.
fn is_synthetic_lambda(ty: &ProgramType) -> bool {
    ty.metadata
        .iter()
        .map(|metadata| metadata.lambda_marker_count())
        .sum::<usize>()
        == 1
}

#[cfg(test)]
#[path = "../tests/type_obfuscator_tests.rs"]
mod tests;
