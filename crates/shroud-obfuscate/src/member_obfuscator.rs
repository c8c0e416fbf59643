//! Member renaming.
//!
//! Members of one type are split into name groups. Within a group every new
//! name is distinct and differs from the names of kept members; members in
//! different groups may share a name, since the runtime tells them apart by
//! kind or signature.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug_span;

use shroud_model::{Member, MemberKind, ProgramModel, TypeId};

use crate::NameObfuscator;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    kind: MemberKind,
    signature: String,
}

pub struct MemberObfuscator<'a> {
    obfuscator: &'a mut NameObfuscator,
    overload_aggressively: bool,
}

impl<'a> MemberObfuscator<'a> {
    /// With `overload_aggressively`, members only share a group when both
    /// their kind and their full descriptor match, so fields of different
    /// types and methods differing in return type may get the same name.
    pub fn new(obfuscator: &'a mut NameObfuscator, overload_aggressively: bool) -> Self {
        Self {
            obfuscator,
            overload_aggressively,
        }
    }

    pub fn obfuscate_all(&mut self, model: &mut ProgramModel) {
        let _span = debug_span!("obfuscate_members").entered();
        let ids: Vec<TypeId> = model.program_type_ids().collect();
        for id in ids {
            self.obfuscate_type(model, id);
        }
    }

    /// Names the renamable members of one program type. Library types are
    /// left alone.
    pub fn obfuscate_type(&mut self, model: &mut ProgramModel, id: TypeId) {
        let Some(ty) = model.get_mut(id).as_program_mut() else {
            return;
        };
        let owner = ty.new_name.clone().unwrap_or_else(|| ty.name.clone());

        let mut groups: FxHashMap<GroupKey, FxHashSet<String>> = FxHashMap::default();
        for member in ty.members.iter().filter(|member| is_fixed(member)) {
            groups
                .entry(self.group_key(member))
                .or_default()
                .insert(member.current_name().to_string());
        }

        for member in &mut ty.members {
            if is_fixed(member) {
                continue;
            }
            let used = groups.entry(self.group_key(member)).or_default();
            let name = self.obfuscator.new_member_name(&owner, member, used);
            used.insert(name.clone());
            member.new_name = Some(name);
        }
    }

    fn group_key(&self, member: &Member) -> GroupKey {
        let signature = if self.overload_aggressively {
            member.descriptor.clone()
        } else {
            match member.kind {
                MemberKind::Field => String::new(),
                MemberKind::Method => parameters(&member.descriptor).to_string(),
            }
        };
        GroupKey {
            kind: member.kind,
            signature,
        }
    }
}

/// Members that keep the name they have: retained ones, ones named earlier,
/// and constructors or initializers.
fn is_fixed(member: &Member) -> bool {
    member.keep || member.new_name.is_some() || member.is_special()
}

/// The parameter part of a method descriptor, `(I)` in `(I)V`.
fn parameters(descriptor: &str) -> &str {
    match descriptor.find(')') {
        Some(end) => &descriptor[..=end],
        None => descriptor,
    }
}

#[cfg(test)]
#[path = "../tests/member_obfuscator_tests.rs"]
mod tests;
