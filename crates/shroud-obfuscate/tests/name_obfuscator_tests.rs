use super::*;
use crate::PatternNamespaceMatcher;
use shroud_model::{LibraryType, ProgramType};
use shroud_names::DictionaryMode;

fn model_with(program: &[&str], library: &[&str]) -> ProgramModel {
    let mut model = ProgramModel::new();
    for name in program {
        model.add_program_type(ProgramType::new(*name)).unwrap();
    }
    for name in library {
        model.add_library_type(LibraryType::new(*name)).unwrap();
    }
    model
}

fn obfuscator(model: &ProgramModel, options: NameObfuscatorOptions) -> NameObfuscator {
    NameObfuscator::new(model, options, Box::new(SimpleNameFactory::new(true)))
}

fn keep(patterns: &str) -> Option<Box<dyn NamespaceMatcher>> {
    Some(Box::new(PatternNamespaceMatcher::parse(patterns).unwrap()))
}

// =============================================================================
// Type names
// =============================================================================

#[test]
fn test_flat_dictionary_naming() {
    let model = model_with(&["pkg.Foo", "pkg.Bar"], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            type_dictionary: Some(Dictionary::from_words(["apple", "banana"])),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("pkg.Foo"), "a.apple");
    assert_eq!(obfuscator.new_type_name("pkg.Bar"), "a.banana");
    assert_eq!(obfuscator.namespace_prefix("pkg."), Some("a."));
}

#[test]
fn test_dictionary_exhaustion_falls_back_to_short_names() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            type_dictionary: Some(Dictionary::from_words(["apple"])),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("pkg.Foo"), "a.apple");
    assert_eq!(obfuscator.new_type_name("pkg.Bar"), "a.a");
    assert_eq!(obfuscator.new_type_name("pkg.Baz"), "a.b");
}

#[test]
fn test_forced_repackage() {
    let model = model_with(&["pkg.Foo", "other.Bar"], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            repackage_types: Some("x.y".to_string()),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("pkg.Foo"), "x.y.a");
    assert_eq!(obfuscator.new_type_name("other.Bar"), "x.y.b");
}

#[test]
fn test_repackage_into_root_namespace() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            repackage_types: Some(String::new()),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("pkg.Foo"), "a");
    assert_eq!(obfuscator.new_type_name("deep.pkg.Bar"), "b");
}

#[test]
fn test_collision_with_library_name() {
    let model = model_with(&["a.Foo"], &["a.a"]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert!(obfuscator.is_reserved("a.a"));
    assert_eq!(obfuscator.new_type_name("a.Foo"), "a.b");
}

#[test]
fn test_collision_with_library_name_after_repackaging() {
    let model = model_with(&["pkg.Foo"], &["a.a"]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            repackage_types: Some("a".to_string()),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("pkg.Foo"), "a.b");
}

#[test]
fn test_case_folded_collision_without_mixed_case() {
    let model = model_with(&["a.Foo"], &["a.A"]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    // "a.a" folds to the same name as the library's "a.A".
    assert_eq!(obfuscator.new_type_name("a.Foo"), "a.b");
}

#[test]
fn test_mixed_case_compares_verbatim() {
    let model = model_with(&["a.Foo"], &["a.A"]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            use_mixed_case_type_names: true,
            ..NameObfuscatorOptions::default()
        },
    );

    assert!(obfuscator.is_reserved("a.A"));
    assert!(!obfuscator.is_reserved("a.a"));
    assert_eq!(obfuscator.new_type_name("a.Foo"), "a.a");
    // A name once handed out is never handed out again.
    assert!(obfuscator.is_reserved("a.a"));
}

#[test]
fn test_dictionary_words_with_separators_never_collide() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            type_dictionary: Some(Dictionary::parse("a a$a", DictionaryMode::Identifiers)),
            use_mixed_case_type_names: true,
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("pkg.Foo"), "a.a");
    assert_eq!(obfuscator.new_type_name("pkg.Bar"), "a.a$a");
    // The nested sequence under `a.a$` starts with `a`, which would repeat
    // the top-level `a.a$a`.
    let nested = obfuscator.new_nested_type_name("a.a", "pkg.Foo$Inner");
    assert_ne!(nested, "a.a$a");
    assert_eq!(nested, "a.a$a$a");
}

#[test]
fn test_dictionary_words_differing_in_case_are_not_both_used() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            type_dictionary: Some(Dictionary::from_words(["Apple", "apple"])),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("pkg.First"), "a.Apple");
    assert_eq!(obfuscator.new_type_name("pkg.Second"), "a.a");
    assert!(obfuscator.is_reserved("a.APPLE"));
}

// =============================================================================
// Namespace prefixes
// =============================================================================

#[test]
fn test_types_in_one_namespace_share_a_prefix() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.new_type_name("pkg.Foo"), "a.a");
    assert_eq!(obfuscator.new_type_name("org.Baz"), "b.a");
    assert_eq!(obfuscator.new_type_name("pkg.Bar"), "a.b");
}

#[test]
fn test_namespace_hierarchy_is_preserved() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.new_type_name("com.example.Foo"), "a.a.a");
    assert_eq!(obfuscator.new_type_name("com.other.Bar"), "a.b.a");
    assert_eq!(obfuscator.new_type_name("com.Top"), "a.a");
    assert_eq!(obfuscator.namespace_prefix("com."), Some("a."));
    assert_eq!(obfuscator.namespace_prefix("com.example."), Some("a.a."));
}

#[test]
fn test_root_namespace_types_stay_in_root() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.new_type_name("Main"), "a");
    assert_eq!(obfuscator.new_type_name("Util"), "b");
}

#[test]
fn test_flatten_hierarchy() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            flatten_namespace_hierarchy: Some("z".to_string()),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("com.example.Foo"), "z.a.a");
    assert_eq!(obfuscator.new_type_name("com.other.Bar"), "z.b.a");
    assert_eq!(obfuscator.new_type_name("org.Baz"), "z.c.a");
    assert_eq!(obfuscator.new_type_name("com.example.Qux"), "z.a.b");
}

#[test]
fn test_retained_namespace_keeps_its_prefix() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            keep_namespaces: keep("com.example"),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("com.example.Foo"), "com.example.a");
    assert_eq!(obfuscator.new_type_name("com.example.Bar"), "com.example.b");
    assert_eq!(obfuscator.new_type_name("com.other.Baz"), "a.a.a");
}

#[test]
fn test_retention_wins_over_repackaging() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            keep_namespaces: keep("api.**"),
            repackage_types: Some("x".to_string()),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("api.v1.Client"), "api.v1.a");
    assert_eq!(obfuscator.new_type_name("impl.Worker"), "x.a");
}

#[test]
fn test_kept_type_pins_its_namespace_hierarchy() {
    let model = {
        let mut model = ProgramModel::new();
        model
            .add_program_type(ProgramType::new("com.example.Kept").with_new_name("q.r.Kept"))
            .unwrap();
        model
    };
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.namespace_prefix("com.example."), Some("q.r."));
    assert_eq!(obfuscator.namespace_prefix("com."), Some("q."));
    assert_eq!(obfuscator.new_type_name("com.example.Other"), "q.r.a");
    assert_eq!(obfuscator.new_type_name("com.other.X"), "q.a.a");
    assert!(obfuscator.is_reserved("q.r.Kept"));
}

#[test]
fn test_kept_type_pins_only_its_namespace_when_flattening() {
    let model = {
        let mut model = ProgramModel::new();
        model
            .add_program_type(ProgramType::new("com.example.Kept").with_new_name("q.r.Kept"))
            .unwrap();
        model
    };
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            flatten_namespace_hierarchy: Some("f".to_string()),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.namespace_prefix("com.example."), Some("q.r."));
    assert_eq!(obfuscator.namespace_prefix("com."), None);
}

#[test]
fn test_aggressive_repackaging_ignores_kept_namespaces() {
    let model = {
        let mut model = ProgramModel::new();
        model
            .add_program_type(ProgramType::new("com.Kept").with_new_name("com.Kept"))
            .unwrap();
        model
    };
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            repackage_types: Some("x".to_string()),
            allow_access_modification: true,
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.namespace_prefix("com."), None);
    assert_eq!(obfuscator.new_type_name("com.Other"), "x.a");
}

#[test]
fn test_repackaging_without_access_modification_keeps_shared_namespaces() {
    let model = {
        let mut model = ProgramModel::new();
        model
            .add_program_type(ProgramType::new("com.Kept").with_new_name("com.Kept"))
            .unwrap();
        model
    };
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            repackage_types: Some("x".to_string()),
            ..NameObfuscatorOptions::default()
        },
    );

    // Types next to a kept type may rely on namespace-private access.
    assert_eq!(obfuscator.new_type_name("com.Other"), "com.a");
    assert_eq!(obfuscator.new_type_name("org.Free"), "x.a");
}

#[test]
fn test_new_prefix_never_reuses_a_taken_prefix() {
    // The library pins "b." to itself, so a fresh namespace must skip it.
    let model = model_with(&[], &["b.Lib"]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.new_namespace_prefix("pkg."), "a.");
    assert_eq!(obfuscator.new_namespace_prefix("other."), "c.");
    assert_eq!(obfuscator.new_namespace_prefix("pkg."), "a.");
}

#[test]
fn test_overwritten_seed_prefix_stays_taken() {
    // Both kept types live in `pkg.`; the second seed overwrites the first
    // mapping, but `c.` must still not be handed out.
    let mut model = ProgramModel::new();
    model
        .add_program_type(ProgramType::new("pkg.One").with_new_name("c.One"))
        .unwrap();
    model
        .add_program_type(ProgramType::new("pkg.Two").with_new_name("d.Two"))
        .unwrap();
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.new_namespace_prefix("x."), "a.");
    assert_eq!(obfuscator.new_namespace_prefix("y."), "b.");
    assert_eq!(obfuscator.new_namespace_prefix("z."), "e.");
}

#[test]
fn test_namespace_dictionary() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(
        &model,
        NameObfuscatorOptions {
            namespace_dictionary: Some(Dictionary::from_words(["north", "south"])),
            ..NameObfuscatorOptions::default()
        },
    );

    assert_eq!(obfuscator.new_type_name("com.example.Foo"), "north.north.a");
    assert_eq!(obfuscator.new_type_name("org.Bar"), "south.a");
}

// =============================================================================
// Nested type names
// =============================================================================

#[test]
fn test_nested_names_extend_the_enclosing_name() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.new_nested_type_name("a.a", "pkg.Foo$Inner"), "a.a$a");
    assert_eq!(obfuscator.new_nested_type_name("a.a", "pkg.Foo$Other"), "a.a$b");
    assert_eq!(obfuscator.new_nested_type_name("a.b", "pkg.Bar$Inner"), "a.b$a");
}

#[test]
fn test_numeric_nested_names() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.new_numeric_nested_type_name("a.a", "pkg.Foo$1"), "a.a$1");
    assert_eq!(obfuscator.new_numeric_nested_type_name("a.a", "pkg.Foo$2"), "a.a$2");
    // Ordinary and numeric nested names draw from separate sequences.
    assert_eq!(obfuscator.new_nested_type_name("a.a", "pkg.Foo$Inner"), "a.a$a");
}

#[test]
fn test_numeric_nested_names_skip_reserved_names() {
    let model = {
        let mut model = ProgramModel::new();
        model
            .add_program_type(ProgramType::new("pkg.Foo$1").with_new_name("a.a$1"))
            .unwrap();
        model
    };
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());

    assert_eq!(obfuscator.new_numeric_nested_type_name("a.a", "pkg.Foo$2"), "a.a$2");
}

// =============================================================================
// Member names
// =============================================================================

#[test]
fn test_member_names_avoid_disallowed_names() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());
    let member = Member::field("count", "I");

    let mut disallowed = FxHashSet::default();
    assert_eq!(obfuscator.new_member_name("a.a", &member, &disallowed), "a");

    disallowed.insert("a".to_string());
    disallowed.insert("b".to_string());
    assert_eq!(obfuscator.new_member_name("a.a", &member, &disallowed), "c");
}

#[test]
fn test_member_names_ignore_reserved_type_names() {
    let model = model_with(&[], &["a"]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());
    let member = Member::method("run", "()V");

    assert_eq!(
        obfuscator.new_member_name("a.a", &member, &FxHashSet::default()),
        "a"
    );
}

// =============================================================================
// Scoped metadata names
// =============================================================================

#[test]
fn test_scopes_restart_their_sequence() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());
    let module = ModuleDescriptor::new("app");

    obfuscator.begin_module_scope();
    assert_eq!(obfuscator.generate_module_name(&module), "a");
    assert_eq!(obfuscator.generate_module_name(&module), "b");
    obfuscator.end_module_scope();

    let alias = TypeAlias::new("Handler");
    obfuscator.begin_type_alias_scope();
    assert_eq!(obfuscator.generate_type_alias_name("a.a", &alias), "a");
    obfuscator.end_type_alias_scope();

    let property = Property::new("size");
    obfuscator.begin_property_scope();
    assert_eq!(obfuscator.generate_property_name("a.a", &property), "a");
    assert_eq!(obfuscator.generate_property_name("a.a", &property), "b");
    obfuscator.end_property_scope();
}

#[test]
fn test_scoped_names_use_the_member_dictionary() {
    let model = model_with(&[], &[]);
    let members = DictionaryNameFactory::new(
        Dictionary::from_words(["alpha", "beta"]),
        Box::new(SimpleNameFactory::new(true)),
    );
    let mut obfuscator =
        NameObfuscator::new(&model, NameObfuscatorOptions::default(), Box::new(members));

    obfuscator.begin_property_scope();
    let property = Property::new("size");
    assert_eq!(obfuscator.generate_property_name("a.a", &property), "alpha");
    assert_eq!(obfuscator.generate_property_name("a.a", &property), "beta");
    assert_eq!(obfuscator.generate_property_name("a.a", &property), "a");
    obfuscator.end_property_scope();

    obfuscator.begin_module_scope();
    let module = ModuleDescriptor::new("app");
    assert_eq!(obfuscator.generate_module_name(&module), "alpha");
    obfuscator.end_module_scope();
}

#[test]
#[should_panic(expected = "outside its scope")]
fn test_scoped_name_outside_scope_panics() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());
    obfuscator.generate_property_name("a.a", &Property::new("size"));
}

#[test]
#[should_panic(expected = "while")]
fn test_nested_scopes_panic() {
    let model = model_with(&[], &[]);
    let mut obfuscator = obfuscator(&model, NameObfuscatorOptions::default());
    obfuscator.begin_property_scope();
    obfuscator.begin_type_alias_scope();
}
