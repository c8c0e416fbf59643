//! Name assignment benchmarks.
//!
//! Measures a full renaming pass over synthetic models with many namespaces,
//! nested and anonymous types, and members.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use shroud::model::{LibraryType, Member, ProgramModel, ProgramType};
use shroud::names::Dictionary;
use shroud::obfuscate::{NameObfuscatorOptions, ObfuscationOptions, obfuscate};

/// Builds `namespaces * types_per_namespace` top-level types, each with one
/// anonymous and one member nested type.
fn synthetic_model(namespaces: usize, types_per_namespace: usize) -> ProgramModel {
    let mut model = ProgramModel::new();
    model.add_library_type(LibraryType::new("a.a")).unwrap();
    for ns in 0..namespaces {
        for ty in 0..types_per_namespace {
            let outer = format!("com.example.module{}.ns{ns}.Type{ty}", ns % 7);
            model
                .add_program_type(
                    ProgramType::new(format!("{outer}$1")).enclosed_by_method_of(&outer),
                )
                .unwrap();
            model
                .add_program_type(ProgramType::new(format!("{outer}$Builder")).nested_in(&outer))
                .unwrap();
            model
                .add_program_type(
                    ProgramType::new(outer)
                        .with_member(Member::field("count", "I"))
                        .with_member(Member::field("label", "Ljava/lang/String;"))
                        .with_member(Member::method("run", "()V"))
                        .with_member(Member::method("size", "()I")),
                )
                .unwrap();
        }
    }
    model
}

fn bench_full_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pass");

    for &(namespaces, types) in &[(10, 10), (50, 20), (200, 25)] {
        let model = synthetic_model(namespaces, types);
        group.bench_with_input(
            BenchmarkId::from_parameter(model.len()),
            &model,
            |b, model| {
                b.iter(|| {
                    let mut model = model.clone();
                    obfuscate(&mut model, ObfuscationOptions::default());
                    black_box(model)
                })
            },
        );
    }

    group.finish();
}

fn bench_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("options");
    let model = synthetic_model(50, 20);
    let dictionary = Dictionary::from_words((0..500).map(|i| format!("word{i}")));

    group.bench_function("repackage", |b| {
        b.iter(|| {
            let mut model = model.clone();
            let options = ObfuscationOptions {
                names: NameObfuscatorOptions {
                    repackage_types: Some("x".to_string()),
                    ..NameObfuscatorOptions::default()
                },
                ..ObfuscationOptions::default()
            };
            obfuscate(&mut model, options);
            black_box(model)
        })
    });

    group.bench_function("dictionaries", |b| {
        b.iter(|| {
            let mut model = model.clone();
            let options = ObfuscationOptions {
                names: NameObfuscatorOptions {
                    type_dictionary: Some(dictionary.clone()),
                    namespace_dictionary: Some(dictionary.clone()),
                    ..NameObfuscatorOptions::default()
                },
                member_dictionary: Some(dictionary.clone()),
                ..ObfuscationOptions::default()
            };
            obfuscate(&mut model, options);
            black_box(model)
        })
    });

    group.finish();
}

criterion_group!(name_assignment_benches, bench_full_pass, bench_options);
criterion_main!(name_assignment_benches);
