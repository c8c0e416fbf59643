use super::args::CliArgs;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn parses_required_model_only() {
    let args = CliArgs::try_parse_from(["shroud", "--model", "model.json"]).unwrap();
    assert_eq!(args.model, PathBuf::from("model.json"));
    assert!(args.config.is_none());
    assert!(args.print_mapping.is_none());
    assert!(args.keep_package.is_empty());
    assert!(!args.no_mixed_case);
}

#[test]
fn parses_overrides() {
    let args = CliArgs::try_parse_from([
        "shroud",
        "--model",
        "model.json",
        "-c",
        "shroud.json",
        "--print-mapping",
        "out.map",
        "--repackage",
        "x.y",
        "--keep-package",
        "com.api",
        "--keep-package",
        "org.**",
        "--no-mixed-case",
    ])
    .unwrap();

    assert_eq!(args.config, Some(PathBuf::from("shroud.json")));
    assert_eq!(args.print_mapping, Some(PathBuf::from("out.map")));
    assert_eq!(args.repackage.as_deref(), Some("x.y"));
    assert_eq!(args.keep_package, ["com.api", "org.**"]);
    assert!(args.no_mixed_case);
}

#[test]
fn rejects_missing_model() {
    assert!(CliArgs::try_parse_from(["shroud", "--flatten", "z"]).is_err());
}
