//! Tests for argument parsing and path/config resolution.

use super::parse;
use capdl_core::config::{self, CapdlConfig};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

const BASE: [&str; 7] = [
    "capdl",
    "--brain-dir",
    "/srv/brain",
    "--input-dir",
    "/srv/input",
    "--brain-name",
    "test17",
];

fn with_base(extra: &[&'static str]) -> Vec<&'static str> {
    let mut args = BASE.to_vec();
    args.extend_from_slice(extra);
    args
}

#[test]
fn cli_parse_defaults_from_dataset_paths() {
    let cli = parse(&with_base(&[]));
    assert!(cli.csv_file.is_none());
    assert!(cli.captions_dir.is_none());
    assert!(!cli.json);
    assert_eq!(cli.csv_path(), PathBuf::from("/srv/brain/test17.csv"));
    assert_eq!(cli.captions_dir(), PathBuf::from("/srv/input/captions"));
}

#[test]
fn cli_parse_positional_csv() {
    let cli = parse(&with_base(&["../brain/mit_brain_test17.csv"]));
    assert_eq!(cli.csv_path(), PathBuf::from("../brain/mit_brain_test17.csv"));
    assert_eq!(cli.captions_dir(), PathBuf::from("/srv/input/captions"));
}

#[test]
fn cli_parse_positional_csv_and_captions_dir() {
    let cli = parse(&with_base(&["data.csv", "out/captions"]));
    assert_eq!(cli.csv_path(), PathBuf::from("data.csv"));
    assert_eq!(cli.captions_dir(), PathBuf::from("out/captions"));
}

#[test]
fn cli_parse_rejects_third_positional() {
    assert!(super::Cli::try_parse_from(with_base(&["a.csv", "dir", "extra"])).is_err());
}

#[test]
fn cli_parse_overrides() {
    let cli = parse(&with_base(&[
        "--language",
        "de",
        "--url-column",
        "link",
        "--timeout",
        "90",
        "--tool",
        "/opt/yt-dlp",
        "--json",
    ]));
    assert!(cli.json);
    let cfg = cli.apply_overrides(CapdlConfig::default());
    assert_eq!(cfg.language, "de");
    assert_eq!(cfg.url_column, "link");
    assert_eq!(cfg.tool.fetch_timeout_secs, 90);
    assert_eq!(cfg.tool.program, "/opt/yt-dlp");
}

#[test]
fn cli_without_overrides_keeps_config() {
    let cli = parse(&with_base(&[]));
    let mut cfg = CapdlConfig::default();
    cfg.language = "fr".to_string();
    cfg.tool.probe_timeout_secs = 9;
    let applied = cli.apply_overrides(cfg.clone());
    assert_eq!(applied, cfg);
}

#[test]
fn cli_parse_rejects_bad_timeout() {
    assert!(super::Cli::try_parse_from(with_base(&["--timeout", "soon"])).is_err());
}

#[test]
fn dataset_flags_read_env_with_builtin_defaults() {
    let cmd = super::Cli::command();
    let expected = [
        ("brain_dir", "BRAIN_DIR", config::DEFAULT_BRAIN_DIR),
        ("input_dir", "INPUT_DIR", config::DEFAULT_INPUT_DIR),
        ("brain_name", "MIT_BRAIN", config::DEFAULT_BRAIN_NAME),
    ];
    for (id, env, default) in expected {
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id().as_str() == id)
            .unwrap_or_else(|| panic!("missing argument {id}"));
        assert_eq!(arg.get_env().and_then(|e| e.to_str()), Some(env), "{id}");
        let defaults: Vec<_> = arg
            .get_default_values()
            .iter()
            .filter_map(|v| v.to_str())
            .collect();
        assert_eq!(defaults, [default], "{id}");
    }
    assert_eq!(config::DEFAULT_BRAIN_DIR, "../brain");
    assert_eq!(config::DEFAULT_INPUT_DIR, "../input");
    assert_eq!(config::DEFAULT_BRAIN_NAME, "mit_brain");
}
