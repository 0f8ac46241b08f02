use clap::Parser;
use issue_vault::cli::Cli;
use issue_vault::load_config::{load_config, DEFAULT_OUT_DIR, DEFAULT_OWNER, DEFAULT_REPO};
use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;

const MANAGED_VARS: [&str; 5] = ["OWNER", "REPO", "OUT_DIR", "GH_TOKEN", "GITHUB_API_URL"];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["issue-vault"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse")
}

fn config_file(yaml: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), yaml).unwrap();
    file
}

#[test]
#[serial]
fn falls_back_to_builtin_defaults() {
    clear_env();
    let settings = load_config(&parse(&[])).expect("defaults should load");

    assert_eq!(settings.owner, DEFAULT_OWNER);
    assert_eq!(settings.repo, DEFAULT_REPO);
    assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_OUT_DIR));
    assert_eq!(settings.api_base_url, "https://api.github.com");
    assert!(settings.token.is_none());
    assert_eq!(settings.fetch.page_size, 100);
    assert_eq!(settings.fetch.page_delay, Duration::from_millis(250));
}

#[test]
#[serial]
fn environment_fills_missing_positionals() {
    clear_env();
    env::set_var("OWNER", "env-owner");
    env::set_var("REPO", "env-repo");
    env::set_var("OUT_DIR", "env-out");
    env::set_var("GH_TOKEN", "token-123");

    let settings = load_config(&parse(&[])).unwrap();
    clear_env();

    assert_eq!(settings.owner, "env-owner");
    assert_eq!(settings.repo, "env-repo");
    assert_eq!(settings.output_dir, PathBuf::from("env-out"));
    assert_eq!(settings.token.as_deref(), Some("token-123"));
    assert!(!format!("{settings:?}").contains("token-123"));
}

#[test]
#[serial]
fn positionals_win_over_environment() {
    clear_env();
    env::set_var("OWNER", "env-owner");

    let settings = load_config(&parse(&["cli-owner", "cli-repo", "./cli-out"])).unwrap();
    clear_env();

    assert_eq!(settings.owner, "cli-owner");
    assert_eq!(settings.repo, "cli-repo");
    assert_eq!(settings.output_dir, PathBuf::from("./cli-out"));
}

#[test]
#[serial]
fn config_file_sits_between_environment_and_defaults() {
    clear_env();
    env::set_var("REPO", "env-repo");
    let file = config_file(
        r#"
owner: file-owner
repo: file-repo
output_dir: ./vault
api_base_url: https://ghe.example.com/api/v3
page_size: 50
page_delay_ms: 0
write_concurrency: 2
"#,
    );

    let path = file.path().to_str().unwrap();
    let settings = load_config(&parse(&["--config", path])).unwrap();
    clear_env();

    assert_eq!(settings.owner, "file-owner");
    assert_eq!(settings.repo, "env-repo");
    assert_eq!(settings.output_dir, PathBuf::from("./vault"));
    assert_eq!(settings.api_base_url, "https://ghe.example.com/api/v3");
    assert_eq!(settings.fetch.page_size, 50);
    assert_eq!(settings.fetch.page_delay, Duration::ZERO);
    assert_eq!(settings.write_concurrency, 2);

    let export = settings.export_config();
    assert_eq!(export.repo_label(), "file-owner/env-repo");
    assert_eq!(export.fetch.page_size, 50);
}

#[test]
#[serial]
fn empty_config_file_is_accepted() {
    clear_env();
    let file = config_file("");
    let settings = load_config(&parse(&["--config", file.path().to_str().unwrap()])).unwrap();
    assert_eq!(settings.owner, DEFAULT_OWNER);
}

#[test]
#[serial]
fn rejects_out_of_range_page_size() {
    clear_env();
    let file = config_file("page_size: 500\n");
    let err = load_config(&parse(&["--config", file.path().to_str().unwrap()])).unwrap_err();
    assert!(err.to_string().contains("page_size"));
}

#[test]
#[serial]
fn rejects_unknown_keys_and_secrets_in_file() {
    clear_env();
    let file = config_file("owner: a\ntoken: should-not-be-here\n");
    let err = load_config(&parse(&["--config", file.path().to_str().unwrap()])).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config YAML"));
}

#[test]
#[serial]
fn missing_config_file_is_an_error() {
    clear_env();
    let err = load_config(&parse(&["--config", "/nonexistent/issue-vault.yaml"])).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
#[serial]
fn blank_environment_values_fall_back_to_defaults() {
    clear_env();
    env::set_var("OWNER", "");
    env::set_var("REPO", "  ");
    env::set_var("OUT_DIR", "");
    env::set_var("GH_TOKEN", "");

    let settings = load_config(&parse(&[])).expect("blank env values should be accepted");
    clear_env();

    assert_eq!(settings.owner, DEFAULT_OWNER);
    assert_eq!(settings.repo, DEFAULT_REPO);
    assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_OUT_DIR));
    assert!(settings.token.is_none());
}

#[test]
#[serial]
fn blank_environment_values_defer_to_config_file() {
    clear_env();
    env::set_var("OWNER", "");
    env::set_var("OUT_DIR", "");
    let file = config_file("owner: file-owner\noutput_dir: ./vault\n");

    let settings = load_config(&parse(&["--config", file.path().to_str().unwrap()])).unwrap();
    clear_env();

    assert_eq!(settings.owner, "file-owner");
    assert_eq!(settings.output_dir, PathBuf::from("./vault"));
}
