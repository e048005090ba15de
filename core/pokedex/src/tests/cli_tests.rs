use crate::cli::args::parse_args_from;
use crate::cli::config_to_command;
use crate::domain::PokedexCommand;
use crate::ports::inbound::UseCaseRunner;
use crate::wiring::wire_with;
use crate::Runner;
use common::adapter::{NoopLog, StubJsonSource};
use common::config::PokedexConfig;
use std::sync::Arc;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_run_without_command_is_usage_error() {
    let config = parse_args_from(&args(&["pokedex"])).unwrap();
    let app = wire_with(
        PokedexConfig::default(),
        None,
        Arc::new(StubJsonSource::new()),
        Arc::new(NoopLog),
    );
    let runner = Runner { app };
    let err = runner.run(config).unwrap_err();
    assert!(err.to_string().contains("No command provided"));
    assert_eq!(err.exit_code(), 64);
}

#[test]
fn test_run_list_reports_list_unavailable() {
    let config = parse_args_from(&args(&["pokedex", "list", "--limit", "5"])).unwrap();
    let app = wire_with(
        PokedexConfig::default(),
        None,
        Arc::new(StubJsonSource::new()),
        Arc::new(NoopLog),
    );
    let runner = Runner { app };
    let err = runner.run(config).unwrap_err();
    assert!(err.to_string().starts_with("Failed to fetch Pokémon list"));
    assert_eq!(err.exit_code(), 69);
}

#[test]
fn test_help_takes_precedence_over_subcommand() {
    let config = parse_args_from(&args(&["pokedex", "show", "pikachu", "--help"])).unwrap();
    assert_eq!(config_to_command(config).unwrap(), PokedexCommand::Help);
}

#[test]
fn test_run_writes_lifecycle_to_jsonl_log() {
    use common::adapter::{FileJsonLog, StdFileSystem};

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log").join("pokedex.jsonl");
    std::fs::create_dir_all(log_path.parent().unwrap()).unwrap();
    let logger = Arc::new(FileJsonLog::new(Arc::new(StdFileSystem), &log_path));
    let app = wire_with(
        PokedexConfig::default(),
        None,
        Arc::new(StubJsonSource::new()),
        logger,
    );
    let runner = Runner { app };
    let config = parse_args_from(&args(&["pokedex", "evolutions", "pikachu"])).unwrap();
    assert!(runner.run(config).is_err());

    let body = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<serde_json::Value> = body
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(lines.iter().any(|v| v["message"] == "command started"));
    assert!(lines
        .iter()
        .any(|v| v["message"] == "command finished" && v["fields"]["exit_code"] == 69));
}
