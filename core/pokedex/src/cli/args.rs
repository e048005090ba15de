use crate::domain::{CatalogQuery, FetchOverrides, OutputFormat, PokedexCommand};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{DetailLevel, EntityName};
use common::error::Error;
use std::time::Duration;

/// サブコマンド
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    List,
    Show(String),
    Evolutions(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 進捗と要点ログを stderr にも出す
    pub verbose: bool,
    pub action: Action,
    /// --json: 表ではなく JSON で出力する
    pub json: bool,
    /// --abilities: 特性も取得する（list のみ、追加リクエストなし）
    pub abilities: bool,
    /// --evolutions: species / evolution-chain も取得する
    pub evolutions: bool,
    pub search: Option<String>,
    pub type_name: Option<String>,
    pub page: usize,
    pub overrides: FetchOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            verbose: false,
            action: Action::None,
            json: false,
            abilities: false,
            evolutions: false,
            search: None,
            type_name: None,
            page: 1,
            overrides: FetchOverrides::default(),
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn name_arg() -> clap::Arg {
    clap::Arg::new("name")
        .index(1)
        .value_name("name")
        .help("Pokémon name or National Dex number (e.g. pikachu, 25)")
        .required(true)
        .num_args(1)
}

fn json_arg() -> clap::Arg {
    clap::Arg::new("json")
        .long("json")
        .help("Print JSON instead of a table")
        .action(ArgAction::SetTrue)
}

fn evolutions_arg() -> clap::Arg {
    clap::Arg::new("evolutions")
        .long("evolutions")
        .help("Also fetch species and evolution chain (one or two extra requests per Pokémon)")
        .action(ArgAction::SetTrue)
}

pub(crate) fn build_clap_command() -> clap::Command {
    clap::Command::new("pokedex")
        .about("Fetch Pokémon from PokéAPI and print a searchable, paginated list")
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print progress and log summaries to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("base-url")
                .long("base-url")
                .value_name("url")
                .help("PokéAPI base URL (default: config.json, POKEDEX_BASE_URL, or https://pokeapi.co/api/v2)")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("limit")
                .long("limit")
                .value_name("n")
                .help("Number of Pokémon to request from the list endpoint")
                .value_parser(value_parser!(u32).range(1..))
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("concurrency")
                .long("concurrency")
                .value_name("n")
                .help("Maximum number of Pokémon fetched in parallel")
                .value_parser(value_parser!(u64).range(1..))
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("timeout")
                .long("timeout")
                .value_name("secs")
                .help("Per-request timeout in seconds (0 = none)")
                .value_parser(value_parser!(u64))
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("deadline")
                .long("deadline")
                .value_name("secs")
                .help("Give up the whole fetch after this many seconds")
                .value_parser(value_parser!(u64).range(1..))
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .subcommand(
            clap::Command::new("list")
                .about("List Pokémon (filtered and paginated)")
                .disable_help_flag(true)
                .arg(
                    clap::Arg::new("search")
                        .short('s')
                        .long("search")
                        .value_name("text")
                        .help("Case-insensitive substring match on the name")
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("type")
                        .short('t')
                        .long("type")
                        .value_name("type")
                        .help("Only Pokémon that have this type (e.g. fire, water)")
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("page")
                        .short('P')
                        .long("page")
                        .value_name("n")
                        .help("Page number, starting at 1")
                        .value_parser(value_parser!(u64).range(1..))
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("page-size")
                        .long("page-size")
                        .value_name("n")
                        .help("Rows per page")
                        .value_parser(value_parser!(u64).range(1..))
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("abilities")
                        .long("abilities")
                        .help("Include abilities (no extra requests)")
                        .action(ArgAction::SetTrue),
                )
                .arg(evolutions_arg())
                .arg(json_arg()),
        )
        .subcommand(
            clap::Command::new("show")
                .about("Show one Pokémon in detail")
                .disable_help_flag(true)
                .arg(name_arg())
                .arg(evolutions_arg())
                .arg(json_arg()),
        )
        .subcommand(
            clap::Command::new("evolutions")
                .about("Print the evolution chain of a Pokémon, one species per line")
                .disable_help_flag(true)
                .arg(name_arg()),
        )
}

fn get_usize(matches: &clap::ArgMatches, id: &str) -> Option<usize> {
    matches
        .get_one::<u64>(id)
        .map(|&n| usize::try_from(n).unwrap_or(usize::MAX))
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let help = matches.get_flag("help");
    let verbose = matches.get_flag("verbose");
    let overrides = FetchOverrides {
        base_url: non_empty(matches.get_one::<String>("base-url")),
        limit: matches.get_one::<u32>("limit").copied(),
        concurrency: get_usize(matches, "concurrency"),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        deadline: matches
            .get_one::<u64>("deadline")
            .map(|&s| Duration::from_secs(s)),
        page_size: None,
    };

    let mut config = Config {
        help,
        verbose,
        overrides,
        ..Default::default()
    };

    match matches.subcommand() {
        Some(("list", sub)) => {
            config.action = Action::List;
            config.search = non_empty(sub.get_one::<String>("search"));
            config.type_name = non_empty(sub.get_one::<String>("type")).map(|t| t.to_lowercase());
            config.page = get_usize(sub, "page").unwrap_or(1);
            config.overrides.page_size = get_usize(sub, "page-size");
            config.abilities = sub.get_flag("abilities");
            config.evolutions = sub.get_flag("evolutions");
            config.json = sub.get_flag("json");
        }
        Some(("show", sub)) => {
            let name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            config.action = Action::Show(name);
            config.evolutions = sub.get_flag("evolutions");
            config.json = sub.get_flag("json");
        }
        Some(("evolutions", sub)) => {
            let name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            config.action = Action::Evolutions(name);
        }
        _ => {}
    }
    config
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let cmd = build_clap_command();
    let matches = cmd
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let cmd = build_clap_command();
    let matches = cmd
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "pokedex", &mut std::io::stdout());
}

/// Config を PokedexCommand に変換する（名前の検証もここで行う）
pub fn config_to_command(config: Config) -> Result<PokedexCommand, Error> {
    if config.help {
        return Ok(PokedexCommand::Help);
    }

    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let detail_level = if config.evolutions {
        DetailLevel::WithEvolutions
    } else if config.abilities {
        DetailLevel::WithAbilities
    } else {
        DetailLevel::Basic
    };

    match config.action {
        Action::None => Err(Error::invalid_argument(
            "No command provided. Use 'pokedex list', 'pokedex show <name>' or 'pokedex evolutions <name>'.",
        )),
        Action::List => Ok(PokedexCommand::List {
            detail_level,
            query: CatalogQuery {
                search: config.search,
                type_name: config.type_name,
                page: config.page,
                page_size: config.overrides.page_size,
            },
            format,
        }),
        Action::Show(name) => Ok(PokedexCommand::Show {
            name: EntityName::parse(&name)?,
            // 単体表示は詳細ページと同じく特性を常に出す
            detail_level: detail_level.max(DetailLevel::WithAbilities),
            format,
        }),
        Action::Evolutions(name) => Ok(PokedexCommand::Evolutions {
            name: EntityName::parse(&name)?,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.help);
        assert!(!config.verbose);
        assert_eq!(config.action, Action::None);
        assert_eq!(config.page, 1);
        assert_eq!(config.overrides, FetchOverrides::default());
    }

    #[test]
    fn test_parse_args_no_args() {
        let config = parse_args_from(&args(&["pokedex"])).unwrap();
        assert!(!config.help);
        assert_eq!(config.action, Action::None);
        let err = config_to_command(config).unwrap_err();
        assert!(err.to_string().contains("No command provided"));
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_args_help_short_and_long() {
        for flag in ["-h", "--help"] {
            let config = parse_args_from(&args(&["pokedex", flag])).unwrap();
            assert!(config.help);
            assert_eq!(config_to_command(config).unwrap(), PokedexCommand::Help);
        }
    }

    #[test]
    fn test_parse_args_help_after_subcommand() {
        let config = parse_args_from(&args(&["pokedex", "list", "-h"])).unwrap();
        assert!(config.help);
    }

    #[test]
    fn test_parse_args_unknown_option() {
        let result = parse_args_from(&args(&["pokedex", "--unknown"]));
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_list_with_filters() {
        let config = parse_args_from(&args(&[
            "pokedex", "list", "--search", "char", "--type", "Fire", "--page", "2",
            "--page-size", "10", "--json",
        ]))
        .unwrap();
        assert_eq!(config.action, Action::List);
        assert_eq!(config.type_name.as_deref(), Some("fire"));
        let cmd = config_to_command(config).unwrap();
        assert_eq!(
            cmd,
            PokedexCommand::List {
                detail_level: DetailLevel::Basic,
                query: CatalogQuery {
                    search: Some("char".to_string()),
                    type_name: Some("fire".to_string()),
                    page: 2,
                    page_size: Some(10),
                },
                format: OutputFormat::Json,
            }
        );
    }

    #[test]
    fn test_parse_list_detail_levels() {
        let config = parse_args_from(&args(&["pokedex", "list", "--abilities"])).unwrap();
        assert!(matches!(
            config_to_command(config).unwrap(),
            PokedexCommand::List { detail_level: DetailLevel::WithAbilities, .. }
        ));
        let config =
            parse_args_from(&args(&["pokedex", "list", "--abilities", "--evolutions"])).unwrap();
        assert!(matches!(
            config_to_command(config).unwrap(),
            PokedexCommand::List { detail_level: DetailLevel::WithEvolutions, .. }
        ));
    }

    #[test]
    fn test_parse_global_overrides_after_subcommand() {
        let config = parse_args_from(&args(&[
            "pokedex", "list", "--limit", "151", "--concurrency", "4", "--timeout", "0",
            "--deadline", "60", "--base-url", "http://localhost:9000/api/v2",
        ]))
        .unwrap();
        assert_eq!(config.overrides.limit, Some(151));
        assert_eq!(config.overrides.concurrency, Some(4));
        assert_eq!(config.overrides.timeout_secs, Some(0));
        assert_eq!(config.overrides.deadline, Some(Duration::from_secs(60)));
        assert_eq!(
            config.overrides.base_url.as_deref(),
            Some("http://localhost:9000/api/v2")
        );
    }

    #[test]
    fn test_parse_rejects_zero_limit_and_page() {
        assert!(parse_args_from(&args(&["pokedex", "list", "--limit", "0"])).is_err());
        assert!(parse_args_from(&args(&["pokedex", "list", "--page", "0"])).is_err());
        assert!(parse_args_from(&args(&["pokedex", "list", "--concurrency", "0"])).is_err());
    }

    #[test]
    fn test_parse_show_normalizes_name() {
        let config = parse_args_from(&args(&["pokedex", "show", "Pikachu"])).unwrap();
        assert_eq!(config.action, Action::Show("Pikachu".to_string()));
        let cmd = config_to_command(config).unwrap();
        assert_eq!(
            cmd,
            PokedexCommand::Show {
                name: EntityName::parse("pikachu").unwrap(),
                detail_level: DetailLevel::WithAbilities,
                format: OutputFormat::Table,
            }
        );
    }

    #[test]
    fn test_parse_show_requires_name() {
        let err = parse_args_from(&args(&["pokedex", "show"])).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_invalid_name_is_usage_error() {
        let config = parse_args_from(&args(&["pokedex", "evolutions", "../x"])).unwrap();
        let err = config_to_command(config).unwrap_err();
        assert!(err.is_usage());
    }
}
