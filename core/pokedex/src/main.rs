mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::Write;
use std::process;

use cli::render::{
    render_names, render_page_json, render_page_table, render_record, render_record_json,
};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{OutputFormat, PokedexCommand};
use ports::inbound::UseCaseRunner;
use wiring::{wire_pokedex, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    /// コマンドを実行して out に表示する
    fn execute(&self, cmd: PokedexCommand, out: &mut dyn Write) -> Result<i32, Error> {
        let uc = &self.app.use_case;
        match cmd {
            PokedexCommand::Help => {
                print_help(out)?;
                Ok(0)
            }
            PokedexCommand::List {
                detail_level,
                query,
                format,
            } => {
                let page = uc.list(detail_level, &query)?;
                match format {
                    OutputFormat::Table => render_page_table(out, &page)?,
                    OutputFormat::Json => render_page_json(out, &page)?,
                }
                Ok(0)
            }
            PokedexCommand::Show {
                name,
                detail_level,
                format,
            } => {
                let record = uc.show(&name, detail_level)?;
                match format {
                    OutputFormat::Table => render_record(out, &record)?,
                    OutputFormat::Json => render_record_json(out, &record)?,
                }
                Ok(0)
            }
            PokedexCommand::Evolutions { name } => {
                let names = uc.evolutions(&name)?;
                render_names(out, &names)?;
                Ok(0)
            }
        }
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config)?;
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let result = self.execute(cmd, &mut out);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn cmd_name_for_log(cmd: &PokedexCommand) -> &'static str {
    match cmd {
        PokedexCommand::Help => "help",
        PokedexCommand::List { .. } => "list",
        PokedexCommand::Show { .. } => "show",
        PokedexCommand::Evolutions { .. } => "evolutions",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("pokedex: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if config.help {
        print_help(&mut std::io::stdout().lock())?;
        return Ok(0);
    }
    let app = wire_pokedex(&config)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: pokedex [options] <list|show|evolutions> [args...]");
}

fn print_help(out: &mut dyn Write) -> Result<(), Error> {
    const HELP: &str = "\
Usage: pokedex [options] <command> [args...]

Commands:
  list                          Fetch the Pokémon list and print one page of it
    -s, --search <text>         Case-insensitive substring match on the name
    -t, --type <type>           Only Pokémon that have this type (fire, water, ...)
    -P, --page <n>              Page number, starting at 1 (default: 1)
    --page-size <n>             Rows per page (default: config.json page_size, or 50)
    --abilities                 Include abilities
    --evolutions                Include evolution chains (extra requests per Pokémon)
    --json                      Print JSON instead of a table
  show <name>                   Show one Pokémon (height, weight, abilities, types)
    --evolutions                Include the evolution chain
    --json                      Print JSON instead of a table
  evolutions <name>             Print the evolution chain, one species per line

Options:
  -h, --help                    Show this help message
  -v, --verbose                 Print progress and log summaries to stderr
  --base-url <url>              PokéAPI base URL
  --limit <n>                   Number of Pokémon requested from the list endpoint (default: 600)
  --concurrency <n>             Maximum Pokémon fetched in parallel (default: 10)
  --timeout <secs>              Per-request timeout, 0 for none (default: 30)
  --deadline <secs>             Give up the whole fetch after this many seconds
  --generate <shell>            Generate shell completion script (bash, zsh, fish)

Environment:
  POKEDEX_HOME      Home directory. Config: $POKEDEX_HOME/config.json; log: $POKEDEX_HOME/log/pokedex.jsonl
                    If unset, $XDG_CONFIG_HOME/pokedex (e.g. ~/.config/pokedex) is used.
  POKEDEX_BASE_URL  PokéAPI base URL (overridden by --base-url)

Examples:
  pokedex list --type fire
  pokedex list --search char --page 2 --page-size 10
  pokedex show pikachu --evolutions
  pokedex evolutions eevee
";
    out.write_all(HELP.as_bytes())
        .map_err(|e| Error::io_msg(format!("Failed to write output: {}", e)))
}
