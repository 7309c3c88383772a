mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use keytable_core::{GeneratorConfig, LoadableConfig, init_logging};
use tracing::error;

fn main() -> Result<()> {
    let matches: ArgMatches = build_cli().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GeneratorConfig::load_from(path)?,
        None => GeneratorConfig::load()?,
    };
    init_logging(&config.logging, matches.get_flag("quiet"));

    match matches.subcommand() {
        Some(("generate", sub_m)) => commands::generate(sub_m, &config),
        Some(("lookup", sub_m)) => commands::lookup(sub_m),
        Some(("dump", sub_m)) => commands::dump(sub_m),
        Some(("check", sub_m)) => commands::check(sub_m),
        _ => {
            error!("Invalid command. Use --help for usage information.");
            Ok(())
        }
    }
}

fn build_cli() -> Command {
    Command::new("keytable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keycode name table generator")
        .arg(
            Arg::new("config")
                .long("config")
                .help("Generator config file (defaults to the user config directory)")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Print no informational messages")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate a Rust name table from a CSV mapping")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .help("CSV file with `code,name` rows")
                        .value_name("CSV")
                        .value_parser(clap::value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Accessor function name (e.g., keycode_windows_rawname)")
                        .value_name("FN")
                        .required(true),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file (defaults to <FN>.rs minus the keycode_ prefix)")
                        .value_name("PATH")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("table-path")
                        .long("table-path")
                        .help("Module path providing SparseStringTable")
                        .value_name("PATH"),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Look up a Windows raw scancode name")
                .arg(
                    Arg::new("index")
                        .help("Key code, decimal or hexadecimal (e.g., 0x2A for Left Shift)")
                        .allow_negative_numbers(true)
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("List every named Windows raw scancode")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print entries as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Verify the built-in table against a CSV mapping")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .help("CSV file with `code,name` rows")
                        .value_name("CSV")
                        .value_parser(clap::value_parser!(PathBuf))
                        .required(true),
                ),
        )
}
