//! CLI argument definitions for `strata`.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and inspect adaptive music projects")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .short('d')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Show debug output"),
        )
        .subcommand(
            Command::new("render")
                .about("Mix a project track offline into a WAV file")
                .arg(
                    Arg::new("PROJECT")
                        .help("Path to the project JSON")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_name("WAV")
                        .required(true)
                        .help("Output WAV path (32-bit float)"),
                )
                .arg(
                    Arg::new("track")
                        .long("track")
                        .short('t')
                        .value_name("NAME")
                        .help("Track to play (defaults to the first track)"),
                )
                .arg(
                    Arg::new("seconds")
                        .long("seconds")
                        .short('s')
                        .value_name("SECONDS")
                        .default_value("30")
                        .value_parser(value_parser!(f64))
                        .help("Length of the render in seconds"),
                )
                .arg(
                    Arg::new("sample-rate")
                        .long("sample-rate")
                        .value_name("HZ")
                        .default_value("44100")
                        .value_parser(value_parser!(u32))
                        .help("Output sample rate; clips must match it"),
                )
                .arg(
                    Arg::new("channels")
                        .long("channels")
                        .short('c')
                        .value_name("N")
                        .default_value("2")
                        .value_parser(value_parser!(usize))
                        .help("Output channel count (1-8)"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("N")
                        .value_parser(value_parser!(u64))
                        .help("Seed clip selection for a reproducible render"),
                )
                .arg(
                    Arg::new("condition")
                        .long("condition")
                        .value_name("ID=VALUE@SECONDS")
                        .action(ArgAction::Append)
                        .help("Set a condition at a point in the render (repeatable)"),
                )
                .arg(
                    Arg::new("debug-clipping")
                        .long("debug-clipping")
                        .action(ArgAction::SetTrue)
                        .help("Report mixed samples outside -1.0..=1.0"),
                ),
        )
        .subcommand(
            Command::new("info")
                .about("Print the tracks of a project as JSON")
                .arg(
                    Arg::new("PROJECT")
                        .help("Path to the project JSON")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("Emit default JSON payloads")
                .subcommand_required(true)
                .subcommand(
                    Command::new("project-json").about("Print an example project JSON payload"),
                ),
        )
}
