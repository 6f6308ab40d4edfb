use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use strata_lib::config::{LoadedAudio, ProjectConfig};
use strata_lib::EngineSettings;

use crate::cli::error::CliError;
use crate::cli::render::{self, ConditionCue, RenderOptions};

pub fn run(args: &ArgMatches) -> Result<i32, CliError> {
    match args.subcommand() {
        Some(("render", sub)) => run_render(sub),
        Some(("info", sub)) => run_info(sub),
        Some(("create", sub)) => run_create(sub),
        _ => Err(CliError::InvalidArgument("unknown command".to_string())),
    }
}

fn run_render(args: &ArgMatches) -> Result<i32, CliError> {
    let conditions = args
        .get_many::<String>("condition")
        .into_iter()
        .flatten()
        .map(|raw| raw.parse::<ConditionCue>())
        .collect::<Result<Vec<_>, _>>()?;

    let options = RenderOptions {
        project: required_path(args, "PROJECT")?,
        out: required_path(args, "out")?,
        track: args.get_one::<String>("track").cloned(),
        seconds: args.get_one::<f64>("seconds").copied().unwrap_or(30.0),
        sample_rate: args.get_one::<u32>("sample-rate").copied().unwrap_or(44_100),
        channels: args.get_one::<usize>("channels").copied().unwrap_or(2),
        seed: args.get_one::<u64>("seed").copied(),
        conditions,
        debug_clipping: args.get_flag("debug-clipping"),
    };

    info!("Rendering {}", options.project.display());
    let summary = render::render(&options)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(0)
}

fn run_info(args: &ArgMatches) -> Result<i32, CliError> {
    let project = ProjectConfig::load(required_path(args, "PROJECT")?)?;
    let settings = EngineSettings::default();
    // Metadata only: every clip is backed by silence.
    let engine = project.build_engine(settings, None, |_| Ok(LoadedAudio::silence(&settings)))?;
    println!("{}", serde_json::to_string_pretty(&engine.tracks_info())?);
    Ok(0)
}

fn run_create(args: &ArgMatches) -> Result<i32, CliError> {
    match args.subcommand() {
        Some(("project-json", _)) => {
            println!("{}", ProjectConfig::example().to_json_pretty()?);
            Ok(0)
        }
        _ => Err(CliError::InvalidArgument(
            "create requires a payload name".to_string(),
        )),
    }
}

fn required_path(args: &ArgMatches, name: &str) -> Result<PathBuf, CliError> {
    args.get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| CliError::InvalidArgument(format!("missing {}", name)))
}
