//! `orgd` command-line interface
//!
//! Reads a snapshot file and prints reports over one factory's charts.
//! Every subcommand takes `--json` for machine-readable output.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use orgd_model::{AvailabilityStatus, ExperienceTier, FactoryId, Phase};
use orgd_store::{OrgStore, OrgdConfig, DEFAULT_CONFIG_FILE};
use std::io::Write;
use std::path::{Path, PathBuf};

mod commands;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "ORGD_LOG";

fn snapshot_arg() -> Arg {
    Arg::new("snapshot")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Snapshot JSON file")
}

/// Build the command tree
#[must_use]
pub fn build_cli() -> Command {
    Command::new("orgd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Organizational redesign reports: vacancies, matches, gaps and phase diffs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: ./orgd.toml if present)"),
        )
        .arg(
            Arg::new("factory")
                .long("factory")
                .global(true)
                .help("Factory to report on (default: first factory with data)"),
        )
        .arg(
            Arg::new("phase")
                .long("phase")
                .global(true)
                .default_value("current")
                .value_parser(|s: &str| s.parse::<Phase>())
                .help("Phase to report on: current or future"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("summary")
                .about("Headcount, hierarchy, span of control, coverage and succession risk")
                .arg(snapshot_arg()),
        )
        .subcommand(
            Command::new("matches")
                .about("Potential matches and ranked suggestions for vacant nodes")
                .arg(snapshot_arg())
                .arg(
                    Arg::new("node")
                        .long("node")
                        .help("Only this node (default: every vacant node)"),
                ),
        )
        .subcommand(
            Command::new("gaps")
                .about("Competency gaps of a person for a role")
                .arg(snapshot_arg())
                .arg(Arg::new("person").long("person").required(true).help("Person id"))
                .arg(Arg::new("role").long("role").required(true).help("Role id")),
        )
        .subcommand(
            Command::new("diff")
                .about("Changes from the current to the future chart")
                .arg(snapshot_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Check a snapshot parses and its references resolve")
                .arg(snapshot_arg()),
        )
        .subcommand(
            Command::new("search")
                .about("Search roles, personnel and nodes")
                .arg(snapshot_arg())
                .arg(Arg::new("text").help("Case-insensitive text"))
                .arg(
                    Arg::new("availability")
                        .long("availability")
                        .value_parser(|s: &str| s.parse::<AvailabilityStatus>())
                        .help("Personnel availability, e.g. available"),
                )
                .arg(
                    Arg::new("experience")
                        .long("experience")
                        .value_parser(|s: &str| s.parse::<ExperienceTier>())
                        .help("Personnel experience tier, e.g. senior"),
                )
                .arg(
                    Arg::new("department")
                        .long("department")
                        .help("Role department"),
                )
                .arg(
                    Arg::new("vacant")
                        .long("vacant")
                        .action(ArgAction::SetTrue)
                        .help("Only vacant nodes"),
                ),
        )
}

/// Configuration from `--config`, else `./orgd.toml`, else defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<OrgdConfig> {
    match path {
        Some(path) => OrgdConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            OrgdConfig::load(DEFAULT_CONFIG_FILE).context("loading orgd.toml")
        }
        None => Ok(OrgdConfig::default()),
    }
}

/// Loaded snapshot plus the chart selection
pub(crate) struct Session {
    pub(crate) config: OrgdConfig,
    pub(crate) store: OrgStore,
    pub(crate) factory: FactoryId,
    pub(crate) phase: Phase,
    pub(crate) json: bool,
}

impl Session {
    fn open(args: &ArgMatches) -> anyhow::Result<Self> {
        let config = load_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
        let path = args
            .get_one::<PathBuf>("snapshot")
            .context("snapshot path is required")?;

        let mut store = OrgStore::from_config(&config);
        store
            .load_from(path)
            .with_context(|| format!("loading snapshot {}", path.display()))?;
        let factory = pick_factory(&store, args.get_one::<String>("factory"))?;

        Ok(Self {
            config,
            store,
            factory,
            phase: args.get_one::<Phase>("phase").copied().unwrap_or(Phase::Current),
            json: args.get_flag("json"),
        })
    }
}

fn pick_factory(store: &OrgStore, requested: Option<&String>) -> anyhow::Result<FactoryId> {
    if let Some(name) = requested {
        let id = FactoryId::from(name.as_str());
        anyhow::ensure!(store.has_factory(&id), "unknown factory: {id}");
        return Ok(id);
    }
    let with_data = store.factories().iter().find(|f| {
        Phase::ALL
            .iter()
            .any(|p| store.chart(f, *p).is_some_and(|c| !c.is_empty()))
    });
    with_data
        .or_else(|| store.factories().first())
        .cloned()
        .context("no factories configured")
}

/// Run the parsed command, writing reports to `out`
///
/// Returns `Ok(false)` when the command ran but its check failed.
pub fn run(matches: &ArgMatches, out: &mut dyn Write) -> anyhow::Result<bool> {
    match matches.subcommand() {
        Some(("validate", args)) => commands::validate(args, out),
        Some((name, args)) => {
            let session = Session::open(args)?;
            tracing::debug!(command = name, factory = %session.factory, phase = %session.phase, "running");
            match name {
                "summary" => commands::summary(&session, out),
                "matches" => commands::matches(&session, args, out),
                "gaps" => commands::gaps(&session, args, out),
                "diff" => commands::diff(&session, out),
                "search" => commands::search(&session, args, out),
                other => anyhow::bail!("unknown command: {other}"),
            }
        }
        None => anyhow::bail!("no command given"),
    }
}
