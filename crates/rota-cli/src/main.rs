mod cmd;
mod locate;
mod output;

use anyhow::Context;
use clap::Parser;
use rota_core::{RotaError, Settings};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "autoassigner",
    about = "Automatically assign tasks to team members",
    long_about = "Picks the next assignee for a group using its configured selection \
                  strategy and availability check, then records the assignment.\n\n\
                  Example:\n  autoassigner team-alpha",
    disable_version_flag = true
)]
struct Cli {
    /// Group to assign from (the base name of a file in conf_dir)
    #[arg(required_unless_present_any = ["list_groups", "version"])]
    groupname: Option<String>,

    /// Simulate assignment without updating logs or counts
    #[arg(long)]
    dry_run: bool,

    /// Display current assignment counts for the group
    #[arg(long)]
    show_counts: bool,

    /// Reset assignment counts for the group
    #[arg(long)]
    reset_counts: bool,

    /// Path to the configuration file
    #[arg(short = 'c', long, env = "AUTOASSIGNER_CONFIG")]
    config: Option<PathBuf>,

    /// List all available groups
    #[arg(short = 'l', long)]
    list_groups: bool,

    /// Display version information
    #[arg(short = 'v', long)]
    version: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.version {
        return cmd::version::run(cli.json);
    }

    let config_path = locate::resolve_config(cli.config.as_deref());
    let settings = load_settings(&config_path)?;
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    if cli.list_groups {
        return cmd::groups::list(&settings, cli.json);
    }

    let group = cli
        .groupname
        .as_deref()
        .context("requires exactly one argument: <GROUPNAME>")?;

    if cli.show_counts {
        cmd::counts::show(&settings, group, cli.json)
    } else if cli.reset_counts {
        cmd::counts::reset(&settings, group, cli.json)
    } else {
        cmd::assign::run(&settings, group, cli.dry_run, cli.json)
    }
}

fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    match Settings::load(path) {
        Ok(s) => Ok(s),
        Err(RotaError::SettingsNotFound(p)) => anyhow::bail!(
            "configuration file not found: {}\n\
             Please create a config.json file or specify a different path with --config",
            p.display()
        ),
        Err(e @ RotaError::InvalidSettings(_)) => anyhow::bail!(
            "invalid configuration: {e}\nPlease check your config file format and required fields"
        ),
        Err(e) => Err(e).context("failed to load configuration"),
    }
}
