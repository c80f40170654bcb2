mod logging;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, warn};

use lockfile_diff::Registries;
use lockfile_diff::config::Config;
use lockfile_diff::git;
use lockfile_diff::io::Source;
use lockfile_diff::lockfile::{DiffFilter, LockfileInfo, parse_lockfile};
use lockfile_diff::output::Report;
use lockfile_diff::parser::ParseError;
use lockfile_diff::registries::FORMAT_TRAIT;

#[derive(Parser)]
#[command(name = "lockfile-diff")]
#[command(
    version,
    about = "Compare two lockfiles and report added, removed, upgraded and downgraded packages"
)]
struct Cli {
    /// Old lockfile
    #[arg(long, visible_alias = "old-lockfile", value_name = "LOCKFILE")]
    old: Option<PathBuf>,

    /// New lockfile
    #[arg(long, visible_alias = "new-lockfile", value_name = "LOCKFILE")]
    new: Option<PathBuf>,

    /// Git commit, tag or branch to read the missing side from (see gitrevisions(7))
    #[arg(long, value_name = "COMMIT")]
    compare: Option<String>,

    /// Parse lockfiles using SCHEMA [default: auto-detect]
    #[arg(long, value_name = "SCHEMA")]
    lockfile_schema: Option<String>,

    /// Print the diff using FORMAT (text, json, yaml) [default: text]
    #[arg(long, value_name = "FORMAT")]
    output_format: Option<String>,

    /// Report unchanged packages
    #[arg(long, overrides_with = "no_unchanged")]
    unchanged: bool,
    #[arg(long, overrides_with = "unchanged")]
    no_unchanged: bool,

    /// Report upgraded and downgraded packages
    #[arg(long, overrides_with = "no_changed")]
    changed: bool,
    #[arg(long, overrides_with = "changed")]
    no_changed: bool,

    /// Report added packages
    #[arg(long, overrides_with = "no_added")]
    added: bool,
    #[arg(long, overrides_with = "added")]
    no_added: bool,

    /// Report removed packages
    #[arg(long, overrides_with = "no_removed")]
    removed: bool,
    #[arg(long, overrides_with = "removed")]
    no_removed: bool,

    /// Exit quietly when auto-detection finds no matching schema
    #[arg(long)]
    no_fail: bool,

    /// Disable colours in text output
    #[arg(long)]
    no_color: bool,

    /// Config file [default: $XDG_CONFIG_HOME/lockfile-diff/config.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write JSON logs to PATH instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn filter(&self, defaults: DiffFilter) -> DiffFilter {
        DiffFilter {
            unchanged: flag(self.unchanged, self.no_unchanged, defaults.unchanged),
            changed: flag(self.changed, self.no_changed, defaults.changed),
            added: flag(self.added, self.no_added, defaults.added),
            removed: flag(self.removed, self.no_removed, defaults.removed),
        }
    }
}

fn flag(on: bool, off: bool, default: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

/// One side of the comparison
struct Input {
    label: String,
    source: Box<dyn Source>,
}

impl Input {
    fn file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open lockfile {}", path.display()))?;
        Ok(Self {
            label: path.display().to_string(),
            source: Box::new(BufReader::new(file)),
        })
    }

    fn git(path: &Path, revision: &str) -> anyhow::Result<Self> {
        Ok(Self {
            label: format!("[git: {}] {}", revision, path.display()),
            source: Box::new(git::show_file(path, revision)?),
        })
    }
}

/// Resolve the old and new inputs, reading the missing side from git
fn open_inputs(cli: &Cli) -> anyhow::Result<(Option<Input>, Input)> {
    let (old, new) = match (&cli.old, &cli.new, &cli.compare) {
        (None, None, _) => bail!("Must provide either --old or --new lockfile"),
        (Some(old), Some(new), _) => (Some(Input::file(old)?), Input::file(new)?),
        (None, Some(new), Some(revision)) => {
            (Some(Input::git(new, revision)?), Input::file(new)?)
        }
        (None, Some(new), None) => (None, Input::file(new)?),
        (Some(old), None, Some(revision)) => {
            (Some(Input::file(old)?), Input::git(old, revision)?)
        }
        (Some(_), None, None) => bail!("--compare is required when --new is not given"),
    };
    Ok((old, new))
}

/// Parse one side; `None` when auto-detection failed and failures are silenced
fn read_info(
    input: &mut Input,
    schema: &str,
    registries: &Registries,
    no_fail: bool,
) -> anyhow::Result<Option<LockfileInfo>> {
    match parse_lockfile(&mut *input.source, schema, registries) {
        Ok(data) => Ok(Some(data.info())),
        Err(e @ ParseError::AutoDetectExhausted { .. }) if no_fail => {
            debug!("Ignoring unrecognised lockfile {}: {}", input.label, e);
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to parse {}", input.label)),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref())?;

    let config = Config::load(cli.config.as_deref())?;
    let schema = cli
        .lockfile_schema
        .as_deref()
        .unwrap_or(&config.lockfile_schema);
    let output_format = cli
        .output_format
        .as_deref()
        .unwrap_or(&config.output_format);
    let colorize = config.color && !cli.no_color;
    if !colorize {
        colored::control::set_override(false);
    }

    let registries = Registries::builtin_with_color(colorize);
    let encoder = registries.encoders.lookup(&[(FORMAT_TRAIT, output_format)])?;

    let (old, mut new) = open_inputs(&cli)?;
    let old = match old {
        Some(mut old) => match read_info(&mut old, schema, &registries, cli.no_fail)? {
            Some(info) => info,
            None => return Ok(()),
        },
        None => {
            warn!("No old lockfile given, reporting every package as added");
            LockfileInfo::default()
        }
    };
    let Some(new) = read_info(&mut new, schema, &registries, cli.no_fail)? else {
        return Ok(());
    };

    let mut diff = new.diff(&old);
    diff.retain(&cli.filter(config.show));
    println!("{}", encoder.encode(Report::Diff(&diff))?);

    Ok(())
}
