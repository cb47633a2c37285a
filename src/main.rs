use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use composer_version::config::{Config, log_path};
use composer_version::manifest::{Source, stamp_manifest};
use composer_version::sync::{LineRefSource, sync_source};
use composer_version::version::{
    derive_version, normalise_version, normalize_branch, parse_numeric_alias_prefix,
};

#[derive(Parser)]
#[command(name = "composer-version")]
#[command(version, about = "Derive Composer versions from git tags and branches")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive the version of a tag or branch
    Derive {
        name: String,
        /// Treat NAME as a branch instead of a tag
        #[arg(long)]
        branch: bool,
        #[arg(long)]
        json: bool,
    },
    /// Normalize a version expression
    Normalize {
        version: String,
        /// Expression reported in error messages
        #[arg(long, default_value = "")]
        full_version: String,
    },
    /// Normalize a branch name
    Branch { name: String },
    /// Print the numeric prefix of a dev branch alias
    AliasPrefix { branch: String },
    /// Derive versions for full ref names read from stdin
    Batch {
        #[arg(long)]
        json: bool,
    },
    /// Derive a version and write it into DIR/composer.json
    Stamp {
        dir: PathBuf,
        name: String,
        #[arg(long)]
        branch: bool,
        /// Repository url recorded as the package source
        #[arg(long, requires = "reference")]
        source_url: Option<String>,
        /// Commit recorded as the package source
        #[arg(long, requires = "source_url")]
        reference: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let log_file = cli.log_file.then(log_path);
    let _guard = composer_version::logging::init(&config.log, log_file.as_deref())?;

    match cli.command {
        Command::Derive { name, branch, json } => {
            let derived = derive_version(&name, branch, config.derive)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&derived)?);
            } else {
                println!("{}\t{}", derived.version, derived.normalized);
            }
        }
        Command::Normalize {
            version,
            full_version,
        } => println!("{}", normalise_version(&version, &full_version)?),
        Command::Branch { name } => println!("{}", normalize_branch(&name)),
        Command::AliasPrefix { branch } => println!("{}", parse_numeric_alias_prefix(&branch)),
        Command::Batch { json } => {
            let source = LineRefSource::read(io::stdin().lock())
                .context("failed to read references from stdin")?;
            let report = sync_source(&source, config.derive)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for entry in &report.derived {
                    println!(
                        "{}\t{}\t{}",
                        entry.git_ref.name, entry.derived.version, entry.derived.normalized
                    );
                }
                for entry in &report.skipped {
                    eprintln!("skipped {}: {}", entry.git_ref, entry.reason);
                }
            }
        }
        Command::Stamp {
            dir,
            name,
            branch,
            source_url,
            reference,
        } => {
            let derived = derive_version(&name, branch, config.derive)?;
            let source = source_url
                .zip(reference)
                .map(|(url, reference)| Source::git(url, reference));

            stamp_manifest(&dir, &derived, source.as_ref(), config.manifest.indent)?;
            println!("{}\t{}", derived.version, derived.normalized);
        }
    }

    Ok(())
}
