//! CLI for fetching Node.js source tarballs.

mod commands;
mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nodesrc_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_download, run_extract, run_fetch, run_url};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "nodesrc")]
#[command(about = "Download and unpack a Node.js source tarball", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the source tarball, extract it into the current directory, then delete it.
    Fetch {
        /// Release tag such as v21.7.3 (overrides RUST_NODE_VERSION and the config file).
        #[arg(long, value_name = "VERSION")]
        node_version: Option<String>,
    },

    /// Download the source tarball into the current directory and keep it.
    Download {
        /// Release tag such as v21.7.3.
        #[arg(long, value_name = "VERSION")]
        node_version: Option<String>,
    },

    /// Extract an existing .tar.gz into the current directory (the archive is kept).
    Extract {
        /// Path to the archive.
        archive: PathBuf,
    },

    /// Print the download URL for a release.
    Url {
        /// Release tag such as v21.7.3.
        #[arg(long, value_name = "VERSION")]
        node_version: Option<String>,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        cli.command.dispatch()
    }

    fn dispatch(self) -> Result<()> {
        // completions must work without touching the config dir
        if let CliCommand::Completions { shell } = self {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let work_dir = std::env::current_dir()?;

        match self {
            CliCommand::Fetch { node_version } => {
                let version = cfg.resolve_version(node_version.as_deref());
                run_fetch(&cfg, &version, &work_dir)?;
            }
            CliCommand::Download { node_version } => {
                let version = cfg.resolve_version(node_version.as_deref());
                run_download(&cfg, &version, &work_dir)?;
            }
            CliCommand::Extract { archive } => run_extract(&cfg, &archive, &work_dir)?,
            CliCommand::Url { node_version } => {
                let version = cfg.resolve_version(node_version.as_deref());
                run_url(&cfg, &version)?;
            }
            CliCommand::Completions { .. } => unreachable!("handled above"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
