//! Tests for fetch and download subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_fetch() {
    match parse(&["nodesrc", "fetch"]) {
        CliCommand::Fetch { node_version } => assert!(node_version.is_none()),
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_node_version() {
    match parse(&["nodesrc", "fetch", "--node-version", "v20.11.1"]) {
        CliCommand::Fetch { node_version } => {
            assert_eq!(node_version.as_deref(), Some("v20.11.1"))
        }
        _ => panic!("expected Fetch with --node-version"),
    }
}

#[test]
fn cli_parse_download() {
    match parse(&["nodesrc", "download", "--node-version=v18.20.4"]) {
        CliCommand::Download { node_version } => {
            assert_eq!(node_version.as_deref(), Some("v18.20.4"))
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_rejects_destination_flag() {
    // extraction always targets the working directory
    assert!(Cli::try_parse_from(["nodesrc", "fetch", "--dest", "/tmp"]).is_err());
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["nodesrc"]).is_err());
}
