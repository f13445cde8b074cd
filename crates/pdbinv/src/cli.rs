//! Clap derive structures for the `pdbinv` CLI.
//!
//! Ansible invokes dynamic inventory scripts with `--list` or
//! `--host <name>`; `--clear` and `--build` manage the cached inventory.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

/// pdbinv -- Ansible dynamic inventory from PuppetDB
#[derive(Debug, Parser)]
#[command(
    name = "pdbinv",
    version,
    about = "Ansible dynamic inventory built from PuppetDB facts",
    long_about = "Queries one or more PuppetDB servers for the fqdn and ipaddress facts,\n\
        joins them per node, and prints an Ansible inventory document.\n\n\
        With no action flag, behaves as --list. Actions run in the order\n\
        list, host, clear, build."
)]
pub struct Cli {
    /// Print the inventory (default action)
    #[arg(long)]
    pub list: bool,

    /// Print variables for one host (always `{}`; variables ship in `_meta`)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Delete the cached inventory
    #[arg(long)]
    pub clear: bool,

    /// Regenerate the cached inventory
    #[arg(long)]
    pub build: bool,

    /// Configuration file
    #[arg(long, short = 'c', env = "PDBINV_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv); logs go to stderr
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// `--list` was given, or no other action was.
    pub fn wants_list(&self) -> bool {
        self.list || (self.host.is_none() && !self.clear && !self.build)
    }

    /// Any requested action reads or writes the inventory cache.
    pub fn touches_cache(&self) -> bool {
        self.wants_list() || self.clear || self.build
    }
}
