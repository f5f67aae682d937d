pub mod commands;

use crate::config::Config;
use crate::debug_log::{self, LogTarget};
use crate::sort::SortMode;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use self::commands::{browse_command, config_command, list_command};

#[derive(Parser, Debug)]
#[command(name = "appsweep")]
#[command(version)]
#[command(about = "Browse installed software, select entries and delete them in one batch")]
#[command(
    long_about = "appsweep lists every installed application with its size on internal and \
    removable storage, lets you tick several of them and deletes the selection in the \
    background while showing progress.\n\n\
    Examples:\n  \
    appsweep --internal /data/apps --removable /media/sd/apps\n  \
    appsweep list --sort name-ascending\n  \
    appsweep list --json\n  \
    appsweep --demo                       # try it on sample data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding applications on internal storage
    #[arg(long, value_name = "DIR", global = true)]
    pub internal: Option<PathBuf>,

    /// Directory holding applications on removable storage
    #[arg(long, value_name = "DIR", global = true)]
    pub removable: Option<PathBuf>,

    /// Use a built-in sample inventory instead of real storage
    #[arg(long, global = true)]
    pub demo: bool,

    /// Write log output to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive list with multi-select delete (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Initial sort order
        #[arg(long, value_enum, value_name = "MODE")]
        sort: Option<SortMode>,
    },

    /// Print installed software without deleting anything
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Sort order
        #[arg(long, value_enum, value_name = "MODE")]
        sort: Option<SortMode>,
    },

    /// Write a config file with the current settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    fn sort(&self) -> Option<SortMode> {
        match self {
            Commands::Browse { sort } | Commands::List { sort, .. } => *sort,
            Commands::InitConfig { .. } => None,
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Where log lines go for `command`. The interactive UI owns the
    /// terminal, so it always logs to a file when one can be found.
    fn log_target(&self, command: &Commands) -> LogTarget {
        match (&self.log_file, command) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Commands::Browse { .. }) => debug_log::default_log_path()
                .map(LogTarget::File)
                .unwrap_or(LogTarget::Stderr),
            (None, _) => LogTarget::Stderr,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let command = self
            .command
            .clone()
            .unwrap_or(Commands::Browse { sort: None });

        debug_log::init(self.verbose, &self.log_target(&command))?;

        let mut config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        config.apply_cli_overrides(self.internal.clone(), self.removable.clone(), command.sort());

        match command {
            Commands::Browse { .. } => browse_command::handle_browse(&config, self.demo),
            Commands::List { json, .. } => list_command::handle_list(&config, self.demo, json),
            Commands::InitConfig { force } => {
                config_command::handle_init_config(&config, self.config.as_deref(), force)
            }
        }
    }
}
