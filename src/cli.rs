use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "storinfo")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Query total, free and used capacity of a storage volume", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show capacity of the volume backing a path
    Info(InfoArgs),

    /// Dispatch a single method call and print the JSON response
    Call(CallArgs),

    /// Answer JSON method calls line by line on stdin/stdout
    Serve,

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, clap::Args)]
pub struct InfoArgs {
    /// Path on the volume to query (defaults to the configured root)
    pub path: Option<PathBuf>,

    /// Print the raw {total, free, used} mapping as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct CallArgs {
    /// Method name (e.g. getStorageInfo)
    pub method: String,

    /// Optional path argument passed with the call
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
