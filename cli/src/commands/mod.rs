pub mod config;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "ksail",
    author,
    version,
    about = "ksail - validate and inspect cluster configuration",
    long_about = "Reads ksail.yaml and the distribution config it points at (Kind, K3d or \
                  EKS).\n\nConfig files are searched for in the working directory and its \
                  parents; a missing file means defaults."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the top-level ksail config
    #[arg(
        long,
        short,
        global = true,
        env = "KSAIL_CONFIG",
        default_value = apis::ksail::CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Validate ksail.yaml and its distribution config")]
    Validate(validate::ValidateArgs),

    #[command(about = "Print the effective configuration after defaults")]
    Config(config::ConfigArgs)
}
