use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront-ui")]
#[command(about = "Storefront page helpers: formatting, validation, masking and requests")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, short, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Format an amount as locale currency
    Currency {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Format a date or datetime as a locale date; integers longer than four
    /// digits are read as epoch milliseconds
    Date { input: String },
    /// Apply the phone mask to raw text
    MaskPhone { text: String },
    /// Check an e-mail address shape
    CheckEmail { email: String },
    /// Check a masked phone number shape
    CheckPhone { phone: String },
    /// Send a JSON request and print the parsed response
    Fetch {
        url: String,
        #[arg(long, short = 'X', default_value = "GET")]
        method: String,
        /// Extra header as `Name: value`, repeatable
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,
        /// JSON request body
        #[arg(long, short)]
        data: Option<String>,
    },
    /// Validate the configuration file and print the effective settings
    CheckConfig,
}
