use clap::{Parser, Subcommand};
use serde::Deserialize;

use expense_core::{AddExpenseCommand, DeleteExpenseCommand, DeleteMode};

use crate::command_executor::Command;

#[derive(Parser, Debug)]
#[command(name = "expense-tracker", about = "Personal expense tracker backed by a local JSON file")]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long, default_value = "expense-tracker.toml", global = true)]
    pub config: String,

    /// Expenses file (overrides config file)
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Log level (overrides config file)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Record a new expense dated today
    Add {
        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Show every expense
    List,
    /// Total of all expenses, or of one month (1-12)
    Summary {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        month: i64,
    },
    /// Remove an expense
    Delete {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        id: i64,
    },
}

impl From<CliCommand> for Command {
    fn from(value: CliCommand) -> Self {
        match value {
            CliCommand::Add { description, amount } => Command::Add(AddExpenseCommand { description, amount }),
            CliCommand::List => Command::List,
            CliCommand::Summary { month } => Command::Summary { month },
            CliCommand::Delete { id } => Command::Delete(DeleteExpenseCommand { id }),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_storage")]
    pub storage: StorageConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default)]
    pub delete_mode: DeleteMode,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable logs.
    #[serde(default)]
    pub json: bool,
}

fn default_storage() -> StorageConfig {
    StorageConfig {
        path: default_path(),
        delete_mode: DeleteMode::default(),
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        json: false,
    }
}

fn default_path() -> String {
    "expenses.json".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: default_storage(),
            logging: default_logging(),
        }
    }
}

impl Config {
    pub fn load(cli: &CliArgs) -> Self {
        let mut config = match std::fs::read_to_string(&cli.config) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Config::default(),
        };

        // CLI overrides
        if let Some(ref file) = cli.file {
            config.storage.path = file.clone();
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }

        config
    }

    /// Malformed config falls back to defaults with a warning on stderr.
    pub fn parse(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse config file: {}", e);
            Config::default()
        })
    }
}
