use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use expense_tracker::command_executor::{Command, CommandExecutor, ExecutionContext};
use expense_tracker::config::{CliArgs, Config, LoggingConfig};
use expense_tracker::expense_store::ExpenseStore;
use expense_tracker::json_storage::JsonFileStorage;

fn main() {
    let cli = match CliArgs::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let config = Config::load(&cli);
    init_tracing(&config.logging);

    let backend = Arc::new(JsonFileStorage::new(&config.storage.path));
    let exec = CommandExecutor::new(ExpenseStore::new(backend));
    let mut context = ExecutionContext::new(ExecutionContext::local_today(), config.storage.delete_mode);

    let command = Command::from(cli.command);
    tracing::debug!(?command, path = %config.storage.path, "Running command");
    let result = exec.execute(&mut context, &command);

    for warning in &context.warnings {
        println!("{}", warning);
    }
    match result {
        Ok(report) => println!("{}", report),
        Err(e) => println!("{}", e),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
