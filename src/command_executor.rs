use thiserror::Error;
use time::{Date, Month, OffsetDateTime};

use expense_core::{
    AddExpenseCommand, DeleteExpenseCommand, DeleteMode, Expense, Report, SummaryQuery,
};

use crate::{expense_store::ExpenseStore, storage::StorageError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Expense with ID {0} not found.")]
    NotFound(i64),
    #[error("{0}. Refusing to overwrite the expenses file.")]
    UnreadableStore(StorageError),
    #[error("Total expenses exceed the supported amount range.")]
    TotalOverflow,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddExpenseCommand),
    List,
    /// Raw month number; 0 means every month.
    Summary { month: i64 },
    Delete(DeleteExpenseCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionContext {
    pub today: Date,
    pub delete_mode: DeleteMode,
    /// Notices and problems that did not stop the command, in the order they happened.
    pub warnings: Vec<String>,
}

impl ExecutionContext {
    pub fn new(today: Date, delete_mode: DeleteMode) -> Self {
        Self {
            today,
            delete_mode,
            warnings: Vec::new(),
        }
    }

    /// Local calendar date, falling back to UTC when the offset is unknown.
    pub fn local_today() -> Date {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
    }
}

pub struct CommandExecutor {
    store: ExpenseStore,
}

impl CommandExecutor {
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store,
        }
    }

    pub fn execute(&self, context: &mut ExecutionContext, command: &Command) -> Result<Report, CommandError> {
        match command {
            Command::Add(c) => self.add(context, c),
            Command::List => self.list(context),
            Command::Summary { month } => {
                let query = summary_query(*month)?;
                self.summary(context, &query)
            },
            Command::Delete(c) => self.delete(context, c),
        }
    }

    pub fn add(&self, context: &mut ExecutionContext, command: &AddExpenseCommand) -> Result<Report, CommandError> {
        if command.description.is_empty() || command.amount <= 0 {
            return Err(CommandError::InvalidInput("Please provide valid description and amount for the expense.".to_string()));
        }

        let mut expenses = match self.store.load_or_create() {
            Ok((expenses, created)) => {
                if created {
                    context.warnings.push(created_notice(&self.store));
                }
                expenses
            },
            Err(e @ StorageError::Parse(_)) => return Err(CommandError::UnreadableStore(e)),
            Err(e) => return Err(e.into()),
        };

        let expense = Expense::new(expenses.len() as i64 + 1, context.today, command.description.clone(), command.amount);
        expenses.push(expense.clone());
        self.store.save(&expenses)?;

        tracing::debug!(id = expense.id, amount = expense.amount, "Expense added");
        Ok(Report::Added(expense))
    }

    pub fn list(&self, context: &mut ExecutionContext) -> Result<Report, CommandError> {
        let expenses = self.load_or_empty(context)?;
        if expenses.is_empty() {
            return Ok(Report::NoExpenses);
        }
        Ok(Report::Listing(expenses))
    }

    pub fn summary(&self, context: &mut ExecutionContext, query: &SummaryQuery) -> Result<Report, CommandError> {
        let expenses = self.load_or_empty(context)?;
        if expenses.is_empty() {
            return Ok(Report::NoExpenses);
        }

        let total = expenses.iter()
            .filter(|e| match query.month {
                None => true,
                Some(month) => match e.parsed_date() {
                    Some(date) => date.month() == month,
                    None => {
                        tracing::warn!(id = e.id, date = %e.date, "Skipping expense with unparseable date");
                        false
                    },
                },
            })
            .try_fold(0i64, |acc, e| acc.checked_add(e.amount))
            .ok_or(CommandError::TotalOverflow)?;

        Ok(Report::Total { month: query.month, total })
    }

    pub fn delete(&self, context: &mut ExecutionContext, command: &DeleteExpenseCommand) -> Result<Report, CommandError> {
        if command.id <= 0 {
            return Err(CommandError::InvalidInput("Please provide a valid ID for the expense to delete.".to_string()));
        }

        let mut expenses = self.load_or_empty(context)?;
        if expenses.is_empty() {
            return Ok(Report::NoExpenses);
        }

        let index = match context.delete_mode {
            DeleteMode::Position => usize::try_from(command.id - 1)
                .ok()
                .filter(|i| *i < expenses.len() && expenses.iter().any(|e| e.id == command.id)),
            DeleteMode::Id => expenses.iter().position(|e| e.id == command.id),
        };

        let index = index.ok_or(CommandError::NotFound(command.id))?;
        let removed = expenses.remove(index);
        self.store.save(&expenses)?;

        tracing::debug!(id = command.id, removed_id = removed.id, position = index + 1, "Expense deleted");
        Ok(Report::Deleted(command.id))
    }

    /// A file that does not parse is reported and read as empty; nothing is written back.
    fn load_or_empty(&self, context: &mut ExecutionContext) -> Result<Vec<Expense>, CommandError> {
        match self.store.load_or_create() {
            Ok((expenses, created)) => {
                if created {
                    context.warnings.push(created_notice(&self.store));
                }
                Ok(expenses)
            },
            Err(e @ StorageError::Parse(_)) => {
                tracing::warn!(error = %e, "Expenses file could not be parsed, continuing with no records");
                context.warnings.push(e.to_string());
                Ok(Vec::new())
            },
            Err(e) => Err(e.into()),
        }
    }
}

fn created_notice(store: &ExpenseStore) -> String {
    format!("Expenses file not found, created an empty one at {}", store.location())
}

/// Month 0 selects every record; 1-12 select one calendar month.
pub fn summary_query(month: i64) -> Result<SummaryQuery, CommandError> {
    if month == 0 {
        return Ok(SummaryQuery { month: None });
    }

    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| SummaryQuery { month: Some(m) })
        .ok_or_else(|| CommandError::InvalidInput("Please provide a valid month (1-12).".to_string()))
}
