pub mod command_executor;
pub mod config;
pub mod expense_store;
pub mod json_storage;
pub mod storage;

pub use expense_core::{
    AddExpenseCommand, DeleteExpenseCommand, DeleteMode, Expense, Report, SummaryQuery,
};
