//! Core types and traits for expense-tracker storage backends.
//!
//! This crate provides the `StorageBackend` trait, the persisted JSON codec
//! and the record/report types shared by every backend.

pub mod models;
pub mod storage;

// Re-export key types at crate root for convenience
pub use models::{Expense, Report, DeleteMode, DATE_FORMAT};
pub use models::write::{AddExpenseCommand, DeleteExpenseCommand, SummaryQuery};
pub use storage::{StorageBackend, StorageError, decode_expenses, encode_expenses};
