use std::fmt::Display;

use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description, Date, Month};

pub mod write;

/// On-disk date layout, e.g. `2024-01-05`.
pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: i64,
}

impl Expense {
    pub fn new(id: i64, date: Date, description: impl Into<String>, amount: i64) -> Self {
        Self {
            id,
            date: date.to_string(),
            description: description.into(),
            amount,
        }
    }

    /// The record date, or `None` when the stored text is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<Date> {
        Date::parse(&self.date, DATE_FORMAT).ok()
    }
}

/// How `delete --id N` picks the record to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Remove the element at 1-based position N, provided some record carries id N.
    #[default]
    Position,
    /// Remove the first record whose `id` field is N.
    Id,
}

/// Outcome of a single command, rendered for the terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Added(Expense),
    Listing(Vec<Expense>),
    Total { month: Option<Month>, total: i64 },
    Deleted(i64),
    NoExpenses,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Report::Added(expense) => write!(f, "Expense added: {} - ${}", expense.description, expense.amount),
            Report::Listing(expenses) => {
                let mut table = Table::new();
                table.add_row(row!["ID", "Date", "Description", "Amount"]);

                for item in expenses {
                    table.add_row(row![item.id, item.date, item.description, format!("${}", item.amount)]);
                }

                f.write_str(table.to_string().trim_end())
            },
            Report::Total { month: Some(month), total } => write!(f, "Total expenses for month {}: ${}", month, total),
            Report::Total { month: None, total } => write!(f, "Total expenses: ${}", total),
            Report::Deleted(id) => write!(f, "Expense with ID {} deleted successfully.", id),
            Report::NoExpenses => f.write_str("No expenses found."),
        }
    }
}
