use std::sync::Arc;

use expense_core::Expense;

use crate::storage::{StorageBackend, StorageError, decode_expenses, encode_expenses};

/// Loads the full expense list from a backend and writes it back whole.
#[derive(Clone)]
pub struct ExpenseStore {
    backend: Arc<dyn StorageBackend>,
}

impl ExpenseStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
        }
    }

    /// An absent store is created empty and yields no records.
    pub fn load(&self) -> Result<Vec<Expense>, StorageError> {
        self.load_or_create().map(|(expenses, _)| expenses)
    }

    /// Like `load`, also telling whether the store had to be created.
    pub fn load_or_create(&self) -> Result<(Vec<Expense>, bool), StorageError> {
        let data = match self.backend.read()? {
            Some(data) => data,
            None => {
                self.backend.create()?;
                tracing::info!(location = %self.backend.location(), "Expenses file not found, created an empty one");
                return Ok((Vec::new(), true));
            },
        };

        let expenses = decode_expenses(&data)?;
        tracing::debug!(location = %self.backend.location(), count = expenses.len(), "Expenses loaded");
        Ok((expenses, false))
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    pub fn save(&self, expenses: &[Expense]) -> Result<(), StorageError> {
        let data = encode_expenses(expenses)?;
        self.backend.write(&data)?;
        tracing::debug!(location = %self.backend.location(), count = expenses.len(), bytes = data.len(), "Expenses saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::storage::InMemoryStorage;

    #[test]
    fn load_creates_missing_store() {
        let backend = Arc::new(InMemoryStorage::new());
        let store = ExpenseStore::new(backend.clone());

        assert_eq!(store.load_or_create().unwrap(), (Vec::new(), true));
        assert_eq!(backend.contents(), Some(Vec::new()));
        assert_eq!(backend.write_count(), 0);
        assert_eq!(store.load_or_create().unwrap(), (Vec::new(), false));
    }

    #[test]
    fn load_reports_parse_error() {
        let store = ExpenseStore::new(Arc::new(InMemoryStorage::with_content("{broken")));
        assert!(matches!(store.load(), Err(StorageError::Parse(_))));
    }

    #[test]
    fn save_then_load() {
        let store = ExpenseStore::new(Arc::new(InMemoryStorage::new()));
        let expenses = vec![
            Expense::new(1, date!(2024 - 01 - 05), "Coffee", 5),
            Expense::new(2, date!(2024 - 01 - 06), "Lunch", 12),
        ];

        store.save(&expenses).unwrap();
        assert_eq!(store.load().unwrap(), expenses);
    }
}
