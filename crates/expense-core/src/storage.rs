use crate::models::Expense;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Error reading expenses file: {0}")]
    ReadFailed(std::io::Error),
    #[error("Error creating expenses file: {0}")]
    CreateFailed(std::io::Error),
    #[error("Error writing expenses to file: {0}")]
    WriteFailed(std::io::Error),
    #[error("Error parsing expenses JSON: {0}")]
    Parse(serde_json::Error),
    #[error("Error marshalling expenses to JSON: {0}")]
    Serialize(serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// A place the whole expense list is read from and written back to, as bytes.
pub trait StorageBackend: Send + Sync {
    /// `Ok(None)` when nothing has been persisted yet.
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError>;
    /// Materialize an empty store so the next read finds it.
    fn create(&self) -> Result<(), StorageError>;
    /// Replace the persisted content; a failed write leaves the old content intact.
    fn write(&self, data: &[u8]) -> Result<(), StorageError>;
    fn location(&self) -> String;
}

/// Empty content and a JSON `null` both decode to no records.
pub fn decode_expenses(data: &[u8]) -> Result<Vec<Expense>, StorageError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let expenses: Option<Vec<Expense>> = serde_json::from_slice(data).map_err(StorageError::Parse)?;
    Ok(expenses.unwrap_or_default())
}

/// Pretty-printed with two-space indentation.
pub fn encode_expenses(expenses: &[Expense]) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec_pretty(expenses).map_err(StorageError::Serialize)
}
