use std::sync::{RwLock, atomic::{AtomicBool, AtomicU64, Ordering}};

// Re-export core storage types so callers can use crate::storage::*
pub use expense_core::storage::{StorageBackend, StorageError, decode_expenses, encode_expenses};

/// Keeps the persisted bytes in memory; nothing survives the process.
pub struct InMemoryStorage {
    data: RwLock<Option<Vec<u8>>>,
    write_count: AtomicU64,
    fail_writes: AtomicBool,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(None),
            write_count: AtomicU64::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn with_content(content: impl Into<Vec<u8>>) -> Self {
        let storage = Self::new();
        if let Ok(mut data) = storage.data.write() {
            *data = Some(content.into());
        }
        storage
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.read().ok().and_then(|d| d.clone())
    }

    /// Number of successful `write` calls; `create` is not counted.
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StorageBackend for InMemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        let data = self.data.read()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        Ok(data.clone())
    }

    fn create(&self) -> Result<(), StorageError> {
        let mut data = self.data.write()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        *data = Some(Vec::new());
        Ok(())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed(std::io::Error::new(std::io::ErrorKind::Other, "write rejected")));
        }
        let mut data = self.data.write()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        *data = Some(bytes.to_vec());
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_absent() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.read().unwrap(), None);
        storage.create().unwrap();
        assert_eq!(storage.read().unwrap(), Some(Vec::new()));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn failed_write_keeps_previous_content() {
        let storage = InMemoryStorage::with_content("[]");
        storage.set_fail_writes(true);
        assert!(matches!(storage.write(b"[1]"), Err(StorageError::WriteFailed(_))));
        assert_eq!(storage.contents(), Some(b"[]".to_vec()));
        assert_eq!(storage.write_count(), 0);
    }
}
