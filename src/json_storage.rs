use std::{ffi::OsString, fs, io::ErrorKind, path::{Path, PathBuf}};

use expense_core::storage::{StorageBackend, StorageError};

/// File-backed store. Writes go to `<path>.tmp` first and are renamed over
/// the target, so the file is always either the old or the new version.
pub struct JsonFileStorage {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tmp: OsString = path.clone().into_os_string();
        tmp.push(".tmp");
        Self {
            path,
            tmp_path: PathBuf::from(tmp),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(e)),
        }
    }

    fn create(&self) -> Result<(), StorageError> {
        fs::File::create(&self.path).map_err(StorageError::CreateFailed)?;
        Ok(())
    }

    fn write(&self, data: &[u8]) -> Result<(), StorageError> {
        fs::write(&self.tmp_path, data).map_err(StorageError::WriteFailed)?;

        if let Err(e) = fs::rename(&self.tmp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&self.tmp_path) {
                tracing::warn!(path = %self.tmp_path.display(), error = %cleanup, "Could not remove temporary file");
            }
            return Err(StorageError::WriteFailed(e));
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("expenses.json"));
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn create_then_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        let storage = JsonFileStorage::new(&path);

        storage.create().unwrap();
        assert!(path.exists());
        assert_eq!(storage.read().unwrap(), Some(Vec::new()));

        storage.write(b"[]").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"[]");
        assert!(!dir.path().join("expenses.json.tmp").exists());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("missing").join("expenses.json"));
        assert!(matches!(storage.write(b"[]"), Err(StorageError::WriteFailed(_))));
        assert!(matches!(storage.create(), Err(StorageError::CreateFailed(_))));
    }

    #[test]
    fn directory_path_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        assert!(matches!(storage.read(), Err(StorageError::ReadFailed(_))));
    }
}
