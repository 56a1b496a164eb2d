use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::config::StorageParameters;
use crate::manager_storage::Store;

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Database file in the temp dir, removed when dropped
pub struct TempDb {
    pub path: PathBuf,
}

impl TempDb {
    pub fn new() -> TempDb {
        let n = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir()
            .join(format!("aquaprediksi-test-{}-{}.db", std::process::id(), n));
        let _ = std::fs::remove_file(&path);

        TempDb { path }
    }

    pub fn params(&self) -> StorageParameters {
        StorageParameters { db_path: self.path.to_string_lossy().to_string() }
    }

    pub fn store(&self) -> Store {
        Store::new(&self.params())
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
