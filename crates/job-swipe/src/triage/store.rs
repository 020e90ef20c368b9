use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::domain::TriageDecision;

/// Opaque persistence for the triage ledger: loaded once at start, saved on change.
pub trait LedgerStore: Send + Sync {
    fn load(&self) -> Result<Vec<TriageDecision>, StoreError>;
    fn save(&self, decisions: &[TriageDecision]) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ledger store unavailable: {0}")]
    Unavailable(String),
    #[error("ledger data is corrupt: {0}")]
    Corrupt(String),
    #[error("ledger store io error: {0}")]
    Io(#[from] io::Error),
}

/// Process-local store; the default when no ledger path is configured.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedgerStore {
    decisions: Arc<Mutex<Vec<TriageDecision>>>,
}

impl MemoryLedgerStore {
    pub fn with_decisions(decisions: Vec<TriageDecision>) -> Self {
        Self {
            decisions: Arc::new(Mutex::new(decisions)),
        }
    }

    /// Snapshot of the last saved state.
    pub fn saved(&self) -> Vec<TriageDecision> {
        self.decisions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> Result<Vec<TriageDecision>, StoreError> {
        let guard = self
            .decisions
            .lock()
            .map_err(|_| StoreError::Unavailable("ledger mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, decisions: &[TriageDecision]) -> Result<(), StoreError> {
        let mut guard = self
            .decisions
            .lock()
            .map_err(|_| StoreError::Unavailable("ledger mutex poisoned".to_string()))?;
        *guard = decisions.to_vec();
        Ok(())
    }
}

/// Whole-file JSON store. A missing file loads as an empty ledger.
#[derive(Debug, Clone)]
pub struct JsonFileLedgerStore {
    path: PathBuf,
}

impl JsonFileLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileLedgerStore {
    fn load(&self) -> Result<Vec<TriageDecision>, StoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_reader(BufReader::new(file))
            .map_err(|err| StoreError::Corrupt(format!("{}: {err}", self.path.display())))
    }

    fn save(&self, decisions: &[TriageDecision]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let staging = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(fs::File::create(&staging)?);
            serde_json::to_writer_pretty(&mut writer, decisions)
                .map_err(|err| StoreError::Unavailable(err.to_string()))?;
            writer.flush()?;
        }
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
