use std::{fs, path::PathBuf};

use billsplit_application::{LedgerDocument, LedgerSource, LedgerSourceError};

/// Ledger stored as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonLedgerFile {
    path: PathBuf,
}

impl JsonLedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LedgerSource for JsonLedgerFile {
    fn load(&self) -> Result<LedgerDocument, LedgerSourceError> {
        let content =
            fs::read_to_string(&self.path).map_err(|err| LedgerSourceError::Unavailable {
                location: self.path.display().to_string(),
                reason: err.to_string(),
            })?;
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "Ledger file read");
        LedgerDocument::from_json(&content)
    }
}
