use crate::{error::LedgerSourceError, model::LedgerDocument};

/// Storage backend that yields one workspace's roster and bills.
pub trait LedgerSource: Send + Sync {
    fn load(&self) -> Result<LedgerDocument, LedgerSourceError>;
}

impl LedgerSource for LedgerDocument {
    fn load(&self) -> Result<LedgerDocument, LedgerSourceError> {
        Ok(self.clone())
    }
}
