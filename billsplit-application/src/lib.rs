#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod validation;
pub mod workspace_processor;

pub use error::{LedgerSourceError, LedgerValidationError, WorkspaceError};
pub use model::{
    BillRecord, BillType, LedgerDocument, MemberStatsView, TransferView, WorkspaceReport,
};
pub use ports::LedgerSource;
pub use validation::{MAX_LEDGER_TOTAL, validate_ledger};
pub use workspace_processor::WorkspaceProcessor;
