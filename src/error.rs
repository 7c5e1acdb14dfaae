use rust_decimal::Decimal;
use thiserror::Error;

/// Failures surfaced by the ledger core.
///
/// The first three variants are validation outcomes: the operation was
/// rejected and nothing changed. `Persistence` means the backing store could
/// not be read or written and must reach the caller.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("Please set your monthly income first")]
    IncomeNotSet,

    #[error("Enter an amount greater than zero (got {0})")]
    InvalidAmount(Decimal),

    #[error("No recent add to undo")]
    NothingToUndo,

    #[error("Ledger storage failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl LedgerError {
    /// Rejections the user can act on, as opposed to storage faults.
    pub(crate) fn is_validation(&self) -> bool {
        !matches!(self, Self::Persistence(_))
    }

    /// `NothingToUndo` is shown as a warning rather than an error.
    pub(crate) fn is_warning(&self) -> bool {
        matches!(self, Self::NothingToUndo)
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.into())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Persistence(err.into())
    }
}

#[derive(Debug, Error)]
pub(crate) enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("ledger file has no header row")]
    MissingHeader,

    #[error("ledger file is missing the '{column}' column")]
    MissingColumn { column: &'static str },

    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;
