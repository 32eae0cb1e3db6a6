//! Error status for the loader fallback chain

use std::fmt;

use crate::ErrorKind;

/// Whether an error may be absorbed by the fallback chain.
///
/// - `Recoverable`: the load dispatcher logs it and tries the next loader
/// - `Fatal`: the pipeline aborts; no partial diagram is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorStatus {
    /// Input did not match one loader's format.
    Recoverable,

    /// Everything else.
    #[default]
    Fatal,
}

impl ErrorStatus {
    pub fn of(kind: ErrorKind) -> Self {
        if kind.is_recoverable() {
            ErrorStatus::Recoverable
        } else {
            ErrorStatus::Fatal
        }
    }

    /// Check if the fallback chain may continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorStatus::Recoverable)
    }

    /// Escalate to fatal, e.g. once the last loader has failed
    pub fn escalate(self) -> Self {
        ErrorStatus::Fatal
    }

    /// Get status as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::Recoverable => "recoverable",
            ErrorStatus::Fatal => "fatal",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
