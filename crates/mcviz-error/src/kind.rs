//! Error kinds for mcviz operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to decide how to react; the load dispatcher is
/// the only place that inspects it to continue after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Invalid configuration value or missing required option
    ConfigInvalid,

    /// Option name not declared by the style or tool
    UnknownOption,

    /// No tool registered under the requested name
    UnknownTool,

    /// No layout registered under the requested name
    UnknownLayout,

    /// No style registered under the requested name
    UnknownStyle,

    // =========================================================================
    // Load errors
    // =========================================================================
    /// Input does not match the format a loader expects
    ParseFailed,

    /// Loader output references vertices that do not exist
    DanglingReference,

    /// Every loader rejected the input
    NoLoaderSucceeded,

    // =========================================================================
    // Read errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// Any other failure to read the source
    ReadFailed,

    // =========================================================================
    // Pipeline errors
    // =========================================================================
    /// A tool found the graph in a shape it cannot operate on
    ToolPrecondition,

    /// A layout could not place every entity
    LayoutDegenerate,

    /// An edge reached the renderer without the attributes it needs
    StyleIncomplete,

    /// Output serialization failed
    SerializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether the load dispatcher may move on to the next loader.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorKind::ParseFailed | ErrorKind::DanglingReference)
    }

    /// Whether the source could not be read at all.
    pub fn is_read_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::FileNotFound | ErrorKind::PermissionDenied | ErrorKind::ReadFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::ParseFailed.to_string(), "ParseFailed");
        assert_eq!(ErrorKind::LayoutDegenerate.as_str(), "LayoutDegenerate");
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(ErrorKind::ParseFailed.is_recoverable());
        assert!(ErrorKind::DanglingReference.is_recoverable());
        assert!(!ErrorKind::FileNotFound.is_recoverable());
        assert!(!ErrorKind::NoLoaderSucceeded.is_recoverable());
    }

    #[test]
    fn test_read_error_kinds() {
        assert!(ErrorKind::FileNotFound.is_read_error());
        assert!(ErrorKind::ReadFailed.is_read_error());
        assert!(!ErrorKind::ParseFailed.is_read_error());
    }
}
