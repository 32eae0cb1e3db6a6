use std::error::Error as StdError;
use std::fmt;

use crate::{ErrorKind, ErrorStatus};

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Every fallible mcviz operation returns this.
///
/// The kind says what failed; the status, derived from the kind unless
/// overridden, says whether the load dispatcher may carry on. Operation and
/// context locate the failure; `source` keeps the underlying error.
pub struct Error {
    kind: ErrorKind,
    status: ErrorStatus,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<BoxedSource>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: ErrorStatus::of(kind),
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Innermost-last operation name; empty when none was recorded.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    pub fn source_ref(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Stop the load dispatcher from falling back past this error.
    pub fn fatal(mut self) -> Self {
        self.status = self.status.escalate();
        self
    }

    /// Record the failing operation. An earlier one is kept in context
    /// under `called`.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        let previous = std::mem::replace(&mut self.operation, operation);
        if !previous.is_empty() {
            self.context.push(("called", previous.to_string()));
        }
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Attach the underlying error. Only one source is kept; setting a
    /// second one is a bug and asserts in debug builds.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "error source set twice");
        self.source = Some(Box::new(source));
        self
    }

    pub fn is_recoverable(&self) -> bool {
        self.status.is_recoverable()
    }

    pub fn is_read_error(&self) -> bool {
        self.kind.is_read_error()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Error {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Input is not in the format a loader reads.
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseFailed, message)
    }

    /// A bad option value, a missing required option, or a malformed
    /// operator spec.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub fn unknown_option(owner: &str, option: impl Into<String>) -> Self {
        let option = option.into();
        Self::new(
            ErrorKind::UnknownOption,
            format!("'{}' has no option '{}'", owner, option),
        )
        .with_context("owner", owner)
        .with_context("option", option)
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::unknown(ErrorKind::UnknownTool, "tool", name.into())
    }

    pub fn unknown_layout(name: impl Into<String>) -> Self {
        Self::unknown(ErrorKind::UnknownLayout, "layout", name.into())
    }

    pub fn unknown_style(name: impl Into<String>) -> Self {
        Self::unknown(ErrorKind::UnknownStyle, "style", name.into())
    }

    fn unknown(kind: ErrorKind, what: &'static str, name: String) -> Self {
        Self::new(kind, format!("no {} named '{}'", what, name)).with_context(what, name)
    }

    /// A particle endpoint names a vertex that does not exist.
    pub fn dangling_reference(particle: impl fmt::Display, vertex: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::DanglingReference,
            format!("particle {} references missing vertex {}", particle, vertex),
        )
        .with_context("particle", particle.to_string())
        .with_context("vertex", vertex.to_string())
    }

    pub fn no_loader_succeeded(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorKind::NoLoaderSucceeded,
            format!("no loader succeeded on '{}'", path),
        )
        .with_context("path", path)
    }

    pub fn tool_precondition(tool: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ToolPrecondition, message).with_operation(tool)
    }

    pub fn layout_degenerate(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LayoutDegenerate, message)
    }

    pub fn style_incomplete(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StyleIncomplete, message)
    }
}

// ============================================================================
// Trait impls
// ============================================================================

/// `Kind[status] in operation: message (key=value, ...)`
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.status)?;
        if !self.operation.is_empty() {
            write!(f, " in {}", self.operation)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        let mut pairs = self.context.iter();
        if let Some((key, value)) = pairs.next() {
            write!(f, " ({}={}", key, value)?;
            for (key, value) in pairs {
                write!(f, ", {}={}", key, value)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Error");
        s.field("kind", &self.kind)
            .field("status", &self.status)
            .field("message", &self.message);
        if !self.operation.is_empty() {
            s.field("operation", &self.operation);
        }
        if !self.context.is_empty() {
            s.field("context", &self.context);
        }
        if let Some(source) = &self.source {
            s.field("source", source);
        }
        s.finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::ReadFailed,
        };
        Self::new(kind, err.to_string())
            .with_operation("read")
            .set_source(err)
    }
}
