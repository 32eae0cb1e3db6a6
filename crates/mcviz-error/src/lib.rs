//! # mcviz-error
//!
//! Unified error handling for mcviz.
//!
//! - **ErrorKind**: what went wrong (e.g. ParseFailed, LayoutDegenerate)
//! - **ErrorStatus**: whether the load dispatcher may fall back to the next
//!   loader (`Recoverable`) or the pipeline must abort (`Fatal`)
//! - **Context**: operation name plus key/value pairs locating the cause
//! - **Source**: the wrapped underlying error, if any
//!
//! ## Usage
//!
//! ```rust
//! use mcviz_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ParseFailed, "missing event line")
//!         .with_operation("hepmc::parse")
//!         .with_context("line", "3"))
//! }
//! ```
//!
//! Recoverable errors are only ever caught at the load-dispatch boundary;
//! everything else propagates to the caller unchanged.

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using mcviz Error
pub type Result<T> = std::result::Result<T, Error>;
