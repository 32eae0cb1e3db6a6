//! mcviz command-line interface.
//!
pub mod options;
pub mod pipeline;
pub mod registry;

use mcviz_error::{Error, ErrorKind, Result};

pub use options::McvizOptions;
pub use pipeline::{Plan, run_pipeline};
pub use registry::Registry;

/// Main entry point: the JSON diagram, or the registry listing with `list`.
pub fn run_main(registry: &Registry, opts: &McvizOptions) -> Result<String> {
    if opts.list {
        return Ok(registry.describe());
    }
    let Some(input) = opts.input.as_deref() else {
        return Err(Error::config_invalid("no input file given"));
    };

    let plan = Plan::configure(registry, opts)?;
    let rendered = run_pipeline(registry, input, &plan)?;
    serde_json::to_string_pretty(&rendered).map_err(|err| {
        Error::new(ErrorKind::SerializationFailed, err.to_string())
            .with_operation("run_main")
            .set_source(err)
    })
}
