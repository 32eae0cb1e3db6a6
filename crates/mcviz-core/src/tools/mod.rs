//! Structural operators over a [`GraphView`].
//!
//! Every tool maps the previous view to a new one; the input view is never
//! modified. Tools run exactly once each, in the order the caller gives.
//! Overlapping edits are the caller's concern.

mod contract;
mod kinks;
mod pluck;
mod tagging;
mod unsummarize;

pub use contract::{Jets, Loops};
pub use kinks::Kinks;
pub use pluck::Pluck;
pub use tagging::{Chainmail, Gluballs};
pub use unsummarize::Unsummarize;

use std::time::Instant;

use mcviz_error::{Error, Result};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::args::{Arg, OperatorSpec, Options};
use crate::view::GraphView;

pub trait Tool {
    fn name(&self) -> &'static str;

    fn apply(&self, view: &GraphView) -> Result<GraphView>;
}

/// The fixed set of tool names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum ToolKind {
    Kinks,
    Gluballs,
    Chainmail,
    Jets,
    Loops,
    Pluck,
    Unsummarize,
}

impl ToolKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::Kinks => "splice same-kind particles through pass-through vertices",
            ToolKind::Gluballs => "tag closed gluon clusters",
            ToolKind::Chainmail => "tag colour-connected particle chains",
            ToolKind::Jets => "contract hadronization regions into one vertex",
            ToolKind::Loops => "contract cycles into one vertex",
            ToolKind::Pluck => "remove particles of one kind and join their ends",
            ToolKind::Unsummarize => "restore every contracted region",
        }
    }

    pub fn args(self) -> &'static [Arg] {
        match self {
            ToolKind::Pluck => pluck::ARGS,
            _ => &[],
        }
    }

    pub fn build(self, options: &Options) -> Result<Box<dyn Tool>> {
        Ok(match self {
            ToolKind::Kinks => Box::new(Kinks),
            ToolKind::Gluballs => Box::new(Gluballs),
            ToolKind::Chainmail => Box::new(Chainmail),
            ToolKind::Jets => Box::new(Jets),
            ToolKind::Loops => Box::new(Loops),
            ToolKind::Pluck => Box::new(Pluck::from_options(options)?),
            ToolKind::Unsummarize => Box::new(Unsummarize),
        })
    }

    /// Resolve `Name:key=value,...` into a configured tool.
    pub fn from_spec(spec: &OperatorSpec) -> Result<Box<dyn Tool>> {
        let kind: ToolKind = spec
            .name
            .parse()
            .map_err(|_| Error::unknown_tool(spec.name.clone()))?;
        let options = Options::parse(kind.as_str(), kind.args(), &spec.options)?;
        kind.build(&options)
    }
}

/// Run `tools` in order, each on the previous stage's output.
pub fn apply_tools(view: GraphView, tools: &[Box<dyn Tool>]) -> Result<GraphView> {
    tools.iter().try_fold(view, |view, tool| {
        let start = Instant::now();
        let next = tool.apply(&view)?;
        debug!(
            tool = tool.name(),
            vertices = next.vertices().len(),
            particles = next.particles().len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "tool applied"
        );
        Ok(next)
    })
}

/// Reject views whose references do not line up before editing them.
pub(crate) fn require_consistent(tool: &'static str, view: &GraphView) -> Result<()> {
    view.validate()
        .map_err(|err| Error::tool_precondition(tool, err.message().to_string()).set_source(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_error::ErrorKind;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_kind_builds_from_name() {
        for kind in ToolKind::iter() {
            let tool = ToolKind::from_spec(&OperatorSpec::named(kind.as_str())).unwrap();
            assert_eq!(tool.name(), kind.as_str());
        }
    }

    #[test]
    fn test_unknown_tool_and_option() {
        let err = ToolKind::from_spec(&OperatorSpec::named("Prune")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownTool);

        let spec = OperatorSpec::parse("Kinks:depth=2").unwrap();
        let err = ToolKind::from_spec(&spec).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownOption);
    }
}
