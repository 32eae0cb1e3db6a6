//! Options for one mcviz run.

use std::path::PathBuf;

use mcviz_style::StyleKind;

/// What to load, which operators to run, and where to write.
///
/// Tool and style specs have the form `Name` or `Name:key=value,...` and
/// run in the order given.
#[derive(Debug, Clone, Default)]
pub struct McvizOptions {
    pub input: Option<PathBuf>,
    pub layout: Option<String>,
    pub tools: Vec<String>,
    /// Empty means the default style stack.
    pub styles: Vec<String>,
    pub output: Option<PathBuf>,
    /// Print the registry instead of running.
    pub list: bool,
}

impl McvizOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(input.into()),
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_tool(mut self, spec: impl Into<String>) -> Self {
        self.tools.push(spec.into());
        self
    }

    pub fn with_style(mut self, spec: impl Into<String>) -> Self {
        self.styles.push(spec.into());
        self
    }

    /// Style specs to run: the given ones, or the default stack.
    pub fn style_specs(&self) -> Vec<String> {
        if self.styles.is_empty() {
            StyleKind::DEFAULTS.iter().map(|k| k.as_str().to_string()).collect()
        } else {
            self.styles.clone()
        }
    }
}
