//! The set of loaders, tools, layouts and styles available to a run.
//!
//! Built once at start-up and only read afterwards. Tools, layouts and
//! styles are closed sets; the registry resolves their names and options,
//! and owns the ordered loader fallback chain.

use std::fmt;

use mcviz_core::{Loader, OperatorSpec, Tool, ToolKind, default_loaders};
use mcviz_error::Result;
use mcviz_layout::LayoutKind;
use mcviz_style::{Style, StyleKind};
use strum::IntoEnumIterator;

pub struct Registry {
    loaders: Vec<Box<dyn Loader>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with the built-in loaders, tried in order.
    pub fn new() -> Self {
        Self::with_loaders(default_loaders())
    }

    pub fn with_loaders(loaders: Vec<Box<dyn Loader>>) -> Self {
        Self { loaders }
    }

    pub fn loaders(&self) -> &[Box<dyn Loader>] {
        &self.loaders
    }

    /// Resolve a `Name:key=value,...` tool spec.
    pub fn tool(&self, spec: &str) -> Result<Box<dyn Tool>> {
        ToolKind::from_spec(&OperatorSpec::parse(spec)?)
    }

    /// Resolve a layout name; `None` is the default layout.
    pub fn layout(&self, name: Option<&str>) -> Result<LayoutKind> {
        LayoutKind::from_name(name)
    }

    /// Resolve a `Name:key=value,...` style spec.
    pub fn style(&self, spec: &str) -> Result<Box<dyn Style>> {
        StyleKind::from_spec(&OperatorSpec::parse(spec)?)
    }

    /// Human-readable listing of everything registered.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loaders (tried in order):")?;
        for loader in &self.loaders {
            writeln!(f, "  {}", loader.name())?;
        }

        writeln!(f, "\nTools:")?;
        for kind in ToolKind::iter() {
            writeln!(f, "  {:<12} {}", kind.as_str(), kind.description())?;
            for arg in kind.args() {
                writeln!(f, "      {}", arg)?;
            }
        }

        writeln!(f, "\nLayouts:")?;
        for kind in LayoutKind::iter() {
            let marker = if kind == LayoutKind::default() { " (default)" } else { "" };
            writeln!(f, "  {:<12} {}{}", kind.as_str(), kind.description(), marker)?;
        }

        writeln!(f, "\nStyles:")?;
        for kind in StyleKind::iter() {
            writeln!(f, "  {:<12} {}", kind.as_str(), kind.description())?;
            for arg in kind.args() {
                writeln!(f, "      {}", arg)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_error::ErrorKind;

    #[test]
    fn test_resolves_names() {
        let registry = Registry::new();
        assert_eq!(registry.tool("Pluck:pdgid=92").unwrap().name(), "Pluck");
        assert_eq!(registry.layout(None).unwrap(), LayoutKind::Feynman);
        assert_eq!(registry.style("LineWidthPt:min=0.2").unwrap().name(), "LineWidthPt");
        assert_eq!(registry.loaders().len(), 2);
    }

    #[test]
    fn test_unknown_names() {
        let registry = Registry::new();
        assert_eq!(registry.tool("Prune").err().unwrap().kind(), ErrorKind::UnknownTool);
        assert_eq!(registry.layout(Some("radial")).unwrap_err().kind(), ErrorKind::UnknownLayout);
        assert_eq!(registry.style("Neon").err().unwrap().kind(), ErrorKind::UnknownStyle);
        assert_eq!(registry.style(":scale=1").err().unwrap().kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_describe_lists_everything() {
        let listing = Registry::new().describe();
        for name in ["hepmc", "Unsummarize", "jetless", "StatusColor", "color_id (int, required)"] {
            assert!(listing.contains(name), "missing {name}");
        }
        assert!(listing.contains("feynman"));
        assert!(listing.contains("(default)"));
    }

    #[test]
    fn test_listing_sections_in_order() {
        let listing = Registry::new().to_string();
        let at = |heading: &str| listing.find(heading).unwrap();
        assert!(listing.starts_with("Loaders (tried in order):\n  hepmc\n  json\n"));
        assert!(at("\nTools:") < at("\nLayouts:"));
        assert!(at("\nLayouts:") < at("\nStyles:"));
        assert!(listing.contains("  feynman      vertices as nodes, particles as lines (default)\n"));
        assert_eq!(listing, Registry::new().describe());
    }
}
