//! Presentation styles over a laid-out event.
//!
//! Styles run in the order given, each writing attributes onto the nodes
//! and edges of a [`Layout`]. A later style overwrites what an earlier one
//! set, so `[Default, SimpleColors]` and `[SimpleColors, Default]` differ.

pub mod basic;
pub mod color;
pub mod lines;
pub mod status;
pub mod width;

pub use basic::{DefaultStyle, SimpleColors};
pub use color::{hsl_color, particle_color};
pub use lines::FancyLines;
pub use status::StatusColor;
pub use width::{LineWidthPt, ThickenColor};

use std::time::Instant;

use mcviz_core::{Arg, OperatorSpec, Options};
use mcviz_error::{Error, Result};
use mcviz_layout::Layout;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

pub trait Style {
    fn name(&self) -> &'static str;

    fn apply(&self, layout: &mut Layout) -> Result<()>;
}

/// The fixed set of style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum StyleKind {
    Default,
    SimpleColors,
    FancyLines,
    LineWidthPt,
    ThickenColor,
    StatusColor,
}

impl StyleKind {
    /// Styles applied when the caller names none.
    pub const DEFAULTS: [StyleKind; 3] =
        [StyleKind::Default, StyleKind::SimpleColors, StyleKind::FancyLines];

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            StyleKind::Default => "black lines with no enhancements",
            StyleKind::SimpleColors => "colour lines and nodes by particle kind",
            StyleKind::FancyLines => "curly gluons, wavy photons and arrowed fermions",
            StyleKind::LineWidthPt => "line width grows with transverse momentum",
            StyleKind::ThickenColor => "thicken the lines of one colour index",
            StyleKind::StatusColor => "colour particles by status code",
        }
    }

    pub fn args(self) -> &'static [Arg] {
        match self {
            StyleKind::FancyLines => lines::ARGS,
            StyleKind::LineWidthPt => width::LINE_WIDTH_ARGS,
            StyleKind::ThickenColor => width::THICKEN_ARGS,
            _ => &[],
        }
    }

    pub fn build(self, options: &Options) -> Result<Box<dyn Style>> {
        Ok(match self {
            StyleKind::Default => Box::new(DefaultStyle),
            StyleKind::SimpleColors => Box::new(SimpleColors),
            StyleKind::FancyLines => Box::new(FancyLines::from_options(options)?),
            StyleKind::LineWidthPt => Box::new(LineWidthPt::from_options(options)?),
            StyleKind::ThickenColor => Box::new(ThickenColor::from_options(options)?),
            StyleKind::StatusColor => Box::new(StatusColor),
        })
    }

    /// Resolve `Name:key=value,...` into a configured style.
    pub fn from_spec(spec: &OperatorSpec) -> Result<Box<dyn Style>> {
        let kind: StyleKind = spec
            .name
            .parse()
            .map_err(|_| Error::unknown_style(spec.name.clone()))?;
        let options = Options::parse(kind.as_str(), kind.args(), &spec.options)?;
        kind.build(&options)
    }
}

/// Apply `styles` to `layout` in order.
pub fn apply_styles(layout: &mut Layout, styles: &[Box<dyn Style>]) -> Result<()> {
    for style in styles {
        let start = Instant::now();
        style.apply(layout)?;
        debug!(
            style = style.name(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "style applied"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_error::ErrorKind;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_kind_with_defaults_builds() {
        for kind in StyleKind::iter().filter(|k| *k != StyleKind::ThickenColor) {
            let style = StyleKind::from_spec(&OperatorSpec::named(kind.as_str())).unwrap();
            assert_eq!(style.name(), kind.as_str());
        }
    }

    #[test]
    fn test_configuration_errors() {
        let err = StyleKind::from_spec(&OperatorSpec::named("Sparkles")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownStyle);

        let spec = OperatorSpec::parse("FancyLines:curl=3").unwrap();
        let err = StyleKind::from_spec(&spec).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownOption);

        let err = StyleKind::from_spec(&OperatorSpec::named("ThickenColor")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let spec = OperatorSpec::parse("ThickenColor:color_id=-4").unwrap();
        let err = StyleKind::from_spec(&spec).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let spec = OperatorSpec::parse("LineWidthPt:scale=wide").unwrap();
        let err = StyleKind::from_spec(&spec).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_declared_options() {
        let names: Vec<&str> = StyleKind::LineWidthPt.args().iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["scale", "min"]);
        assert!(StyleKind::ThickenColor.args()[0].default.is_none());
    }
}
