//! Typed option declarations shared by tools and styles.
//!
//! An operator is configured from a spec string such as
//! `LineWidthPt:scale=2,min=0.5`. The operator declares its options as
//! [`Arg`]s; [`Options::parse`] checks the given values against them.

use std::collections::BTreeMap;
use std::str::FromStr;

use mcviz_error::{Error, Result};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArgKind {
    Float,
    Int,
    Text,
    Bool,
}

impl ArgKind {
    /// Parse a raw value as this kind.
    pub fn parse(self, raw: &str) -> Option<ArgValue> {
        let raw = raw.trim();
        match self {
            ArgKind::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ArgValue::Float),
            ArgKind::Int => raw.parse::<i64>().ok().map(ArgValue::Int),
            ArgKind::Text => Some(ArgValue::Text(raw.to_string())),
            ArgKind::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(ArgValue::Bool(true)),
                "false" | "no" | "off" | "0" => Some(ArgValue::Bool(false)),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Float(f64),
    Int(i64),
    Text(String),
    Bool(bool),
}

/// One declared option: name, kind, description and an optional default.
/// An option without a default is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arg {
    pub name: &'static str,
    pub kind: ArgKind,
    pub description: &'static str,
    pub default: Option<&'static str>,
}

impl Arg {
    pub const fn float(name: &'static str, description: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Float,
            description,
            default: Some(default),
        }
    }

    pub const fn int(name: &'static str, description: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Int,
            description,
            default: Some(default),
        }
    }

    pub const fn text(name: &'static str, description: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Text,
            description,
            default: Some(default),
        }
    }

    pub const fn bool(name: &'static str, description: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Bool,
            description,
            default: Some(default),
        }
    }

    pub const fn required(name: &'static str, kind: ArgKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            default: None,
        }
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.default {
            Some(default) => write!(
                f,
                "{} ({}, default {}): {}",
                self.name, self.kind, default, self.description
            ),
            None => write!(
                f,
                "{} ({}, required): {}",
                self.name, self.kind, self.description
            ),
        }
    }
}

/// Resolved option values for one operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: BTreeMap<&'static str, ArgValue>,
}

impl Options {
    /// Check `given` against the declarations of `owner` and fill defaults.
    pub fn parse(owner: &str, declared: &[Arg], given: &BTreeMap<String, String>) -> Result<Self> {
        if let Some(unknown) = given
            .keys()
            .find(|key| !declared.iter().any(|arg| arg.name == key.as_str()))
        {
            return Err(Error::unknown_option(owner, unknown.clone()));
        }

        let mut values = BTreeMap::new();
        for arg in declared {
            let raw = match (given.get(arg.name), arg.default) {
                (Some(raw), _) => raw.as_str(),
                (None, Some(default)) => default,
                (None, None) => {
                    return Err(Error::config_invalid(format!(
                        "'{}' requires option '{}'",
                        owner, arg.name
                    ))
                    .with_context("option", arg.name));
                }
            };
            let value = arg.kind.parse(raw).ok_or_else(|| {
                Error::config_invalid(format!(
                    "option '{}' of '{}' expects {}, got '{}'",
                    arg.name, owner, arg.kind, raw
                ))
                .with_context("option", arg.name)
            })?;
            values.insert(arg.name, value);
        }
        Ok(Self { values })
    }

    /// Defaults only. Fails if a declared option is required.
    pub fn defaults(owner: &str, declared: &[Arg]) -> Result<Self> {
        Self::parse(owner, declared, &BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn float(&self, name: &str) -> Result<f64> {
        match self.values.get(name) {
            Some(ArgValue::Float(v)) => Ok(*v),
            Some(ArgValue::Int(v)) => Ok(*v as f64),
            _ => Err(missing(name, ArgKind::Float)),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        match self.values.get(name) {
            Some(ArgValue::Int(v)) => Ok(*v),
            _ => Err(missing(name, ArgKind::Int)),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(ArgValue::Text(v)) => Ok(v),
            _ => Err(missing(name, ArgKind::Text)),
        }
    }

    pub fn bool(&self, name: &str) -> Result<bool> {
        match self.values.get(name) {
            Some(ArgValue::Bool(v)) => Ok(*v),
            _ => Err(missing(name, ArgKind::Bool)),
        }
    }
}

fn missing(name: &str, kind: ArgKind) -> Error {
    Error::config_invalid(format!("no {} option '{}'", kind, name))
}

/// An operator name with its raw `key=value` options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSpec {
    pub name: String,
    pub options: BTreeMap<String, String>,
}

impl OperatorSpec {
    /// Parse `Name` or `Name:key=value,key=value`. A bare `key` means
    /// `key=true`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (name, rest) = match spec.split_once(':') {
            Some((name, rest)) => (name.trim(), rest),
            None => (spec.trim(), ""),
        };
        if name.is_empty() {
            return Err(Error::config_invalid(format!("missing operator name in '{}'", spec)));
        }

        let mut options = BTreeMap::new();
        for item in rest.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (item, "true"),
            };
            if key.is_empty() {
                return Err(Error::config_invalid(format!("empty option name in '{}'", spec)));
            }
            if options.insert(key.to_string(), value.to_string()).is_some() {
                return Err(Error::config_invalid(format!(
                    "option '{}' given twice in '{}'",
                    key, spec
                )));
            }
        }

        Ok(Self {
            name: name.to_string(),
            options,
        })
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }
}

impl FromStr for OperatorSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcviz_error::ErrorKind;

    const ARGS: &[Arg] = &[
        Arg::float("scale", "multiplier", "1.0"),
        Arg::required("color_id", ArgKind::Int, "colour index"),
    ];

    fn given(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_spec_parse() {
        let spec = OperatorSpec::parse("LineWidthPt:scale=2, min=0.5").unwrap();
        assert_eq!(spec.name, "LineWidthPt");
        assert_eq!(spec.options.get("scale").map(String::as_str), Some("2"));
        assert_eq!(spec.options.get("min").map(String::as_str), Some("0.5"));

        let bare = OperatorSpec::parse("Default").unwrap();
        assert!(bare.options.is_empty());

        assert!(OperatorSpec::parse(":scale=1").is_err());
        assert!(OperatorSpec::parse("X:a=1,a=2").is_err());
    }

    #[test]
    fn test_defaults_and_values() {
        let options = Options::parse("T", ARGS, &given(&[("color_id", "501")])).unwrap();
        assert_eq!(options.float("scale").unwrap(), 1.0);
        assert_eq!(options.int("color_id").unwrap(), 501);
    }

    #[test]
    fn test_unknown_option() {
        let err = Options::parse("T", ARGS, &given(&[("color_id", "1"), ("width", "2")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOption);
    }

    #[test]
    fn test_required_and_bad_values() {
        let err = Options::defaults("T", ARGS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Options::parse("T", ARGS, &given(&[("color_id", "red")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Options::parse("T", ARGS, &given(&[("color_id", "1"), ("scale", "nan")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_bool_kind() {
        assert_eq!(ArgKind::Bool.parse("Yes"), Some(ArgValue::Bool(true)));
        assert_eq!(ArgKind::Bool.parse("0"), Some(ArgValue::Bool(false)));
        assert_eq!(ArgKind::Bool.parse("maybe"), None);
    }
}
