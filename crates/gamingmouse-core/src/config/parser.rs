// GamingMouse Config Parser - TOML with Serde
// Decodes scheme configuration files

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::configuration::Configuration;
use super::field::{Bidirectional, Field};
use super::scheme::{If, Scheme};
use super::scrolling::{Distance, Scrolling};

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid condition in scheme {scheme}: {reason}")]
    InvalidCondition { scheme: usize, reason: String },
}

/// Root TOML table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    #[serde(default)]
    pub schemes: Vec<SchemeToml>,
}

/// One `[[schemes]]` entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemeToml {
    /// Activation conditions
    #[serde(rename = "if", default)]
    pub conditions: Option<ConditionsToml>,

    /// Scrolling settings, decoded leniently
    #[serde(default)]
    pub scrolling: Option<toml::Value>,
}

/// `if` accepts one table or an array of tables
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConditionsToml {
    Single(If),
    Multiple(Vec<If>),
}

impl From<ConditionsToml> for Vec<If> {
    fn from(value: ConditionsToml) -> Self {
        match value {
            ConditionsToml::Single(condition) => vec![condition],
            ConditionsToml::Multiple(conditions) => conditions,
        }
    }
}

impl ConfigToml {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))
    }

    /// Convert to the runtime configuration
    pub fn to_configuration(&self) -> Result<Configuration, ConfigError> {
        let mut schemes = Vec::with_capacity(self.schemes.len());
        for (index, entry) in self.schemes.iter().enumerate() {
            schemes.push(entry.to_scheme(index)?);
        }
        log::debug!("Configuration decoded with {} schemes", schemes.len());
        Ok(Configuration::new(schemes))
    }
}

impl SchemeToml {
    fn to_scheme(&self, index: usize) -> Result<Scheme, ConfigError> {
        let conditions: Option<Vec<If>> = self.conditions.clone().map(Into::into);
        if let Some(conditions) = &conditions {
            for condition in conditions {
                validate_condition(index, condition)?;
            }
        }

        let scrolling = match &self.scrolling {
            None => Field::Unset,
            Some(toml::Value::Table(table)) if table.is_empty() => Field::Empty,
            Some(toml::Value::Table(table)) => Field::Value(parse_scrolling(index, table)),
            Some(other) => {
                log::warn!(
                    "Ignoring scrolling in scheme {}: expected a table, got {}",
                    index,
                    other.type_str()
                );
                Field::Unset
            }
        };

        Ok(Scheme {
            conditions,
            scrolling,
        })
    }
}

fn validate_condition(scheme: usize, condition: &If) -> Result<(), ConfigError> {
    let identifiers = [
        ("app", &condition.app),
        ("parent_app", &condition.parent_app),
        ("group_app", &condition.group_app),
        ("display", &condition.display),
    ];
    for (key, value) in identifiers {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(ConfigError::InvalidCondition {
                scheme,
                reason: format!("'{}' must not be empty", key),
            });
        }
    }
    Ok(())
}

fn parse_scrolling(scheme: usize, table: &toml::Table) -> Scrolling {
    let mut scrolling = Scrolling::new();
    for (key, value) in table {
        match key.as_str() {
            "reverse" => {
                scrolling.reverse = parse_bidirectional(scheme, key, value, parse_bool);
            }
            "distance" => {
                scrolling.distance = parse_bidirectional(scheme, key, value, parse_distance);
            }
            "acceleration" => {
                scrolling.acceleration = parse_bidirectional(scheme, key, value, parse_number);
            }
            "speed" => {
                scrolling.speed = parse_bidirectional(scheme, key, value, parse_number);
            }
            other => {
                log::warn!("Ignoring unknown scrolling field '{}' in scheme {}", other, scheme);
            }
        }
    }
    scrolling
}

/// Decode `{ vertical = .., horizontal = .. }`. Malformed axes are dropped.
fn parse_bidirectional<T>(
    scheme: usize,
    field: &str,
    value: &toml::Value,
    parse: fn(&toml::Value) -> Option<T>,
) -> Field<Bidirectional<T>> {
    let Some(table) = value.as_table() else {
        log::warn!(
            "Ignoring scrolling.{} in scheme {}: expected a table, got {}",
            field,
            scheme,
            value.type_str()
        );
        return Field::Unset;
    };

    let mut pair = Bidirectional::default();
    for (axis, raw) in table {
        let slot = match axis.as_str() {
            "vertical" => &mut pair.vertical,
            "horizontal" => &mut pair.horizontal,
            other => {
                log::warn!(
                    "Ignoring unknown axis '{}' in scrolling.{} of scheme {}",
                    other,
                    field,
                    scheme
                );
                continue;
            }
        };
        match parse(raw) {
            Some(parsed) => *slot = Some(parsed),
            None => log::warn!(
                "Ignoring malformed scrolling.{}.{} in scheme {}: {}",
                field,
                axis,
                scheme,
                raw
            ),
        }
    }

    Some(pair).into()
}

fn parse_bool(value: &toml::Value) -> Option<bool> {
    value.as_bool()
}

fn parse_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) if f.is_finite() => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn parse_distance(value: &toml::Value) -> Option<Distance> {
    match value {
        toml::Value::String(s) => s.parse().ok(),
        toml::Value::Integer(i) => u32::try_from(*i).ok().map(Distance::Line),
        _ => None,
    }
}

impl Configuration {
    /// Decode a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        ConfigToml::from_toml(content)?.to_configuration()
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Default configuration path (~/.config/gamingmouse/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gamingmouse").join("config.toml"))
    }

    /// Load a configuration file, or an empty configuration if it is missing
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No configuration at {}, using an empty one", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Load from the default location, or an empty configuration if missing
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_or_default(path),
            None => Ok(Self::default()),
        }
    }
}
