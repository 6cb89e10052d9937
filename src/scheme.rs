//! Color schemes resolving style keys to visual attributes
//!
//! Provides YAML-based scheme support with compile-time embedded schemes.
//! A scheme maps style keys ("keyword", "string", ...) to `TextAttributes`;
//! lookups fall back along dotted prefixes, so "function.method.call"
//! matches "function.method" and then "function".

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::attrs::{Color, TextAttributes};

// Embed scheme YAML files at compile time
pub const DEFAULT_DARK_YAML: &str = include_str!("../schemes/default-dark.yaml");
pub const GITHUB_LIGHT_YAML: &str = include_str!("../schemes/github-light.yaml");

/// A built-in scheme entry
pub struct BuiltinScheme {
    /// Stable identifier (e.g. "default-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in schemes
pub const BUILTIN_SCHEMES: &[BuiltinScheme] = &[
    BuiltinScheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
    BuiltinScheme {
        id: "github-light",
        yaml: GITHUB_LIGHT_YAML,
    },
];

/// Errors raised while loading a scheme
#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("failed to read scheme file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid color for style {key:?}: {reason}")]
    Color { key: String, reason: String },
    #[error("unknown scheme id: {0}")]
    UnknownId(String),
}

/// Raw scheme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    pub styles: HashMap<String, StyleData>,
}

/// One style entry (raw strings from YAML, all fields optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleData {
    #[serde(default)]
    pub fg: Option<String>,
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub bold: Option<bool>,
    #[serde(default)]
    pub italic: Option<bool>,
    #[serde(default)]
    pub underline: Option<bool>,
}

/// Resolved scheme with parsed colors
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub name: String,
    styles: HashMap<String, TextAttributes>,
}

impl ColorScheme {
    /// A scheme with no style entries (every lookup resolves to None)
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            styles: HashMap::new(),
        }
    }

    /// Load scheme from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemeError> {
        let data: SchemeData = serde_yaml::from_str(yaml)?;
        Self::from_data(data)
    }

    /// Load a built-in scheme by id
    pub fn from_builtin(id: &str) -> Result<Self, SchemeError> {
        let entry = BUILTIN_SCHEMES
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SchemeError::UnknownId(id.to_string()))?;
        Self::from_yaml(entry.yaml)
    }

    /// Load a scheme from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, SchemeError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loading scheme from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Convert raw scheme data to a resolved scheme
    pub fn from_data(data: SchemeData) -> Result<Self, SchemeError> {
        let mut styles = HashMap::with_capacity(data.styles.len());
        for (key, raw) in data.styles {
            let parse = |hex: &Option<String>| -> Result<Option<Color>, SchemeError> {
                match hex {
                    Some(s) => Color::from_hex(s)
                        .map(Some)
                        .map_err(|reason| SchemeError::Color {
                            key: key.clone(),
                            reason,
                        }),
                    None => Ok(None),
                }
            };
            let attrs = TextAttributes {
                fg: parse(&raw.fg)?,
                bg: parse(&raw.bg)?,
                bold: raw.bold,
                italic: raw.italic,
                underline: raw.underline,
            };
            styles.insert(key, attrs);
        }
        Ok(Self {
            name: data.name,
            styles,
        })
    }

    /// Resolve a style key to its attributes, if the scheme defines it.
    ///
    /// Tries an exact match first, then progressively shorter dotted
    /// prefixes. `None` means "no override from this key".
    pub fn attributes_for(&self, key: &str) -> Option<&TextAttributes> {
        if let Some(attrs) = self.styles.get(key) {
            return Some(attrs);
        }

        let mut prefix = key;
        while let Some(dot_pos) = prefix.rfind('.') {
            prefix = &prefix[..dot_pos];
            if let Some(attrs) = self.styles.get(prefix) {
                return Some(attrs);
            }
        }

        None
    }

    /// Add or replace a style entry
    pub fn define(&mut self, key: impl Into<String>, attrs: TextAttributes) {
        self.styles.insert(key.into(), attrs);
    }

    /// Number of style entries
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
