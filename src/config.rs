use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{LiftError, Result};

/// The LIFT schema versions that can be read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LiftVersion {
    /// The FieldWorks dialect, with ranges kept in a sibling `.lift-ranges` file.
    #[default]
    V0_13,
    V0_15,
}

impl LiftVersion {
    pub const FIELDWORKS: LiftVersion = LiftVersion::V0_13;
    pub const LATEST: LiftVersion = LiftVersion::V0_15;
    pub const ALL: [LiftVersion; 2] = [LiftVersion::V0_13, LiftVersion::V0_15];

    pub fn as_str(&self) -> &'static str {
        match self {
            LiftVersion::V0_13 => "0.13",
            LiftVersion::V0_15 => "0.15",
        }
    }
    /// Whether ranges must live in a separate `.lift-ranges` file.
    pub fn requires_external_ranges(&self) -> bool {
        matches!(self, LiftVersion::V0_13)
    }
}

impl fmt::Display for LiftVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiftVersion {
    type Err = LiftError;
    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "0.13" => Ok(LiftVersion::V0_13),
            "0.15" => Ok(LiftVersion::V0_15),
            other => Err(LiftError::UnsupportedVersion(other.to_string())),
        }
    }
}

impl TryFrom<String> for LiftVersion {
    type Error = LiftError;
    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Settings applied when creating and writing lexicons.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Version given to lexicons created from scratch.
    pub version: LiftVersion,
    /// Written to the `producer` attribute of the `lift` element.
    pub producer: String,
    /// Spaces per nesting level in written documents.
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: LiftVersion::default(),
            producer: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            indent: 2,
        }
    }
}

impl Settings {
    /// Reads settings from a file (toml, json, yaml, ini or ron, by extension).
    /// Keys left out of the file keep their default values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LiftError::Config(format!(
                "settings file not found: {}",
                path.display()
            )));
        }
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}
