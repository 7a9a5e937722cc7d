//! Clinic storage configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the data directory.
pub const DATA_DIR_VAR: &str = "VET_CLINIC_DATA_DIR";

/// Environment variable toggling pretty-printed extent files.
pub const PRETTY_VAR: &str = "VET_CLINIC_PRETTY";

/// Where and how a [`Clinic`](crate::Clinic) keeps its extent files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    /// Directory holding one `<kind>.json` file per entity type
    pub data_dir: PathBuf,
    /// Indent the JSON written to disk
    pub pretty: bool,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            pretty: true,
        }
    }
}

impl ClinicConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Build from `VET_CLINIC_DATA_DIR` and `VET_CLINIC_PRETTY`, falling back
    /// to the defaults for unset variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(flag) = std::env::var(PRETTY_VAR) {
            config.pretty = parse_flag(&flag);
        }
        config
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// `0` and `false` (any case) switch a flag off; anything else leaves it on.
fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value == "0" || value.eq_ignore_ascii_case("false"))
}
