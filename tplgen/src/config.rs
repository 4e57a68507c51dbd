use arch::template::FORMAT_VERSION;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;

/// What to do with an operand that is not in the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OnUnknown {
    /// Abort the run at the first unknown operand
    #[default]
    FailFast,
    /// Write 0xFF for the operand, report it, and keep going
    RecordAndContinue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Version byte written to the header.
    pub version: u8,
    pub on_unknown: OnUnknown,
    /// Drop the first prefix of the source. Meant for explicit prefix lists
    /// exported with a blank leading group; derived prefixes are never blank.
    pub drop_first_prefix: bool,
    /// Retry unknown operands lower-cased (`A` -> `a`). Tables written with
    /// upper-case registers, like `LD A,N`, only encode with this on.
    pub fold_case: bool,
    /// Order each group's rows by (prefix, code) instead of delivery order,
    /// for sources that do not already deliver them sorted.
    pub sort_combos: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: FORMAT_VERSION,
            on_unknown: OnUnknown::FailFast,
            drop_first_prefix: false,
            fold_case: false,
            sort_combos: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::FileOpen(name.clone(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Yaml(name, e))
    }

    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Yaml("<config>".to_string(), e))
    }
}
