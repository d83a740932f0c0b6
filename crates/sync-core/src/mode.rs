//! Run mode: report drift or repair it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// How a run treats drift. Fixed before any comparison starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read-only: drift fails the run
    #[default]
    Check,
    /// Overwrite or create local files to match the source
    Write,
}

impl Mode {
    /// The literal used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Write => "write",
        }
    }

    /// Whether this mode modifies local files.
    pub fn writes(&self) -> bool {
        matches!(self, Self::Write)
    }
}

impl FromStr for Mode {
    type Err = Error;

    /// Parse a mode literal. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(Self::Check),
            "write" => Ok(Self::Write),
            other => Err(Error::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
