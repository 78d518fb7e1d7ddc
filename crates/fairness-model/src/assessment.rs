//! Classified fairness status of a metric result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fairness assessment of one metric.
///
/// `Inconclusive` marks metrics where fewer than two groups carry a defined
/// value; those are reported but never counted as Fair, Warning or Violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assessment {
    Fair,
    Warning,
    Violation,
    Inconclusive,
}

impl Assessment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::Fair => "Fair",
            Assessment::Warning => "Warning",
            Assessment::Violation => "Violation",
            Assessment::Inconclusive => "Inconclusive",
        }
    }

    /// Position on the Violation < Warning < Fair scale.
    ///
    /// Returns `None` for `Inconclusive`, which has no place on that scale.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Assessment::Violation => Some(0),
            Assessment::Warning => Some(1),
            Assessment::Fair => Some(2),
            Assessment::Inconclusive => None,
        }
    }

    /// True for Warning and Violation.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Assessment::Warning | Assessment::Violation)
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Assessment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FAIR" => Ok(Assessment::Fair),
            "WARNING" => Ok(Assessment::Warning),
            "VIOLATION" => Ok(Assessment::Violation),
            "INCONCLUSIVE" => Ok(Assessment::Inconclusive),
            _ => Err(format!("Unknown assessment: {s}")),
        }
    }
}
