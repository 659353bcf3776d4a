//! Generation input record
//!
//! The field set collected by the (out of scope) form collaborator and
//! handed to the renderer. Serialized camelCase to match the persisted
//! template layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Probation length in months. The form offers a fixed set of choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbationPeriod {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[default]
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "6")]
    Six,
}

impl ProbationPeriod {
    pub fn months(self) -> u8 {
        match self {
            ProbationPeriod::One => 1,
            ProbationPeriod::Two => 2,
            ProbationPeriod::Three => 3,
            ProbationPeriod::Six => 6,
        }
    }
}

impl fmt::Display for ProbationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.months())
    }
}

/// Rejected probation value; only 1, 2, 3 and 6 months are offered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("probation period must be 1, 2, 3 or 6 months, got {0:?}")]
pub struct ParseProbationError(String);

impl FromStr for ProbationPeriod {
    type Err = ParseProbationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(ProbationPeriod::One),
            "2" => Ok(ProbationPeriod::Two),
            "3" => Ok(ProbationPeriod::Three),
            "6" => Ok(ProbationPeriod::Six),
            other => Err(ParseProbationError(other.to_string())),
        }
    }
}

/// Employment details merged into a template at generation time.
///
/// Every field is required for a correct render except `salary`, which
/// substitutes to an empty string when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInput {
    pub employee_name: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default)]
    pub probation_period: ProbationPeriod,
    pub template_id: String,
}

impl GenerationInput {
    /// The start date in the `DD/MM/YYYY` form used throughout the
    /// rendered document.
    pub fn formatted_start_date(&self) -> String {
        self.start_date.format("%d/%m/%Y").to_string()
    }
}
