use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of report kinds. Identifiers are matched exactly, without any
/// case folding or trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Headcount,
    Payroll,
    Budget,
}

impl ReportType {
    pub const fn values() -> [Self; 3] {
        [Self::Headcount, Self::Payroll, Self::Budget]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Headcount => "headcount",
            Self::Payroll => "payroll",
            Self::Budget => "budget",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Headcount => "Headcount by position",
            Self::Payroll => "Payroll",
            Self::Budget => "Budget utilisation",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, UnknownReportType> {
        Self::values()
            .into_iter()
            .find(|candidate| candidate.as_str() == raw)
            .ok_or_else(|| UnknownReportType {
                selector: raw.to_string(),
            })
    }
}

impl FromStr for ReportType {
    type Err = UnknownReportType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised for any selector outside the enumeration. The display text is
/// returned verbatim to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Report Type not found")]
pub struct UnknownReportType {
    pub selector: String,
}
