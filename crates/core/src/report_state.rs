//! The closed report lifecycle enumeration.
//!
//! Reports move through `OPENED -> IN_PROGRESS -> SOLVED/CLOSED`, but the
//! lifecycle is advisory: any admin transition endpoint may set any of the
//! four states directly. The wire and storage form is the
//! SCREAMING_SNAKE_CASE string.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportState {
    #[serde(rename = "OPENED")]
    Opened,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "SOLVED")]
    Solved,
    #[serde(rename = "CLOSED")]
    Closed,
}

/// All valid report states, in lifecycle order.
pub const ALL_REPORT_STATES: &[ReportState] = &[
    ReportState::Opened,
    ReportState::InProgress,
    ReportState::Solved,
    ReportState::Closed,
];

impl ReportState {
    /// The storage/wire representation of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportState::Opened => "OPENED",
            ReportState::InProgress => "IN_PROGRESS",
            ReportState::Solved => "SOLVED",
            ReportState::Closed => "CLOSED",
        }
    }

    /// Parse a state from its wire form. Unknown values are rejected so the
    /// HTTP boundary can refuse bad `state` filters before any query runs.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "OPENED" => Ok(ReportState::Opened),
            "IN_PROGRESS" => Ok(ReportState::InProgress),
            "SOLVED" => Ok(ReportState::Solved),
            "CLOSED" => Ok(ReportState::Closed),
            other => Err(format!(
                "Unknown report state '{other}'. Must be one of: OPENED, IN_PROGRESS, SOLVED, CLOSED"
            )),
        }
    }
}

impl std::fmt::Display for ReportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
