use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::report_type::ReportType;
use super::sources::SourceError;
use crate::departments::Department;

/// One computation bound to exactly one report type.
pub trait ReportStrategy: Send + Sync {
    fn report_type(&self) -> ReportType;

    /// Must not mutate anything; reads only from the injected sources.
    fn compute(&self, department: &Department) -> Result<ReportData, ReportComputationError>;
}

/// Rows and summary produced by a strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportData {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

/// A single JSON object row. Its shape belongs to the strategy that built it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportRow(Map<String, Value>);

impl ReportRow {
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, ReportComputationError> {
        match serde_json::to_value(record)? {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ReportComputationError::Inconsistent(format!(
                "report rows must be objects, got {other}"
            ))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// Aggregate metric name to value, serialized in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportSummary(BTreeMap<&'static str, Value>);

impl ReportSummary {
    pub fn with(mut self, metric: &'static str, value: impl Into<Value>) -> Self {
        self.0.insert(metric, value.into());
        self
    }

    pub fn get(&self, metric: &str) -> Option<&Value> {
        self.0.get(metric)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Failure computing a report. Never downgraded to an empty report.
#[derive(Debug, thiserror::Error)]
pub enum ReportComputationError {
    #[error(transparent)]
    Unavailable(#[from] SourceError),
    #[error("inconsistent report data: {0}")]
    Inconsistent(String),
    #[error("unable to encode report row: {0}")]
    Encoding(#[from] serde_json::Error),
}
