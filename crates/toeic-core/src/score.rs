//! Mock test score history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score fields supplied when recording a test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestResult {
    pub date: DateTime<Utc>,
    pub test_name: String,
    pub listening_score: u16,
    pub reading_score: u16,
}

/// A recorded mock test score
///
/// `total_score` is fixed when the result is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    pub date: DateTime<Utc>,
    pub test_name: String,
    pub listening_score: u16,
    pub reading_score: u16,
    pub total_score: u16,
}

impl TestResult {
    pub fn new(id: String, result: NewTestResult) -> Self {
        Self {
            id,
            date: result.date,
            test_name: result.test_name,
            listening_score: result.listening_score,
            reading_score: result.reading_score,
            total_score: result.listening_score.saturating_add(result.reading_score),
        }
    }
}
