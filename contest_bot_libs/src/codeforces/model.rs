use serde::Deserialize;
use serde_json::Value;

/// Lifecycle state of a contest as reported by Codeforces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Before,
    Coding,
    PendingSystemTest,
    SystemTest,
    Finished,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContestRecord {
    pub id: i64,
    pub name: String,
    pub phase: Phase,
    // Codeforces omits the start time for contests which are not scheduled yet.
    #[serde(rename = "startTimeSeconds")]
    pub start_time_seconds: Option<i64>,
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: i64,
}

impl ContestRecord {
    pub fn is_upcoming(&self) -> bool {
        self.phase == Phase::Before
    }
}

/// Envelope of every Codeforces API response.
///
/// `result` is kept as raw values so that a single malformed element does not
/// reject the whole batch.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<Vec<Value>>,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}
