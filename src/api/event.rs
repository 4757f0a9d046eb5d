//! Typed events carried by the backend's chunked streams.

use crate::results::ResultSet;
use serde::Deserialize;
use serde_json::Value;

/// One event from a backend stream, in arrival order.
///
/// Two stream vocabularies share this union: schema indexing emits
/// status/progress/done/error, query execution emits status/sql_chunk/
/// results/error. The decoder does not police which vocabulary a stream
/// uses; callers match on what they care about.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Informational message for display only.
    Status { message: String },
    /// Determinate progress; counters never move backwards within a stream.
    Progress { current: u64, total: u64 },
    /// Incremental fragment of generated SQL; append in arrival order.
    SqlChunk { chunk: String },
    /// Terminal success for a query, already zipped into labeled rows.
    Results(ResultSet),
    /// Terminal failure.
    Error { message: String },
    /// Terminal success for schema indexing.
    Done { table_count: u64 },
}

impl StreamEvent {
    /// True for events that end the logical operation.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamEvent::Results(_) | StreamEvent::Error { .. } | StreamEvent::Done { .. }
        )
    }
}

/// Raw frame payload as the backend sends it. `results` rows arrive
/// positionally here and are zipped against `columns` on conversion.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum WireEvent {
    Status {
        message: String,
    },
    Progress {
        current: u64,
        total: u64,
    },
    SqlChunk {
        chunk: String,
    },
    Results {
        rows: Vec<Vec<Value>>,
        columns: Vec<String>,
        #[serde(default)]
        row_count: u64,
        #[serde(default)]
        exec_time_ms: u64,
    },
    Error {
        message: String,
    },
    Done {
        table_count: u64,
    },
}

impl From<WireEvent> for StreamEvent {
    fn from(wire: WireEvent) -> Self {
        match wire {
            WireEvent::Status { message } => StreamEvent::Status { message },
            WireEvent::Progress { current, total } => StreamEvent::Progress { current, total },
            WireEvent::SqlChunk { chunk } => StreamEvent::SqlChunk { chunk },
            WireEvent::Results {
                rows,
                columns,
                row_count,
                exec_time_ms,
            } => StreamEvent::Results(ResultSet::from_positional(
                columns,
                rows,
                row_count,
                exec_time_ms,
            )),
            WireEvent::Error { message } => StreamEvent::Error { message },
            WireEvent::Done { table_count } => StreamEvent::Done { table_count },
        }
    }
}
