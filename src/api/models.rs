//! Wire types for the backend's REST surface.

use serde::{Deserialize, Serialize};

/// A saved database connection as the backend reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Connection {
    pub id: String,
    pub name: String,
    pub pinecone_namespace: Option<String>,
    pub table_count: Option<i64>,
    pub indexed_at: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// Payload for creating a connection.
#[derive(Debug, Clone, Serialize)]
pub struct NewConnection {
    pub name: String,
    pub connection_string: String,
}

/// Outcome of probing a connection string. A failing probe is a value, not
/// an error: the backend's `detail` message lands in `error`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestOutcome {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload for mirroring the auth provider's user into the backend.
#[derive(Debug, Clone, Serialize)]
pub struct SyncUser {
    pub clerk_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Backend's view of the synced user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Payload for starting a query stream.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub nl_query: String,
    pub connection_id: String,
}

/// One past query as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub nl_query: String,
    pub generated_sql: Option<String>,
    pub connection_id: String,
    pub status: String,
    pub error_message: Option<String>,
    pub row_count: Option<i64>,
    pub exec_time_ms: Option<i64>,
    pub created_at: String,
}

/// One page of history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPage {
    pub items: Vec<HistoryEntry>,
    pub page: u32,
    /// Estimated: the backend returns a bare array with no count, so a full
    /// page reads as "at least one more" and a partial page closes the
    /// total. Imprecise by construction until the protocol grows a count.
    pub total: u64,
}

impl HistoryPage {
    pub(crate) fn estimate(items: Vec<HistoryEntry>, page: u32, page_size: u32) -> Self {
        let total = if (items.len() as u32) < page_size {
            u64::from(page.saturating_sub(1)) * u64::from(page_size) + items.len() as u64
        } else {
            u64::from(page) * u64::from(page_size) + 1
        };
        Self { items, page, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            nl_query: "how many users".into(),
            generated_sql: Some("SELECT count(*) FROM users".into()),
            connection_id: "c1".into(),
            status: "success".into(),
            error_message: None,
            row_count: Some(1),
            exec_time_ms: Some(12),
            created_at: "2026-08-01T10:00:00Z".into(),
        }
    }

    #[test]
    fn partial_page_closes_the_total() {
        let page = HistoryPage::estimate(vec![entry("a"), entry("b")], 2, 20);
        assert_eq!(page.total, 22);
    }

    #[test]
    fn full_page_estimates_at_least_one_more() {
        let items: Vec<_> = (0..20).map(|i| entry(&i.to_string())).collect();
        let page = HistoryPage::estimate(items, 2, 20);
        assert_eq!(page.total, 41);
    }

    #[test]
    fn connection_deserializes_from_backend_shape() {
        let raw = r#"{
            "id": "c1",
            "name": "prod",
            "pinecone_namespace": null,
            "table_count": 14,
            "indexed_at": "2026-08-01T10:00:00Z",
            "is_active": true,
            "created_at": "2026-07-01T10:00:00Z"
        }"#;
        let conn: Connection = serde_json::from_str(raw).expect("connection");
        assert_eq!(conn.name, "prod");
        assert_eq!(conn.table_count, Some(14));
    }
}
