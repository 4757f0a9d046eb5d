use crate::results::ResultSet;

/// State of the current natural-language query session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySession {
    pub nl_query: String,
    /// Generated SQL as received so far, chunk by chunk.
    pub streaming_sql: String,
    pub streaming: bool,
    pub result: Option<ResultSet>,
    pub error: Option<String>,
}

impl QuerySession {
    pub fn set_nl_query(&mut self, query: impl Into<String>) {
        self.nl_query = query.into();
    }

    /// Start a fresh stream: prior SQL, result, and error are cleared.
    pub fn begin(&mut self) {
        self.streaming = true;
        self.streaming_sql.clear();
        self.result = None;
        self.error = None;
    }

    /// Append one SQL fragment, in arrival order.
    pub fn push_chunk(&mut self, chunk: &str) {
        self.streaming_sql.push_str(chunk);
    }

    pub fn finish(&mut self, result: ResultSet) {
        self.streaming = false;
        self.result = Some(result);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.streaming = false;
        self.error = Some(message.into());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result() -> ResultSet {
        ResultSet::from_positional(vec!["x".into()], vec![vec![json!(1)]], 1, 5)
    }

    #[test]
    fn begin_clears_prior_outcome() {
        let mut session = QuerySession::default();
        session.push_chunk("SELECT 1;");
        session.fail("boom");
        session.begin();
        assert!(session.streaming);
        assert!(session.streaming_sql.is_empty());
        assert_eq!(session.error, None);
        assert_eq!(session.result, None);
    }

    #[test]
    fn chunks_accumulate_in_order() {
        let mut session = QuerySession::default();
        session.begin();
        session.push_chunk("SELECT ");
        session.push_chunk("1;");
        assert_eq!(session.streaming_sql, "SELECT 1;");
    }

    #[test]
    fn finish_stores_the_result_and_stops_streaming() {
        let mut session = QuerySession::default();
        session.begin();
        session.finish(result());
        assert!(!session.streaming);
        assert!(session.result.is_some());
    }

    #[test]
    fn reset_returns_to_default() {
        let mut session = QuerySession::default();
        session.set_nl_query("how many users");
        session.begin();
        session.reset();
        assert_eq!(session, QuerySession::default());
    }
}
