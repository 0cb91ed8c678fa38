use crate::types::RowValues;

/// A SQL string and its bound parameters bundled together.
///
/// Every statement builder in [`crate::query_builder`] returns one of these,
/// so callers can inspect or log the exact text and values before execution:
/// ```rust
/// use lightbnb_db::prelude::*;
///
/// let qp = QueryAndParams::new(
///     "SELECT * FROM users WHERE users.id = $1",
///     vec![RowValues::Int(1)],
/// );
/// assert_eq!(qp.placeholder_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query, `$1` first
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given query string and parameters
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// Highest `$n` placeholder referenced in the query text.
    ///
    /// Builders keep this equal to `params.len()`.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        let bytes = self.query.as_bytes();
        let mut max = 0usize;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    if let Ok(n) = self.query[start..end].parse::<usize>() {
                        max = max.max(n);
                    }
                }
                i = end;
            } else {
                i += 1;
            }
        }
        max
    }
}
