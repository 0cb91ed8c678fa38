use deadpool_postgres::Object as PostgresObject;
use tracing::debug;

use crate::error::LightbnbDbError;
use crate::postgres;
use crate::results::ResultSet;
use crate::types::RowValues;

/// A pooled Postgres connection, returned to the pool on drop.
pub struct MiddlewarePoolConnection {
    client: PostgresObject,
}

impl std::fmt::Debug for MiddlewarePoolConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Postgres").field(&self.client).finish()
    }
}

impl MiddlewarePoolConnection {
    pub(crate) fn new(client: PostgresObject) -> Self {
        Self { client }
    }

    /// Run one parameterized statement and collect every returned row.
    ///
    /// # Errors
    /// Returns an error if parameter conversion, execution, or row decoding fails.
    pub async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, LightbnbDbError> {
        debug!(sql = query, params = params.len(), "execute_select");
        postgres::execute_select(&self.client, query, params).await
    }

    /// Run several semicolon-separated statements without parameters.
    ///
    /// # Errors
    /// Returns an error if the database rejects any statement.
    pub async fn execute_batch(&self, query: &str) -> Result<(), LightbnbDbError> {
        debug!(sql = query, "execute_batch");
        postgres::execute_batch(&self.client, query).await
    }
}
