use async_trait::async_trait;

use crate::error::LightbnbDbError;
use crate::pool::ConfigAndPool;
use crate::query::QueryAndParams;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Something that can run one parameterized statement and hand back its rows.
///
/// [`ConfigAndPool`] is the production implementation; tests substitute a
/// recording fake so statement shapes can be checked without a server.
#[async_trait]
pub trait AsyncDatabaseExecutor: Send + Sync {
    /// Executes a single statement (SELECT, or DML with `RETURNING`) and returns its rows.
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, LightbnbDbError>;

    /// Executes a prebuilt [`QueryAndParams`].
    async fn execute(&self, qp: &QueryAndParams) -> Result<ResultSet, LightbnbDbError> {
        self.execute_select(&qp.query, &qp.params).await
    }
}

#[async_trait]
impl AsyncDatabaseExecutor for ConfigAndPool {
    /// Checks a connection out of the pool for this one statement.
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, LightbnbDbError> {
        let conn = self.get_connection().await?;
        conn.execute_select(query, params).await
    }
}

#[async_trait]
impl<T: AsyncDatabaseExecutor + ?Sized> AsyncDatabaseExecutor for std::sync::Arc<T> {
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, LightbnbDbError> {
        (**self).execute_select(query, params).await
    }
}
