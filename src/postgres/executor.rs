use tokio_postgres::Client;

use super::params::Params;
use super::query::build_result_set_from_statement;
use crate::error::LightbnbDbError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Prepare and run a statement directly on the client, outside any explicit
/// transaction, and decode every returned row.
///
/// # Errors
/// Returns errors from preparation, parameter binding, execution, or row decoding.
pub async fn execute_select(
    client: &Client,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, LightbnbDbError> {
    let stmt = client.prepare(query).await?;
    if stmt.params().len() != params.len() {
        return Err(LightbnbDbError::ParameterError(format!(
            "statement expects {} parameters, got {}",
            stmt.params().len(),
            params.len()
        )));
    }
    let converted = Params::convert(params);
    let rows = client.query(&stmt, converted.as_refs()).await?;
    build_result_set_from_statement(&stmt, &rows)
}

/// Execute a batch of SQL statements for Postgres
///
/// # Errors
/// Returns errors from batch execution.
pub async fn execute_batch(client: &Client, query: &str) -> Result<(), LightbnbDbError> {
    client.batch_execute(query).await?;
    Ok(())
}
