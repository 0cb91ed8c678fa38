// PostgreSQL plumbing shared by the pool and the store:
// - params: binding `RowValues` as tokio-postgres parameters
// - query: decoding rows into a `ResultSet`
// - executor: running statements on a pooled client

pub mod executor;
pub mod params;
pub mod query;

pub use executor::{execute_batch, execute_select};
pub use params::Params;
pub use query::{
    build_result_set_from_statement, is_supported_column_type, postgres_extract_value,
};
