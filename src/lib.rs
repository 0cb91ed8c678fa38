//! Async PostgreSQL data access for the LightBnB rental listing app.
//!
//! ```rust,no_run
//! use lightbnb_db::prelude::*;
//!
//! # async fn demo() -> Result<(), LightbnbDbError> {
//! let store = Store::connect(&DbSettings::from_env()?).await?;
//! let search = PropertySearch::default()
//!     .with_city("'Vancouver'")
//!     .with_maximum_price_per_night(150.0);
//! for listing in store.get_all_properties(&search, DEFAULT_LIMIT).await? {
//!     println!("{:?} {:?}", listing.id(), listing.average_rating());
//! }
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod lenient;
pub mod models;
pub mod pool;
pub mod postgres;
pub mod prelude;
pub mod query;
pub mod query_builder;
pub mod results;
pub mod store;
pub mod types;

pub use error::LightbnbDbError;
pub use store::Store;
