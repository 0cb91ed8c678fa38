//! Convenient imports for common functionality.

pub use crate::config::DbSettings;
pub use crate::error::LightbnbDbError;
pub use crate::executor::AsyncDatabaseExecutor;
pub use crate::lenient::LenientStore;
pub use crate::models::{NewUser, PropertyAttributes, PropertyListing, ReservationListing, User};
pub use crate::pool::{ConfigAndPool, MiddlewarePoolConnection};
pub use crate::query::QueryAndParams;
pub use crate::query_builder::{DEFAULT_LIMIT, PropertySearch, build_property_search};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::store::Store;
pub use crate::types::RowValues;
