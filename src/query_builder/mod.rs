//! Statement builders.
//!
//! Nothing in here touches the network: every builder returns a
//! [`QueryAndParams`](crate::query::QueryAndParams) whose `$n` placeholders
//! line up one-to-one with its parameter list.

mod property_search;
mod statements;

pub use property_search::{DEFAULT_LIMIT, PropertySearch, build_property_search};
pub use statements::{
    insert_property, insert_user, reservations_for_guest, user_with_email, user_with_id,
};

/// Average review rating as selected and filtered on. `avg()` over an integer
/// column is `numeric`, which has no native Rust decoding; casting keeps it a float.
pub(crate) const AVERAGE_RATING: &str = "avg(property_reviews.rating)::float8";
