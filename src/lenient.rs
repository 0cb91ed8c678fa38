//! Error-swallowing facade over [`Store`].
//!
//! Callers written against the legacy contract expect every call to complete:
//! a failed query is logged and comes back as "nothing found". Such callers
//! cannot tell a missing row from a broken connection; new code should use
//! [`Store`] directly.

use tracing::error;

use crate::error::LightbnbDbError;
use crate::executor::AsyncDatabaseExecutor;
use crate::models::{NewUser, PropertyAttributes, PropertyListing, ReservationListing, User};
use crate::query_builder::PropertySearch;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct LenientStore<E> {
    inner: Store<E>,
}

fn swallow<T>(operation: &'static str, result: Result<T, LightbnbDbError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(operation, error = %err, "query failed");
            None
        }
    }
}

impl<E: AsyncDatabaseExecutor> LenientStore<E> {
    pub fn new(inner: Store<E>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Store<E> {
        &self.inner
    }

    pub async fn get_user_with_email(&self, email: &str) -> Option<User> {
        swallow(
            "get_user_with_email",
            self.inner.get_user_with_email(email).await,
        )
        .flatten()
    }

    pub async fn get_user_with_id(&self, id: i64) -> Option<User> {
        swallow("get_user_with_id", self.inner.get_user_with_id(id).await).flatten()
    }

    pub async fn add_user(&self, user: &NewUser) -> Option<User> {
        swallow("add_user", self.inner.add_user(user).await)
    }

    pub async fn get_all_reservations(&self, guest_id: i64, limit: i64) -> Vec<ReservationListing> {
        swallow(
            "get_all_reservations",
            self.inner.get_all_reservations(guest_id, limit).await,
        )
        .unwrap_or_default()
    }

    pub async fn get_all_properties(
        &self,
        options: &PropertySearch,
        limit: i64,
    ) -> Vec<PropertyListing> {
        swallow(
            "get_all_properties",
            self.inner.get_all_properties(options, limit).await,
        )
        .unwrap_or_default()
    }

    pub async fn add_property(&self, property: &PropertyAttributes) -> Vec<PropertyListing> {
        swallow("add_property", self.inner.add_property(property).await).unwrap_or_default()
    }
}

impl<E> From<Store<E>> for LenientStore<E> {
    fn from(inner: Store<E>) -> Self {
        Self { inner }
    }
}
