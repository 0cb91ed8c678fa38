use tracing::debug;

use crate::config::DbSettings;
use crate::error::LightbnbDbError;
use crate::executor::AsyncDatabaseExecutor;
use crate::models::{NewUser, PropertyAttributes, PropertyListing, ReservationListing, User};
use crate::pool::ConfigAndPool;
use crate::query_builder::{
    PropertySearch, build_property_search, insert_property, insert_user, reservations_for_guest,
    user_with_email, user_with_id,
};

/// LightBnB data access. One statement per call, no transactions.
///
/// An empty result is `Ok(None)` / `Ok(vec![])`; a failed query is `Err`. See
/// [`crate::lenient::LenientStore`] for the variant that never fails.
#[derive(Debug, Clone)]
pub struct Store<E> {
    executor: E,
}

impl Store<ConfigAndPool> {
    /// Build a pool-backed store.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created from `settings`.
    pub async fn connect(settings: &DbSettings) -> Result<Self, LightbnbDbError> {
        Ok(Self::new(ConfigAndPool::from_settings(settings).await?))
    }
}

impl<E: AsyncDatabaseExecutor> Store<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// # Errors
    /// Returns an error if the query fails or the row does not decode as a user.
    pub async fn get_user_with_email(&self, email: &str) -> Result<Option<User>, LightbnbDbError> {
        let rs = self.executor.execute(&user_with_email(email)).await?;
        rs.first().map(User::try_from).transpose()
    }

    /// # Errors
    /// Returns an error if the query fails or the row does not decode as a user.
    pub async fn get_user_with_id(&self, id: i64) -> Result<Option<User>, LightbnbDbError> {
        let rs = self.executor.execute(&user_with_id(id)).await?;
        rs.first().map(User::try_from).transpose()
    }

    /// Insert a user and return the stored row.
    ///
    /// # Errors
    /// Returns an error if the insert fails (e.g. the email is taken) or returns no row.
    pub async fn add_user(&self, user: &NewUser) -> Result<User, LightbnbDbError> {
        let rs = self.executor.execute(&insert_user(user)).await?;
        let row = rs.first().ok_or_else(|| {
            LightbnbDbError::ExecutionError("insert into users returned no row".to_string())
        })?;
        let created = User::try_from(row)?;
        debug!(user_id = created.id, "user added");
        Ok(created)
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_all_reservations(
        &self,
        guest_id: i64,
        limit: i64,
    ) -> Result<Vec<ReservationListing>, LightbnbDbError> {
        let rs = self
            .executor
            .execute(&reservations_for_guest(guest_id, limit))
            .await?;
        Ok(rs.into_iter().map(ReservationListing).collect())
    }

    /// # Errors
    /// Returns `LightbnbDbError::ParameterError` for non-finite price or
    /// rating filters, or an error if the query fails.
    pub async fn get_all_properties(
        &self,
        options: &PropertySearch,
        limit: i64,
    ) -> Result<Vec<PropertyListing>, LightbnbDbError> {
        let rs = self
            .executor
            .execute(&build_property_search(options, limit)?)
            .await?;
        Ok(rs.into_iter().map(PropertyListing).collect())
    }

    /// Insert a property and return the stored row(s).
    ///
    /// # Errors
    /// Returns `LightbnbDbError::ParameterError` for unusable attributes, or the
    /// store's error if the insert fails.
    pub async fn add_property(
        &self,
        property: &PropertyAttributes,
    ) -> Result<Vec<PropertyListing>, LightbnbDbError> {
        let qp = insert_property(property)?;
        let rs = self.executor.execute(&qp).await?;
        debug!(rows = rs.len(), "property added");
        Ok(rs.into_iter().map(PropertyListing).collect())
    }
}
